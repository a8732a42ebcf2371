use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read dictionary: {0}")]
    Io(#[from] io::Error),
    #[error("malformed dictionary line {line}: {reason}")]
    Format { line: usize, reason: String },
}

impl LexiconError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        LexiconError::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Line number of a format error.
    pub fn line(&self) -> Option<usize> {
        match self {
            LexiconError::Format { line, .. } => Some(*line),
            LexiconError::Io(_) => None,
        }
    }
}

pub type LexiconResult<T> = Result<T, LexiconError>;
