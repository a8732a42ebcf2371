use thiserror::Error;

/// Configuration and evaluation errors of the inference engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("invalid domain [{min}, {max}]: min must be finite and below max")]
    InvalidDomain { min: f64, max: f64 },
    #[error("invalid membership function '{name}': {reason}")]
    InvalidShape { name: String, reason: String },
    #[error("discretization level must be at least 2, got {0}")]
    InvalidDiscretization(usize),
    #[error("rule has no antecedents (consequent '{0}')")]
    EmptyRule(String),
    #[error("input handle {0} does not belong to this variable set")]
    UnknownInput(usize),
    #[error("output handle {0} does not belong to this variable set")]
    UnknownOutput(usize),
    #[error("input '{name}' cannot take the non-finite value {value}")]
    NonFiniteInput { name: String, value: f64 },
    #[error("input '{0}' was read before a value was set")]
    InputNotSet(String),
    #[error("unknown defuzzification mode '{0}' (expected height, centroid, 0 or 1)")]
    UnknownMode(String),
}

pub type FuzzyResult<T> = Result<T, FuzzyError>;
