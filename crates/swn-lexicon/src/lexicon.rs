use crate::error::{LexiconError, LexiconResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Tab-separated fields per record: POS, ID, PosScore, NegScore, Terms, Gloss.
pub const FIELD_COUNT: usize = 6;

const POS_FIELD: usize = 0;
const ID_FIELD: usize = 1;
const POSITIVE_FIELD: usize = 2;
const NEGATIVE_FIELD: usize = 3;
const TERMS_FIELD: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScore {
    pub positive: f64,
    pub negative: f64,
}

impl PolarityScore {
    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    pub fn net(&self) -> f64 {
        self.positive - self.negative
    }
}

/// How the senses of one term are combined into its score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SenseWeighting {
    /// Arithmetic mean over distinct senses; ranks are ignored.
    #[default]
    Uniform,
    /// Sense `r` weighs `1/r`, normalised by the sum of weights.
    InverseRank,
}

impl FromStr for SenseWeighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(SenseWeighting::Uniform),
            "inverse-rank" | "inverse_rank" => Ok(SenseWeighting::InverseRank),
            other => Err(format!("unknown sense weighting '{other}'")),
        }
    }
}

impl fmt::Display for SenseWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenseWeighting::Uniform => f.write_str("uniform"),
            SenseWeighting::InverseRank => f.write_str("inverse-rank"),
        }
    }
}

/// Scores of every sense of one `lemma#pos` key, keyed by sense rank and the
/// synset that listed it. Re-reading the same synset overwrites its sense.
#[derive(Debug, Clone, Default)]
pub struct LexiconEntry {
    senses: BTreeMap<(u32, String), PolarityScore>,
}

impl LexiconEntry {
    /// Records a sense; returns the score it replaced, if any.
    pub fn insert(
        &mut self,
        rank: u32,
        synset: impl Into<String>,
        score: PolarityScore,
    ) -> Option<PolarityScore> {
        self.senses.insert((rank, synset.into()), score)
    }

    pub fn sense_count(&self) -> usize {
        self.senses.len()
    }

    pub fn aggregate(&self, weighting: SenseWeighting) -> PolarityScore {
        let (positive, negative, total) = self.senses.iter().fold(
            (0.0, 0.0, 0.0),
            |(pos, neg, total), ((rank, _), score)| {
                let weight = match weighting {
                    SenseWeighting::Uniform => 1.0,
                    SenseWeighting::InverseRank => 1.0 / f64::from(*rank),
                };
                (
                    pos + weight * score.positive,
                    neg + weight * score.negative,
                    total + weight,
                )
            },
        );
        if total == 0.0 {
            return PolarityScore::default();
        }
        PolarityScore::new(positive / total, negative / total)
    }
}

#[derive(Debug)]
struct SynsetRecord<'a> {
    pos: &'a str,
    id: &'a str,
    score: PolarityScore,
    terms: Vec<(&'a str, u32)>,
}

fn parse_record(line_no: usize, line: &str) -> LexiconResult<Option<SynsetRecord<'_>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LexiconError::format(
            line_no,
            format!("expected {FIELD_COUNT} tab-separated fields, found {}", fields.len()),
        ));
    }

    let pos = fields[POS_FIELD].trim();
    if pos.is_empty() {
        return Err(LexiconError::format(line_no, "empty part-of-speech marker"));
    }
    let positive = parse_score(line_no, "PosScore", fields[POSITIVE_FIELD])?;
    let negative = parse_score(line_no, "NegScore", fields[NEGATIVE_FIELD])?;

    let terms = fields[TERMS_FIELD]
        .split_whitespace()
        .map(|token| parse_term(line_no, token))
        .collect::<LexiconResult<Vec<_>>>()?;
    if terms.is_empty() {
        return Err(LexiconError::format(line_no, "synset has no terms"));
    }

    Ok(Some(SynsetRecord {
        pos,
        id: fields[ID_FIELD].trim(),
        score: PolarityScore::new(positive, negative),
        terms,
    }))
}

fn parse_score(line_no: usize, field: &str, raw: &str) -> LexiconResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LexiconError::format(
            line_no,
            format!("{field} '{raw}' is not a number"),
        )),
    }
}

fn parse_term(line_no: usize, token: &str) -> LexiconResult<(&str, u32)> {
    let (lemma, rank) = token.rsplit_once('#').ok_or_else(|| {
        LexiconError::format(line_no, format!("term '{token}' is not of the form lemma#rank"))
    })?;
    match rank.parse::<u32>() {
        Ok(rank) if rank > 0 && !lemma.is_empty() => Ok((lemma, rank)),
        _ => Err(LexiconError::format(
            line_no,
            format!("term '{token}' needs a lemma and a positive sense rank"),
        )),
    }
}

pub fn lexicon_key(term: &str, pos: &str) -> String {
    format!("{term}#{pos}")
}

/// Per-term polarity scores keyed by `lemma#pos`. Read-only once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    entries: HashMap<String, PolarityScore>,
}

impl Lexicon {
    pub fn load(path: impl AsRef<Path>) -> LexiconResult<Self> {
        Self::load_with(path, SenseWeighting::default())
    }

    pub fn load_with(path: impl AsRef<Path>, weighting: SenseWeighting) -> LexiconResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let lexicon = Self::from_reader(BufReader::new(file), weighting)?;
        info!(
            path = %path.display(),
            terms = lexicon.len(),
            %weighting,
            "loaded sentiment lexicon"
        );
        Ok(lexicon)
    }

    /// Scans every line first; any malformed record aborts the whole load.
    pub fn from_reader<R: BufRead>(reader: R, weighting: SenseWeighting) -> LexiconResult<Self> {
        let mut senses: HashMap<String, LexiconEntry> = HashMap::new();
        let mut records = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|err| match err.kind() {
                ErrorKind::InvalidData => LexiconError::format(line_no, "line is not valid UTF-8"),
                _ => LexiconError::Io(err),
            })?;
            let Some(record) = parse_record(line_no, &line)? else {
                continue;
            };
            records += 1;
            for (lemma, rank) in record.terms {
                let key = lexicon_key(lemma, record.pos);
                let entry = senses.entry(key).or_default();
                if entry.insert(rank, record.id, record.score).is_some() {
                    debug!(line = line_no, lemma, rank, synset = record.id, "duplicate sense replaced");
                }
            }
        }

        let entries: HashMap<String, PolarityScore> = senses
            .into_iter()
            .map(|(key, entry)| (key, entry.aggregate(weighting)))
            .collect();
        debug!(records, terms = entries.len(), "aggregated synset scores");
        Ok(Self { entries })
    }

    /// Aggregated score of `term` with part of speech `pos`; zero when unknown.
    pub fn score(&self, term: &str, pos: &str) -> PolarityScore {
        self.entries
            .get(&lexicon_key(term, pos))
            .copied()
            .unwrap_or_default()
    }

    pub fn contains(&self, term: &str, pos: &str) -> bool {
        self.entries.contains_key(&lexicon_key(term, pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PolarityScore)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
