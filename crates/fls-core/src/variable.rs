use crate::error::{FuzzyError, FuzzyResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISCRETIZATION_LEVEL: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain")]
pub struct Domain {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawDomain {
    min: f64,
    max: f64,
}

impl TryFrom<RawDomain> for Domain {
    type Error = FuzzyError;

    fn try_from(raw: RawDomain) -> FuzzyResult<Self> {
        Domain::new(raw.min, raw.max)
    }
}

impl Domain {
    pub fn new(min: f64, max: f64) -> FuzzyResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(FuzzyError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// The [0, 1] domain shared by every sentiment variable.
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        self.min + self.size() / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// `levels` equally spaced points from `min` to `max`, both ends included.
    pub fn discretize(&self, levels: usize) -> FuzzyResult<Vec<f64>> {
        if levels < 2 {
            return Err(FuzzyError::InvalidDiscretization(levels));
        }
        let step = self.size() / (levels - 1) as f64;
        Ok((0..levels).map(|i| self.min + i as f64 * step).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InputId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputId(pub(crate) usize);

impl InputId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl OutputId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    name: String,
    domain: Domain,
    value: Option<f64>,
}

impl Input {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Current crisp value; reading an input that was never set is an error.
    pub fn require_value(&self) -> FuzzyResult<f64> {
        self.value
            .ok_or_else(|| FuzzyError::InputNotSet(self.name.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawOutput")]
pub struct Output {
    name: String,
    domain: Domain,
    discretization_level: usize,
}

#[derive(Deserialize)]
struct RawOutput {
    name: String,
    domain: Domain,
    discretization_level: usize,
}

impl TryFrom<RawOutput> for Output {
    type Error = FuzzyError;

    fn try_from(raw: RawOutput) -> FuzzyResult<Self> {
        if raw.discretization_level < 2 {
            return Err(FuzzyError::InvalidDiscretization(raw.discretization_level));
        }
        Ok(Self {
            name: raw.name,
            domain: raw.domain,
            discretization_level: raw.discretization_level,
        })
    }
}

impl Output {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn discretization_level(&self) -> usize {
        self.discretization_level
    }
}

/// Owns the linguistic variables of one system. Rules refer to them by handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variables {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, name: impl Into<String>, domain: Domain) -> InputId {
        self.inputs.push(Input {
            name: name.into(),
            domain,
            value: None,
        });
        InputId(self.inputs.len() - 1)
    }

    pub fn add_output(&mut self, name: impl Into<String>, domain: Domain) -> OutputId {
        self.outputs.push(Output {
            name: name.into(),
            domain,
            discretization_level: DEFAULT_DISCRETIZATION_LEVEL,
        });
        OutputId(self.outputs.len() - 1)
    }

    pub fn input(&self, id: InputId) -> FuzzyResult<&Input> {
        self.inputs.get(id.0).ok_or(FuzzyError::UnknownInput(id.0))
    }

    pub fn output(&self, id: OutputId) -> FuzzyResult<&Output> {
        self.outputs.get(id.0).ok_or(FuzzyError::UnknownOutput(id.0))
    }

    /// Finite values outside the domain are stored as given; membership
    /// functions simply evaluate to their natural value there. NaN and the
    /// infinities are refused.
    pub fn set_input(&mut self, id: InputId, value: f64) -> FuzzyResult<()> {
        let input = self
            .inputs
            .get_mut(id.0)
            .ok_or(FuzzyError::UnknownInput(id.0))?;
        if !value.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                name: input.name.clone(),
                value,
            });
        }
        input.value = Some(value);
        Ok(())
    }

    pub fn input_value(&self, id: InputId) -> FuzzyResult<f64> {
        self.input(id)?.require_value()
    }

    pub(crate) fn restore_input(&mut self, id: InputId, value: Option<f64>) -> FuzzyResult<()> {
        let input = self
            .inputs
            .get_mut(id.0)
            .ok_or(FuzzyError::UnknownInput(id.0))?;
        input.value = value;
        Ok(())
    }

    pub fn set_discretization_level(&mut self, id: OutputId, level: usize) -> FuzzyResult<()> {
        if level < 2 {
            return Err(FuzzyError::InvalidDiscretization(level));
        }
        let output = self
            .outputs
            .get_mut(id.0)
            .ok_or(FuzzyError::UnknownOutput(id.0))?;
        output.discretization_level = level;
        Ok(())
    }

    pub fn inputs(&self) -> impl Iterator<Item = (InputId, &Input)> {
        self.inputs.iter().enumerate().map(|(i, v)| (InputId(i), v))
    }

    pub fn outputs(&self) -> impl Iterator<Item = (OutputId, &Output)> {
        self.outputs.iter().enumerate().map(|(i, v)| (OutputId(i), v))
    }
}
