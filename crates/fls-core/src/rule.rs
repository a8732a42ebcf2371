use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::MembershipFunction;
use crate::variable::{InputId, OutputId, Variables};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A membership function bound to an input variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Antecedent {
    name: String,
    membership: MembershipFunction,
    input: InputId,
}

impl Antecedent {
    pub fn new(name: impl Into<String>, membership: MembershipFunction, input: InputId) -> Self {
        Self {
            name: name.into(),
            membership,
            input,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn membership(&self) -> &MembershipFunction {
        &self.membership
    }

    pub fn input(&self) -> InputId {
        self.input
    }

    pub fn firing_degree(&self, variables: &Variables) -> FuzzyResult<f64> {
        let x = variables.input_value(self.input)?;
        Ok(self.membership.degree(x))
    }
}

/// A membership function bound to an output variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consequent {
    name: String,
    membership: MembershipFunction,
    output: OutputId,
}

impl Consequent {
    pub fn new(name: impl Into<String>, membership: MembershipFunction, output: OutputId) -> Self {
        Self {
            name: name.into(),
            membership,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn membership(&self) -> &MembershipFunction {
        &self.membership
    }

    pub fn output(&self) -> OutputId {
        self.output
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Firing<'a> {
    pub consequent: &'a Consequent,
    pub strength: f64,
}

/// Conjunction of antecedents implying one consequent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct Rule {
    antecedents: Vec<Antecedent>,
    consequent: Consequent,
}

#[derive(Deserialize)]
struct RawRule {
    antecedents: Vec<Antecedent>,
    consequent: Consequent,
}

impl TryFrom<RawRule> for Rule {
    type Error = FuzzyError;

    fn try_from(raw: RawRule) -> FuzzyResult<Self> {
        Rule::new(raw.antecedents, raw.consequent)
    }
}

impl Rule {
    pub fn new(antecedents: Vec<Antecedent>, consequent: Consequent) -> FuzzyResult<Self> {
        if antecedents.is_empty() {
            return Err(FuzzyError::EmptyRule(consequent.name));
        }
        Ok(Self {
            antecedents,
            consequent,
        })
    }

    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Minimum t-norm over the antecedent degrees.
    pub fn firing_strength(&self, variables: &Variables) -> FuzzyResult<f64> {
        self.antecedents
            .iter()
            .try_fold(1.0_f64, |acc, a| Ok(acc.min(a.firing_degree(variables)?)))
    }

    pub fn fire(&self, variables: &Variables) -> FuzzyResult<Firing<'_>> {
        Ok(Firing {
            consequent: &self.consequent,
            strength: self.firing_strength(variables)?,
        })
    }

    pub(crate) fn validate(&self, variables: &Variables) -> FuzzyResult<()> {
        for antecedent in &self.antecedents {
            variables.input(antecedent.input)?;
        }
        variables.output(self.consequent.output)?;
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF ")?;
        for (i, antecedent) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", antecedent.name)?;
        }
        write!(f, " THEN {}", self.consequent.name)
    }
}
