use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::MembershipFunction;
use crate::rule::Rule;
use crate::variable::{Output, OutputId, Variables};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzification {
    /// Firing-strength weighted average of consequent peaks.
    Height = 0,
    /// Centre of gravity of the max-min aggregated output set.
    Centroid = 1,
}

impl Defuzzification {
    pub fn as_str(self) -> &'static str {
        match self {
            Defuzzification::Height => "height",
            Defuzzification::Centroid => "centroid",
        }
    }
}

impl TryFrom<u8> for Defuzzification {
    type Error = FuzzyError;

    fn try_from(code: u8) -> FuzzyResult<Self> {
        match code {
            0 => Ok(Defuzzification::Height),
            1 => Ok(Defuzzification::Centroid),
            other => Err(FuzzyError::UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for Defuzzification {
    type Err = FuzzyError;

    fn from_str(s: &str) -> FuzzyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "height" | "0" => Ok(Defuzzification::Height),
            "centroid" | "1" => Ok(Defuzzification::Centroid),
            _ => Err(FuzzyError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rulebase {
    rules: Vec<Rule>,
}

// Candidate list of one output: (consequent set, firing strength) per rule.
type Candidates<'a> = Vec<(&'a MembershipFunction, f64)>;

impl Rulebase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks that every antecedent and consequent handle resolves in `variables`.
    pub fn validate(&self, variables: &Variables) -> FuzzyResult<()> {
        self.rules.iter().try_for_each(|rule| rule.validate(variables))
    }

    pub fn firing_strengths(&self, variables: &Variables) -> FuzzyResult<Vec<f64>> {
        self.rules
            .iter()
            .map(|rule| rule.firing_strength(variables))
            .collect()
    }

    /// Fires every rule against the current inputs, then defuzzifies each
    /// referenced output independently. Nothing survives between calls.
    pub fn evaluate(
        &self,
        variables: &Variables,
        mode: Defuzzification,
    ) -> FuzzyResult<BTreeMap<OutputId, f64>> {
        let mut aggregation: BTreeMap<OutputId, Candidates<'_>> = BTreeMap::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let firing = rule.fire(variables)?;
            trace!(rule = index + 1, strength = firing.strength, "rule fired");
            aggregation
                .entry(firing.consequent.output())
                .or_default()
                .push((firing.consequent.membership(), firing.strength));
        }

        let mut crisp = BTreeMap::new();
        for (id, candidates) in aggregation {
            let output = variables.output(id)?;
            let value = match mode {
                Defuzzification::Height => height(&candidates),
                Defuzzification::Centroid => centroid(output, &candidates)?,
            };
            trace!(output = output.name(), %mode, value, "defuzzified");
            crisp.insert(id, value);
        }
        Ok(crisp)
    }

    /// Crisp value of a single output; an output no rule concludes on has no value.
    pub fn evaluate_output(
        &self,
        variables: &Variables,
        output: OutputId,
        mode: Defuzzification,
    ) -> FuzzyResult<Option<f64>> {
        Ok(self.evaluate(variables, mode)?.get(&output).copied())
    }
}

fn height(candidates: &[(&MembershipFunction, f64)]) -> f64 {
    let (numerator, denominator) = candidates
        .iter()
        .fold((0.0_f64, 0.0_f64), |(num, den), (mf, strength)| {
            (num + strength * mf.peak(), den + strength)
        });
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn centroid(output: &Output, candidates: &[(&MembershipFunction, f64)]) -> FuzzyResult<f64> {
    let domain = output.domain();
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for x in domain.discretize(output.discretization_level())? {
        let membership = candidates
            .iter()
            .map(|(mf, strength)| strength.min(mf.degree(x)))
            .fold(0.0_f64, f64::max);
        numerator += x * membership;
        denominator += membership;
    }
    if denominator == 0.0 {
        Ok(domain.midpoint())
    } else {
        Ok(numerator / denominator)
    }
}

impl fmt::Display for Rulebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rulebase with {} rules:", self.rules.len())?;
        for (i, rule) in self.rules.iter().enumerate() {
            writeln!(f, "{}: {}", i + 1, rule)?;
        }
        Ok(())
    }
}
