use fls_core::{
    Antecedent, Consequent, ControlSurface, Defuzzification, Domain, FuzzyError, FuzzyResult,
    InputId, MembershipFunction, OutputId, Rule, Rulebase, SurfaceAxes, Variables,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const NEGATIVITY_NAME: &str = "Negativity degree";
pub const POSITIVITY_NAME: &str = "Positivity degree";
pub const CLASSIFICATION_NAME: &str = "Tweet classification";

const NEGATIVITY_LIMITS: [[f64; 4]; 3] = [
    [0.0, 0.0, 0.3, 0.5],
    [0.3, 0.45, 0.55, 0.7],
    [0.5, 0.7, 1.0, 1.0],
];
const POSITIVITY_POINTS: [[f64; 3]; 3] = [[0.0, 0.0, 0.5], [0.3, 0.5, 0.7], [0.5, 1.0, 1.0]];
const CLASSIFICATION_FAMILY: usize = 2;
const CLASSIFICATION_LIMITS: [[f64; 4]; 3] = [
    [0.0, 0.0, 0.3, 0.5],
    [0.3, 0.45, 0.55, 0.7],
    [0.5, 0.7, 1.0, 1.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Moderate, Level::High];

    fn index(self) -> usize {
        match self {
            Level::Low => 0,
            Level::Moderate => 1,
            Level::High => 2,
        }
    }

    fn word(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Moderate => "Moderate",
            Level::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Negative,
    Neutral,
    Positive,
}

impl Polarity {
    pub const ALL: [Polarity; 3] = [Polarity::Negative, Polarity::Neutral, Polarity::Positive];

    fn index(self) -> usize {
        match self {
            Polarity::Negative => 0,
            Polarity::Neutral => 1,
            Polarity::Positive => 2,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Polarity::Negative => "Negative",
            Polarity::Neutral => "Neutral",
            Polarity::Positive => "Positive",
        };
        f.write_str(word)
    }
}

/// (negativity, positivity) => classification.
pub static RULE_TABLE: [(Level, Level, Polarity); 9] = [
    (Level::Low, Level::Low, Polarity::Neutral),
    (Level::Moderate, Level::Moderate, Polarity::Neutral),
    (Level::High, Level::High, Polarity::Neutral),
    (Level::Low, Level::Moderate, Polarity::Negative),
    (Level::Low, Level::High, Polarity::Negative),
    (Level::Moderate, Level::High, Polarity::Negative),
    (Level::Moderate, Level::Low, Polarity::Positive),
    (Level::High, Level::Moderate, Polarity::Positive),
    (Level::High, Level::Low, Polarity::Positive),
];

fn negativity_sets() -> FuzzyResult<Vec<MembershipFunction>> {
    Level::ALL
        .iter()
        .zip(NEGATIVITY_LIMITS)
        .map(|(level, limits)| {
            MembershipFunction::trapezoidal(
                format!("MF for {} negativity", level.word().to_lowercase()),
                limits,
            )
        })
        .collect()
}

fn positivity_sets() -> FuzzyResult<Vec<MembershipFunction>> {
    Level::ALL
        .iter()
        .zip(POSITIVITY_POINTS)
        .map(|(level, [a, b, c])| {
            MembershipFunction::triangular(
                format!("MF for {} positivity", level.word().to_lowercase()),
                a,
                b,
                c,
            )
        })
        .collect()
}

fn classification_sets() -> FuzzyResult<Vec<MembershipFunction>> {
    Polarity::ALL
        .iter()
        .zip(CLASSIFICATION_LIMITS)
        .map(|(polarity, limits)| {
            MembershipFunction::trapezoidal(format!("{polarity} classification"), limits)
        })
        .collect()
}

/// The membership functions of one linguistic variable, for plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipFamily {
    pub variable: String,
    pub domain: Domain,
    pub sets: Vec<MembershipFunction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFamily {
    pub variable: String,
    pub curves: Vec<Curve>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub height: f64,
    pub centroid: f64,
}

impl Classification {
    pub fn get(&self, mode: Defuzzification) -> f64 {
        match mode {
            Defuzzification::Height => self.height,
            Defuzzification::Centroid => self.centroid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFiring {
    pub rule: String,
    pub strength: f64,
}

/// Two inputs, one output, nine fixed rules.
#[derive(Debug, Clone)]
pub struct SentimentSystem {
    variables: Variables,
    rulebase: Rulebase,
    negativity: InputId,
    positivity: InputId,
    classification: OutputId,
    families: [MembershipFamily; 3],
}

impl SentimentSystem {
    pub fn new() -> FuzzyResult<Self> {
        let mut variables = Variables::new();
        let negativity = variables.add_input(NEGATIVITY_NAME, Domain::unit());
        let positivity = variables.add_input(POSITIVITY_NAME, Domain::unit());
        let classification = variables.add_output(CLASSIFICATION_NAME, Domain::unit());

        let negativity_sets = negativity_sets()?;
        let positivity_sets = positivity_sets()?;
        let classification_sets = classification_sets()?;

        let negativity_antecedents: Vec<Antecedent> = Level::ALL
            .iter()
            .map(|level| {
                Antecedent::new(
                    format!("{} Negativity", level.word()),
                    negativity_sets[level.index()].clone(),
                    negativity,
                )
            })
            .collect();
        let positivity_antecedents: Vec<Antecedent> = Level::ALL
            .iter()
            .map(|level| {
                Antecedent::new(
                    format!("{} Positivity", level.word()),
                    positivity_sets[level.index()].clone(),
                    positivity,
                )
            })
            .collect();
        let consequents: Vec<Consequent> = Polarity::ALL
            .iter()
            .map(|polarity| {
                Consequent::new(
                    polarity.to_string(),
                    classification_sets[polarity.index()].clone(),
                    classification,
                )
            })
            .collect();

        let mut rulebase = Rulebase::with_capacity(RULE_TABLE.len());
        for &(neg, pos, polarity) in RULE_TABLE.iter() {
            rulebase.add_rule(Rule::new(
                vec![
                    negativity_antecedents[neg.index()].clone(),
                    positivity_antecedents[pos.index()].clone(),
                ],
                consequents[polarity.index()].clone(),
            )?);
        }
        rulebase.validate(&variables)?;
        debug!(rules = rulebase.len(), "sentiment rulebase ready");

        let families = [
            MembershipFamily {
                variable: NEGATIVITY_NAME.into(),
                domain: Domain::unit(),
                sets: negativity_sets,
            },
            MembershipFamily {
                variable: POSITIVITY_NAME.into(),
                domain: Domain::unit(),
                sets: positivity_sets,
            },
            MembershipFamily {
                variable: CLASSIFICATION_NAME.into(),
                domain: Domain::unit(),
                sets: classification_sets,
            },
        ];

        Ok(Self {
            variables,
            rulebase,
            negativity,
            positivity,
            classification,
            families,
        })
    }

    pub fn with_discretization_level(mut self, level: usize) -> FuzzyResult<Self> {
        self.variables
            .set_discretization_level(self.classification, level)?;
        Ok(self)
    }

    pub fn rulebase(&self) -> &Rulebase {
        &self.rulebase
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn families(&self) -> &[MembershipFamily] {
        &self.families
    }

    /// Label of the classification set with the highest degree at `value`;
    /// ties go to Neutral.
    pub fn polarity(&self, value: f64) -> Polarity {
        let sets = &self.families[CLASSIFICATION_FAMILY].sets;
        let mut best = Polarity::Neutral;
        let mut best_degree = sets[Polarity::Neutral.index()].degree(value);
        for polarity in [Polarity::Negative, Polarity::Positive] {
            let degree = sets[polarity.index()].degree(value);
            if degree > best_degree {
                best = polarity;
                best_degree = degree;
            }
        }
        best
    }

    fn set_inputs(&mut self, negativity: f64, positivity: f64) -> FuzzyResult<()> {
        self.variables.set_input(self.negativity, negativity)?;
        self.variables.set_input(self.positivity, positivity)
    }

    pub fn classify(
        &mut self,
        negativity: f64,
        positivity: f64,
        mode: Defuzzification,
    ) -> FuzzyResult<f64> {
        self.set_inputs(negativity, positivity)?;
        self.rulebase
            .evaluate_output(&self.variables, self.classification, mode)?
            .ok_or(FuzzyError::UnknownOutput(self.classification.index()))
    }

    pub fn classify_all(&mut self, negativity: f64, positivity: f64) -> FuzzyResult<Classification> {
        let height = self.classify(negativity, positivity, Defuzzification::Height)?;
        let centroid = self.classify(negativity, positivity, Defuzzification::Centroid)?;
        debug!(negativity, positivity, height, centroid, "classified");
        Ok(Classification { height, centroid })
    }

    pub fn rule_firings(&mut self, negativity: f64, positivity: f64) -> FuzzyResult<Vec<RuleFiring>> {
        self.set_inputs(negativity, positivity)?;
        let strengths = self.rulebase.firing_strengths(&self.variables)?;
        Ok(self
            .rulebase
            .rules()
            .iter()
            .zip(strengths)
            .map(|(rule, strength)| RuleFiring {
                rule: rule.to_string(),
                strength,
            })
            .collect())
    }

    /// Classification over a negativity (x) by positivity (y) grid.
    pub fn control_surface(
        &mut self,
        steps_x: usize,
        steps_y: usize,
        mode: Defuzzification,
    ) -> FuzzyResult<ControlSurface> {
        let axes = SurfaceAxes {
            x_input: self.negativity,
            y_input: self.positivity,
            output: self.classification,
            steps_x,
            steps_y,
        };
        self.rulebase
            .control_surface(&mut self.variables, axes, mode)
    }

    pub fn membership_curves(&self, levels: usize) -> FuzzyResult<Vec<CurveFamily>> {
        self.families
            .iter()
            .map(|family| {
                let curves = family
                    .sets
                    .iter()
                    .map(|mf| {
                        Ok(Curve {
                            name: mf.name().to_string(),
                            points: mf.sample(family.domain, levels)?,
                        })
                    })
                    .collect::<FuzzyResult<Vec<_>>>()?;
                Ok(CurveFamily {
                    variable: family.variable.clone(),
                    curves,
                })
            })
            .collect()
    }
}
