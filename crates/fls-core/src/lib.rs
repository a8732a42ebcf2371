//! Type-1 fuzzy inference: membership functions bound to linguistic
//! variables, min-conjunction rules, height and centroid defuzzification.

pub mod error;
pub mod membership;
pub mod rule;
pub mod rulebase;
pub mod surface;
pub mod variable;


pub use error::{FuzzyError, FuzzyResult};
pub use membership::{MembershipFunction, Shape};
pub use rule::{Antecedent, Consequent, Firing, Rule};
pub use rulebase::{Defuzzification, Rulebase};
pub use surface::{ControlSurface, SurfaceAxes};
pub use variable::{
    Domain, Input, InputId, Output, OutputId, Variables, DEFAULT_DISCRETIZATION_LEVEL,
};
