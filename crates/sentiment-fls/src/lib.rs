//! Sentiment polarity as a type-1 fuzzy logic system.
//!
//! Two inputs in [0, 1] (negativity and positivity degree of a text) are
//! mapped onto a classification in [0, 1] by nine fixed rules. Values near 0
//! read as negative, near 0.5 as neutral, near 1 as positive.

pub mod report;
pub mod system;


pub use fls_core::{ControlSurface, Defuzzification};
pub use report::{generate_report, ClassificationReport};
pub use system::{
    Classification, Curve, CurveFamily, Level, MembershipFamily, Polarity, RuleFiring,
    SentimentSystem, CLASSIFICATION_NAME, NEGATIVITY_NAME, POSITIVITY_NAME, RULE_TABLE,
};
