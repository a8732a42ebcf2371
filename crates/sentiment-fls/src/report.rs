use crate::system::{Polarity, RuleFiring, SentimentSystem};
use chrono::Utc;
use fls_core::FuzzyResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub id: Uuid,
    pub generated_at: String,
    pub negativity: f64,
    pub positivity: f64,
    pub height: f64,
    pub centroid: f64,
    pub polarity: Polarity,
    pub firings: Vec<RuleFiring>,
}

impl ClassificationReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Classifies one input pair with both defuzzifiers and records how each rule fired.
/// The polarity label follows the centroid value.
pub fn generate_report(
    system: &mut SentimentSystem,
    negativity: f64,
    positivity: f64,
) -> FuzzyResult<ClassificationReport> {
    let classification = system.classify_all(negativity, positivity)?;
    let firings = system.rule_firings(negativity, positivity)?;

    Ok(ClassificationReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now().to_rfc3339(),
        negativity,
        positivity,
        height: classification.height,
        centroid: classification.centroid,
        polarity: system.polarity(classification.centroid),
        firings,
    })
}
