use anyhow::Context;
use fls_core::{Defuzzification, DEFAULT_DISCRETIZATION_LEVEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swn_lexicon::SenseWeighting;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub discretization_level: usize,
    pub mode: Defuzzification,
    pub surface: SurfaceConfig,
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub steps_x: usize,
    pub steps_y: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub path: Option<PathBuf>,
    pub weighting: SenseWeighting,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            discretization_level: DEFAULT_DISCRETIZATION_LEVEL,
            mode: Defuzzification::Centroid,
            surface: SurfaceConfig::default(),
            lexicon: LexiconConfig::default(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            steps_x: 10,
            steps_y: 10,
        }
    }
}

impl SentimentConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("config does not match the expected schema")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("config not readable: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SentimentConfig::from_json("{}").unwrap();
        assert_eq!(config, SentimentConfig::default());
        assert_eq!(config.discretization_level, 100);
        assert_eq!(config.mode, Defuzzification::Centroid);
        assert_eq!(config.surface.steps_x, 10);
        assert_eq!(config.lexicon.path, None);
    }

    #[test]
    fn partial_overrides() {
        let config = SentimentConfig::from_json(
            r#"{"mode": "height", "surface": {"steps_y": 25},
                "lexicon": {"path": "data/SentiWordNet.txt", "weighting": "inverse-rank"}}"#,
        )
        .unwrap();
        assert_eq!(config.mode, Defuzzification::Height);
        assert_eq!(config.surface.steps_x, 10);
        assert_eq!(config.surface.steps_y, 25);
        assert_eq!(config.lexicon.weighting, SenseWeighting::InverseRank);
        assert_eq!(
            config.lexicon.path.as_deref(),
            Some(Path::new("data/SentiWordNet.txt"))
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(SentimentConfig::from_json(r#"{"mode": "mean"}"#).is_err());
    }
}
