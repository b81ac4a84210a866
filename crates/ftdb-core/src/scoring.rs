use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Point weights for the popularity score.
///
/// The source material disagreed with itself on these numbers (one variant
/// used 10/5/3/20), so they are configuration rather than constants. The
/// defaults are the representative variant.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    /// Points per organic result.
    pub organic: u32,
    /// Points per distinct trend indicator found.
    pub indicator: u32,
    /// Points per shopping sub-result.
    pub shopping: u32,
    /// Flat bonus when a knowledge panel is present.
    pub knowledge_panel: u32,
    /// Upper clamp for the final score.
    pub max_score: u32,
    /// How many related searches to keep per keyword (capped at 5).
    pub related_limit: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            organic: 15,
            indicator: 8,
            shopping: 5,
            knowledge_panel: 25,
            max_score: 100,
            related_limit: 3,
        }
    }
}

/// Score cutoffs for the trend-status table, checked in declaration order.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusThresholds {
    /// Minimum score for "strong upward trend" (with a strong indicator).
    pub strong_upward: u32,
    /// Minimum score for "moderate upward trend" (with a strong indicator).
    pub moderate_upward: u32,
    /// Minimum score for "high interest" regardless of indicators.
    pub high_interest: u32,
    /// Minimum score for "stable with potential" (with a moderate indicator).
    pub stable_potential: u32,
    /// Minimum score for "stable / moderate interest".
    pub stable: u32,
    /// Minimum score for "low interest"; below this is "minimal interest".
    pub low_interest: u32,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            strong_upward: 75,
            moderate_upward: 60,
            high_interest: 70,
            stable_potential: 45,
            stable: 30,
            low_interest: 15,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScoringFile {
    weights: ScoringWeights,
    thresholds: StatusThresholds,
}

/// Load scoring weights and status thresholds from a YAML file.
///
/// Missing keys fall back to the defaults, so a partial override file is
/// fine.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_scoring(path: &Path) -> Result<(ScoringWeights, StatusThresholds), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: ScoringFile = serde_yaml::from_str(&content)?;
    validate(&file.weights)?;
    Ok((file.weights, file.thresholds))
}

fn validate(weights: &ScoringWeights) -> Result<(), ConfigError> {
    if weights.max_score == 0 {
        return Err(ConfigError::Validation(
            "max_score must be positive".to_string(),
        ));
    }
    if weights.related_limit > 5 {
        return Err(ConfigError::Validation(format!(
            "related_limit must be at most 5, got {}",
            weights.related_limit
        )));
    }
    Ok(())
}
