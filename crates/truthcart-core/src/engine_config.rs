use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tunable thresholds for the analysis pipeline.
///
/// Everything here is a design parameter: the penalty weights and the
/// Trusted/Mixed/Suspicious boundaries are fixed contract values and do not
/// appear. Partial YAML files work because missing fields fall back to
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Complaint ratio treated as normal background grumbling.
    pub complaint_baseline: f64,
    /// Items dated within this many days of "today" count as recent.
    pub recency_window_days: i64,
    /// Multiplier applied to recent items in the external norm.
    pub recency_weight: f64,

    /// Width of one complaint-velocity bucket, in days.
    pub spike_window_days: i64,
    /// A bucket is a spike when it holds this multiple of the mean.
    pub spike_multiplier: f64,
    /// Minimum complaints in a bucket before it can count as a spike.
    pub spike_min_count: usize,
    pub spike_flag_threshold: f64,
    pub spike_flag_high: f64,

    pub sponsored_flag_threshold: f64,
    pub sponsored_flag_high: f64,
    pub duplicate_flag_threshold: f64,
    pub complaint_flag_threshold: f64,
    pub complaint_flag_high: f64,

    /// Minimum positive items before generic praise is even considered.
    pub generic_praise_min_positive: usize,
    pub generic_praise_min_ratio: f64,
    /// Type-token ratio below which praise looks templated (medium severity
    /// below `generic_praise_medium_diversity`).
    pub generic_praise_low_diversity: f64,
    pub generic_praise_medium_diversity: f64,

    pub high_confidence_min_items: usize,
    /// Deep mode expects a larger corpus before granting high confidence.
    pub deep_high_confidence_min_items: usize,
    pub low_confidence_max_items: usize,
    pub high_confidence_min_sources: usize,
    pub high_confidence_recency: f64,
    pub low_confidence_recency: f64,

    /// Hard cap on items accepted per analysis; the rest are dropped.
    pub max_items: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            complaint_baseline: 0.3,
            recency_window_days: 90,
            recency_weight: 1.5,
            spike_window_days: 7,
            spike_multiplier: 3.0,
            spike_min_count: 5,
            spike_flag_threshold: 0.4,
            spike_flag_high: 0.7,
            sponsored_flag_threshold: 0.25,
            sponsored_flag_high: 0.5,
            duplicate_flag_threshold: 0.2,
            complaint_flag_threshold: 0.3,
            complaint_flag_high: 0.6,
            generic_praise_min_positive: 5,
            generic_praise_min_ratio: 0.6,
            generic_praise_low_diversity: 0.35,
            generic_praise_medium_diversity: 0.2,
            high_confidence_min_items: 20,
            deep_high_confidence_min_items: 35,
            low_confidence_max_items: 5,
            high_confidence_min_sources: 2,
            high_confidence_recency: 0.5,
            low_confidence_recency: 0.1,
            max_items: 100,
        }
    }
}

/// Load and validate engine thresholds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: EngineConfig = serde_yaml::from_str(&content).map_err(ConfigError::FileParse)?;

    validate_engine_config(&config)?;

    Ok(config)
}

fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.max_items == 0 {
        return Err(ConfigError::Validation(
            "max_items must be at least 1".to_string(),
        ));
    }

    if config.recency_window_days < 1 || config.spike_window_days < 1 {
        return Err(ConfigError::Validation(
            "recency_window_days and spike_window_days must be at least 1".to_string(),
        ));
    }

    if config.recency_weight < 1.0 {
        return Err(ConfigError::Validation(format!(
            "recency_weight {} would down-weight recent items; must be >= 1.0",
            config.recency_weight
        )));
    }

    if config.spike_multiplier <= 1.0 {
        return Err(ConfigError::Validation(format!(
            "spike_multiplier {} must be greater than 1.0",
            config.spike_multiplier
        )));
    }

    let ratios = [
        ("complaint_baseline", config.complaint_baseline),
        ("spike_flag_threshold", config.spike_flag_threshold),
        ("spike_flag_high", config.spike_flag_high),
        ("sponsored_flag_threshold", config.sponsored_flag_threshold),
        ("sponsored_flag_high", config.sponsored_flag_high),
        ("duplicate_flag_threshold", config.duplicate_flag_threshold),
        ("complaint_flag_threshold", config.complaint_flag_threshold),
        ("complaint_flag_high", config.complaint_flag_high),
        ("generic_praise_min_ratio", config.generic_praise_min_ratio),
        (
            "generic_praise_low_diversity",
            config.generic_praise_low_diversity,
        ),
        (
            "generic_praise_medium_diversity",
            config.generic_praise_medium_diversity,
        ),
        ("high_confidence_recency", config.high_confidence_recency),
        ("low_confidence_recency", config.low_confidence_recency),
    ];
    for (name, value) in ratios {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "{name} {value} must be within [0, 1]"
            )));
        }
    }

    Ok(())
}
