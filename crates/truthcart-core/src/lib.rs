//! Shared domain types and configuration for TruthCart.
//!
//! The wire model (signal items, analysis reports) lives here so the engine,
//! signal sources, server, and CLI all agree on one serialized shape.

use thiserror::Error;

mod app_config;
mod config;
mod engine_config;
mod item;
mod report;
mod request;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine_config::{load_engine_config, EngineConfig};
pub use item::{AnalysisMode, ProductMetadata, RawSignalItem, Sentiment, SignalItem, Source};
pub use request::AnalysisRequest;
pub use report::{
    AnalysisReport, BreakdownMetric, ConfidenceAssessment, ConfidenceLevel, ExternalDataStatus,
    Quote, RedFlag, Severity, Status,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    FileParse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
