//! Signal source selection: HTTP-backed, file/static, or disabled.

use std::path::Path;

use crate::error::SourceError;
use crate::http::HttpSignalSource;
use crate::types::{SourceBatch, SourceQuery};

/// A fixed batch served for every query, for offline analysis and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSignalSource {
    batch: SourceBatch,
}

impl StaticSignalSource {
    #[must_use]
    pub fn new(batch: SourceBatch) -> Self {
        Self { batch }
    }

    /// Loads a batch from a JSON file (the [`SourceBatch`] shape).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FileIo`] if the file cannot be read or
    /// [`SourceError::Deserialize`] if it is not a valid batch.
    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SourceError::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let batch: SourceBatch =
            serde_json::from_str(&raw).map_err(|e| SourceError::Deserialize {
                context: path.display().to_string(),
                source: e,
            })?;
        Ok(Self { batch })
    }

    #[must_use]
    pub fn batch(&self) -> SourceBatch {
        self.batch.clone()
    }
}

/// The signal source a process was configured with.
///
/// Servers hold one of these in shared state; the CLI builds one per run.
/// `Disabled` keeps the analysis path alive with no endpoint configured:
/// callers map the error to an empty batch and the engine reports
/// insufficient data.
pub enum SignalSource {
    Http(HttpSignalSource),
    Static(StaticSignalSource),
    Disabled,
}

impl SignalSource {
    /// Fetches the raw signal batch for one product query.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Disabled`] when no source is configured, or
    /// the underlying HTTP error for [`SignalSource::Http`]. The static
    /// source never fails.
    pub async fn fetch(&self, query: &SourceQuery) -> Result<SourceBatch, SourceError> {
        match self {
            SignalSource::Http(http) => http.fetch(query).await,
            SignalSource::Static(fixed) => Ok(fixed.batch()),
            SignalSource::Disabled => Err(SourceError::Disabled),
        }
    }

    /// Whether a fetch can possibly return items.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SignalSource::Disabled)
    }
}
