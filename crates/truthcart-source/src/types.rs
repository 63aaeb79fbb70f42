use serde::{Deserialize, Serialize};
use truthcart_core::{AnalysisMode, ProductMetadata, RawSignalItem};

/// Product lookup sent to a signal source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceQuery {
    pub product_name: String,
    pub brand_name: Option<String>,
    pub product_url: String,
    /// Deep mode asks the aggregation endpoint for a wider sweep.
    pub mode: AnalysisMode,
}

/// Raw items and optional official metadata returned by a signal source.
///
/// Both fields default so a sparse endpoint response (`{}` or items only)
/// still deserializes; the normalizer handles everything from there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceBatch {
    pub items: Vec<RawSignalItem>,
    pub metadata: Option<ProductMetadata>,
}
