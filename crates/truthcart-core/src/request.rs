use serde::{Deserialize, Serialize};

use crate::item::{AnalysisMode, ProductMetadata, RawSignalItem};

/// Input to one analysis run, after Signal Source resolution.
///
/// The transport layer builds this from the caller's request plus whatever
/// the Signal Source returned; the CLI reads it straight from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub product_name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    pub product_url: String,
    #[serde(default)]
    pub mode: AnalysisMode,
    #[serde(default)]
    pub metadata: Option<ProductMetadata>,
    #[serde(default)]
    pub items: Vec<RawSignalItem>,
}
