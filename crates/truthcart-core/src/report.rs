use serde::{Deserialize, Serialize};

use crate::item::{Sentiment, SignalItem, Source};

/// Overall verdict tier derived from the trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Trusted,
    Mixed,
    Suspicious,
}

impl Status {
    /// Tier for a final trust score: `>= 70` Trusted, `>= 40` Mixed,
    /// otherwise Suspicious.
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        if score >= 70 {
            Status::Trusted
        } else if score >= 40 {
            Status::Mixed
        } else {
            Status::Suspicious
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Trusted => write!(f, "Trusted"),
            Status::Mixed => write!(f, "Mixed"),
            Status::Suspicious => write!(f, "Suspicious"),
        }
    }
}

/// How much the report should be believed, given the evidence volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "High Confidence")]
    High,
    #[serde(rename = "Medium Confidence")]
    Medium,
    #[serde(rename = "Low Confidence")]
    Low,
}

impl ConfidenceLevel {
    /// The exact wire/display string, e.g. `"High Confidence"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High Confidence",
            ConfidenceLevel::Medium => "Medium Confidence",
            ConfidenceLevel::Low => "Low Confidence",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence tier plus the one-sentence reason it was assigned.
///
/// Flattened into `confidence_level`/`confidence_explanation` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    pub explanation: String,
}

/// Whether the community signal set was usable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalDataStatus {
    /// At least one item survived normalization.
    Ok,
    /// Zero usable items; the report is degraded but still valid.
    InsufficientData,
}

/// Severity of a red flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One detected problem pattern, e.g. a complaint cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Short stable name, e.g. `"Complaint cluster"`.
    pub flag: String,
    pub severity: Severity,
    /// The measurement that tripped the rule.
    pub detail: String,
    /// One causal sentence on why this pattern matters to a shopper.
    pub explanation: String,
}

/// One weighted penalty line in the score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownMetric {
    pub metric: String,
    /// Weight as a whole percentage; the five weights sum to 100.
    pub weight_pct: u8,
    /// Raw penalty in [0, 1] before weighting.
    pub penalty: f64,
}

/// A representative community quote surfaced verbatim in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub source: Source,
    pub sentiment: Sentiment,
    pub url: Option<String>,
}

/// The complete analysis report returned to callers.
///
/// Field declaration order is the serialized key order and is part of the
/// contract; uncomputable fields serialize as `null` or `[]`, never vanish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub product_name: String,
    pub brand_name: Option<String>,
    pub product_url: String,
    pub external_data_status: ExternalDataStatus,
    /// The normalized items the analysis actually ran on.
    pub items: Vec<SignalItem>,
    /// Recency-weighted mean sentiment, `null` with zero items.
    pub external_norm: Option<f64>,
    pub trust_score: u8,
    pub status: Status,
    pub breakdown: Vec<BreakdownMetric>,
    pub red_flags: Vec<RedFlag>,
    pub top_quotes: Vec<Quote>,
    pub badge_text: String,
    pub status_text: String,
    pub score_explanation: String,
    pub quote_snippets: Vec<Quote>,
    pub red_flag_bullets: Vec<String>,
    pub loading_text: String,
    pub fallback_text: String,
    /// Starts with `"Verdict:"`; plain-language, no internal formulas.
    pub verdict: String,
    pub dominant_complaint: Option<String>,
    pub key_insight: Option<String>,
    pub confidence_level: ConfidenceLevel,
    pub confidence_explanation: String,
    /// Deduplicated item URLs in first-seen order.
    pub grounding_urls: Vec<String>,
}
