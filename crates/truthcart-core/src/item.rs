use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Community platform a signal item was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reddit,
    X,
    Youtube,
}

impl Source {
    /// Human-readable platform name for narrative text, e.g. `"YouTube"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Source::Reddit => "Reddit",
            Source::X => "X",
            Source::Youtube => "YouTube",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Reddit => write!(f, "reddit"),
            Source::X => write!(f, "x"),
            Source::Youtube => write!(f, "youtube"),
        }
    }
}

/// Categorical sentiment of one community post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
}

/// How aggressively the signal source was queried before analysis.
///
/// The engine itself only uses this for confidence context: deep mode
/// expects more items before granting high confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Fast,
    Deep,
}

/// A community post/comment as returned by a signal source, before
/// validation.
///
/// Every field is optional: sources return best-effort data and the
/// normalizer decides what can be repaired (missing sentiment, unparseable
/// date) and what disqualifies the item (missing `source` or `text`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSignalItem {
    pub source: Option<Source>,
    pub url: Option<String>,
    pub text: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`); anything unparseable becomes unknown.
    pub date: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub sentiment_score: Option<f64>,
    pub contains_sponsored_language: Option<bool>,
}

/// One validated community post with sentiment and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalItem {
    pub source: Source,
    pub url: Option<String>,
    /// Cleaned text, at most 140 characters, never empty.
    pub text: String,
    pub date: Option<NaiveDate>,
    pub sentiment: Sentiment,
    /// Score in [-1, 1], sign-consistent with `sentiment` within ±0.15.
    pub sentiment_score: f64,
    pub contains_sponsored_language: bool,
}

impl SignalItem {
    /// Returns `true` if the item is dated within `window_days` of `today`.
    ///
    /// Items without a date are never recent; future dates count as recent.
    #[must_use]
    pub fn is_recent(&self, today: NaiveDate, window_days: i64) -> bool {
        self.date
            .is_some_and(|d| (today - d).num_days() <= window_days)
    }
}

/// Official product rating metadata, when the caller has it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductMetadata {
    /// Average official rating on a 1–5 scale.
    pub avg_rating: Option<f64>,
    pub rating_count: Option<i64>,
}

impl ProductMetadata {
    /// Official rating mapped from [1, 5] onto the [-1, 1] sentiment scale.
    #[must_use]
    pub fn normalized_rating(&self) -> Option<f64> {
        self.avg_rating.map(|r| (r - 3.0) / 2.0)
    }
}
