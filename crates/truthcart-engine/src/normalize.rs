//! Signal Normalizer: turns raw source output into validated items.
//!
//! Drops what cannot be repaired (no source, no text), derives what can
//! (sentiment, score, sponsored markers), enforces the text and score
//! invariants, and deduplicates near-identical posts so copy-paste campaigns
//! cannot inflate the counts downstream stages work from.

use chrono::NaiveDate;
use regex::Regex;
use truthcart_core::{
    EngineConfig, ExternalDataStatus, ProductMetadata, RawSignalItem, Sentiment, SignalItem,
};

use crate::lexicon::{has_sponsored_language, lexicon_score};

/// Maximum cleaned text length, in characters.
pub(crate) const MAX_TEXT_CHARS: usize = 140;

/// Scores further than this from zero commit to a sentiment sign.
pub(crate) const SENTIMENT_TOLERANCE: f64 = 0.15;

/// Everything later stages need from normalization.
#[derive(Debug, Clone)]
pub struct NormalizedInput {
    pub items: Vec<SignalItem>,
    pub metadata: ProductMetadata,
    /// Fraction of otherwise-valid items removed as duplicates.
    pub duplicate_ratio: f64,
    pub external_data_status: ExternalDataStatus,
}

/// Validate, repair, and deduplicate raw items; clean metadata.
///
/// Lists longer than `config.max_items` are cut to the first `max_items`
/// entries before validation.
#[must_use]
pub fn normalize(
    raw_items: &[RawSignalItem],
    metadata: Option<ProductMetadata>,
    config: &EngineConfig,
) -> NormalizedInput {
    let whitespace = Regex::new(r"\s+").expect("valid whitespace regex");

    if raw_items.len() > config.max_items {
        tracing::debug!(
            total = raw_items.len(),
            cap = config.max_items,
            "item list over cap, truncating"
        );
    }

    let mut valid = Vec::new();
    for raw in raw_items.iter().take(config.max_items) {
        match normalize_item(raw, &whitespace) {
            Some(item) => valid.push(item),
            None => tracing::debug!(url = ?raw.url, "dropping malformed item"),
        }
    }

    let valid_count = valid.len();
    let items = dedup_items(valid);
    let removed = valid_count - items.len();

    // Counts are capped at max_items, far below f64 precision limits.
    #[allow(clippy::cast_precision_loss)]
    let duplicate_ratio = if valid_count == 0 {
        0.0
    } else {
        removed as f64 / valid_count as f64
    };

    let external_data_status = if items.is_empty() {
        ExternalDataStatus::InsufficientData
    } else {
        ExternalDataStatus::Ok
    };

    NormalizedInput {
        items,
        metadata: normalize_metadata(metadata),
        duplicate_ratio,
        external_data_status,
    }
}

/// Validate one raw item, deriving missing fields. `None` means dropped.
fn normalize_item(raw: &RawSignalItem, whitespace: &Regex) -> Option<SignalItem> {
    let source = raw.source?;
    let text = clean_text(raw.text.as_deref()?, whitespace);
    if text.is_empty() {
        return None;
    }

    let given_score = raw.sentiment_score.filter(|s| s.is_finite());
    let (sentiment, score) = match (raw.sentiment, given_score) {
        (Some(sentiment), Some(score)) => (sentiment, score.clamp(-1.0, 1.0)),
        // Category without a score: use the category centroid.
        (Some(sentiment), None) => (sentiment, centroid(sentiment)),
        (None, Some(score)) => {
            let score = score.clamp(-1.0, 1.0);
            (classify(score), score)
        }
        // Neither given: fall back to the domain lexicon.
        (None, None) => {
            let score = lexicon_score(&text);
            (classify(score), score)
        }
    };
    let score = clamp_sign_consistency(sentiment, score);

    let contains_sponsored_language = raw
        .contains_sponsored_language
        .unwrap_or_else(|| has_sponsored_language(&text));

    let date = raw.date.as_deref().and_then(parse_date);

    Some(SignalItem {
        source,
        url: raw.url.clone(),
        text,
        date,
        sentiment,
        sentiment_score: score,
        contains_sponsored_language,
    })
}

/// Collapse whitespace runs, trim, and truncate to [`MAX_TEXT_CHARS`]
/// without splitting mid-word where a space exists to break on.
fn clean_text(raw: &str, whitespace: &Regex) -> String {
    let cleaned = whitespace.replace_all(raw.trim(), " ").into_owned();
    if cleaned.chars().count() <= MAX_TEXT_CHARS {
        return cleaned;
    }

    let hard_cut: String = cleaned.chars().take(MAX_TEXT_CHARS).collect();
    match hard_cut.rfind(' ') {
        Some(idx) if idx > 0 => hard_cut[..idx].trim_end().to_string(),
        _ => hard_cut,
    }
}

/// Category centroid used when only the category is known.
fn centroid(sentiment: Sentiment) -> f64 {
    match sentiment {
        Sentiment::Positive => 0.5,
        Sentiment::Mixed => 0.0,
        Sentiment::Negative => -0.5,
    }
}

/// Classify a score into a category using the sign tolerance.
fn classify(score: f64) -> Sentiment {
    if score > SENTIMENT_TOLERANCE {
        Sentiment::Positive
    } else if score < -SENTIMENT_TOLERANCE {
        Sentiment::Negative
    } else {
        Sentiment::Mixed
    }
}

/// Snap scores whose sign contradicts the category back to the tolerance
/// boundary. Mixed items carry no sign constraint.
fn clamp_sign_consistency(sentiment: Sentiment, score: f64) -> f64 {
    match sentiment {
        Sentiment::Negative => score.min(SENTIMENT_TOLERANCE),
        Sentiment::Positive => score.max(-SENTIMENT_TOLERANCE),
        Sentiment::Mixed => score,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(date = raw, error = %e, "unparseable item date, keeping item undated");
            None
        }
    }
}

/// Remove items whose canonical text key was already seen; first wins.
fn dedup_items(items: Vec<SignalItem>) -> Vec<SignalItem> {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(make_text_key(&item.text)))
        .collect()
}

/// Canonical dedup key for item text.
///
/// SHA-256 over the lower-cased text with every non-alphanumeric run
/// collapsed to a single space, so casing and punctuation differences
/// do not defeat duplicate detection. Hex-encoded.
#[must_use]
pub fn make_text_key(text: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut canonical = String::with_capacity(text.len());
    let mut last_was_gap = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            canonical.extend(c.to_lowercase());
            last_was_gap = false;
        } else if !last_was_gap {
            canonical.push(' ');
            last_was_gap = true;
        }
    }
    let canonical = canonical.trim_end();

    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

/// Clamp metadata into its documented ranges; out-of-domain values become
/// unknown rather than failing the analysis.
fn normalize_metadata(metadata: Option<ProductMetadata>) -> ProductMetadata {
    let Some(meta) = metadata else {
        return ProductMetadata::default();
    };
    ProductMetadata {
        avg_rating: meta
            .avg_rating
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(1.0, 5.0)),
        rating_count: meta.rating_count.filter(|c| *c >= 0),
    }
}
