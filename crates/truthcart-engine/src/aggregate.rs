//! Sentiment Aggregator: recency-weighted community sentiment.

use chrono::NaiveDate;
use truthcart_core::{EngineConfig, SignalItem};

/// Weighted mean of `sentiment_score` across items.
///
/// Items dated within the recency window of `today` weigh
/// `config.recency_weight` (default 1.5); everything else, including undated
/// items, weighs 1.0. `None` when there are no items.
#[must_use]
pub fn external_norm(
    items: &[SignalItem],
    today: NaiveDate,
    config: &EngineConfig,
) -> Option<f64> {
    if items.is_empty() {
        return None;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for item in items {
        let weight = if item.is_recent(today, config.recency_window_days) {
            config.recency_weight
        } else {
            1.0
        };
        weighted_sum += item.sentiment_score * weight;
        weight_total += weight;
    }

    Some(weighted_sum / weight_total)
}

/// Fraction of items dated within the recency window; 0.0 with no items.
#[must_use]
pub fn recency_fraction(items: &[SignalItem], today: NaiveDate, window_days: i64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let recent = items
        .iter()
        .filter(|item| item.is_recent(today, window_days))
        .count();
    // Item counts are bounded by the normalizer cap.
    #[allow(clippy::cast_precision_loss)]
    {
        recent as f64 / items.len() as f64
    }
}
