//! Penalty Calculator: the five independent risk sub-scores.
//!
//! Every penalty is computable with partial data; a missing input always
//! yields 0 for that penalty, never an error or a null. The five weights are
//! contract constants, not configuration.

use std::collections::HashSet;

use truthcart_core::{EngineConfig, ProductMetadata, Sentiment, SignalItem};

/// Fixed metric names and weights, in breakdown order.
///
/// Percentages sum to 100; the fractional weights mirror them exactly.
pub(crate) const METRICS: &[(&str, u8)] = &[
    ("External Sentiment Mismatch", 35),
    ("Sponsored/Affiliate Language Frequency", 20),
    ("Review Timing Anomalies", 20),
    ("External Complaints", 15),
    ("Reviewer Diversity", 10),
];

/// The five penalty sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalties {
    /// Gap between the official rating and community sentiment.
    pub sentiment_mismatch: f64,
    /// Share of items carrying sponsored/affiliate language.
    pub sponsored_ratio: f64,
    /// Share of time windows with an abnormal burst of items.
    pub timing_anomaly: f64,
    /// Negative-item ratio above the expected complaint baseline.
    pub complaints: f64,
    /// Duplicate and single-origin concentration of the item set.
    pub diversity: f64,
}

impl Penalties {
    /// Penalties in breakdown order, parallel to [`METRICS`].
    #[must_use]
    pub fn in_order(&self) -> [f64; 5] {
        [
            self.sentiment_mismatch,
            self.sponsored_ratio,
            self.timing_anomaly,
            self.complaints,
            self.diversity,
        ]
    }

    /// `0.35·p1 + 0.20·p2 + 0.20·p3 + 0.15·p4 + 0.10·p5`.
    #[must_use]
    pub fn weighted(&self) -> f64 {
        self.in_order()
            .iter()
            .zip(METRICS)
            .map(|(penalty, (_, weight_pct))| penalty * f64::from(*weight_pct) / 100.0)
            .sum()
    }

    /// The metric contributing most to the weighted penalty, with its
    /// contribution. Ties resolve to the earlier metric.
    #[must_use]
    pub fn top_contributor(&self) -> (&'static str, f64) {
        let mut top = (METRICS[0].0, 0.0);
        for (penalty, (name, weight_pct)) in self.in_order().iter().zip(METRICS) {
            let contribution = penalty * f64::from(*weight_pct) / 100.0;
            if contribution > top.1 {
                top = (name, contribution);
            }
        }
        top
    }
}

/// Compute all five penalties from the normalized inputs.
#[must_use]
pub fn compute_penalties(
    items: &[SignalItem],
    metadata: &ProductMetadata,
    external_norm: Option<f64>,
    duplicate_ratio: f64,
    config: &EngineConfig,
) -> Penalties {
    Penalties {
        sentiment_mismatch: sentiment_mismatch(metadata, external_norm),
        sponsored_ratio: sponsored_ratio(items),
        timing_anomaly: timing_anomaly(items, config),
        complaints: complaints(items, config.complaint_baseline),
        diversity: diversity(items, duplicate_ratio),
    }
}

/// p1: `|normalized_rating − external_norm| / 2`, the gap scaled by its
/// maximum possible value. 0 when either side is unknown.
fn sentiment_mismatch(metadata: &ProductMetadata, external_norm: Option<f64>) -> f64 {
    match (metadata.normalized_rating(), external_norm) {
        (Some(rating), Some(norm)) => ((rating - norm).abs() / 2.0).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// p2: fraction of items with `contains_sponsored_language`.
fn sponsored_ratio(items: &[SignalItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sponsored = items.iter().filter(|i| i.contains_sponsored_language).count();
    ratio(sponsored, items.len())
}

/// p3: fraction of fixed-width windows, spanning the observed date range,
/// holding an anomalous burst of items.
///
/// A window is anomalous when its count exceeds `mean × spike_multiplier`
/// and reaches `spike_min_count`. Empty windows inside the span count
/// toward the mean. 0 with fewer than 2 dated items.
fn timing_anomaly(items: &[SignalItem], config: &EngineConfig) -> f64 {
    let mut dates: Vec<_> = items.iter().filter_map(|i| i.date).collect();
    if dates.len() < 2 {
        return 0.0;
    }
    dates.sort_unstable();

    let earliest = dates[0];
    let latest = dates[dates.len() - 1];
    let span_days = (latest - earliest).num_days();
    let window_count = usize::try_from(span_days / config.spike_window_days).unwrap_or(0) + 1;

    let mut counts = vec![0_usize; window_count];
    for date in &dates {
        let idx = usize::try_from((*date - earliest).num_days() / config.spike_window_days)
            .unwrap_or(0);
        counts[idx] += 1;
    }

    // Dated-item and window counts are bounded by the normalizer cap.
    #[allow(clippy::cast_precision_loss)]
    let mean = dates.len() as f64 / window_count as f64;
    let anomalous = counts
        .iter()
        .filter(|&&count| {
            #[allow(clippy::cast_precision_loss)]
            let over_mean = count as f64 > mean * config.spike_multiplier;
            over_mean && count >= config.spike_min_count
        })
        .count();

    ratio(anomalous, window_count).clamp(0.0, 1.0)
}

/// p4: how far the negative-item ratio sits above the expected baseline,
/// scaled over the remaining headroom.
fn complaints(items: &[SignalItem], baseline: f64) -> f64 {
    if items.is_empty() || baseline >= 1.0 {
        return 0.0;
    }
    let negative = items
        .iter()
        .filter(|i| i.sentiment == Sentiment::Negative)
        .count();
    let negative_ratio = ratio(negative, items.len());
    ((negative_ratio - baseline) / (1.0 - baseline)).clamp(0.0, 1.0)
}

/// p5: the larger of the duplicate-text ratio and the concentration of
/// items onto few source+URL identities. Without URL data only the
/// duplicate ratio applies.
fn diversity(items: &[SignalItem], duplicate_ratio: f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let with_url: Vec<_> = items.iter().filter(|i| i.url.is_some()).collect();
    let concentration = if with_url.is_empty() {
        0.0
    } else {
        let unique: HashSet<_> = with_url
            .iter()
            .map(|i| (i.source, i.url.as_deref()))
            .collect();
        1.0 - ratio(unique.len(), with_url.len())
    };

    duplicate_ratio.max(concentration).clamp(0.0, 1.0)
}

// Counts are bounded by the normalizer cap, far below f64 precision limits.
#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}
