//! Red Flag Detector: independent pattern rules over items and penalties.
//!
//! Rules run in a fixed order and each decides applicability, severity, and
//! wording on its own. Explanations come from a fixed per-flag template bank,
//! one causal sentence each, so identical inputs always produce identical
//! flag sets.

use truthcart_core::{EngineConfig, RedFlag, Sentiment, Severity, SignalItem};

use crate::penalty::Penalties;

const SPIKE_FLAG: &str = "Sudden sentiment spike";
const AFFILIATE_FLAG: &str = "Affiliate-heavy language";
const COPY_PASTE_FLAG: &str = "Copy-pasted reviews";
const GENERIC_PRAISE_FLAG: &str = "Generic praise";
const COMPLAINT_FLAG: &str = "Complaint cluster";

/// Why each flag matters to a shopper; keyed by flag name.
fn explanation_for(flag: &str) -> &'static str {
    match flag {
        SPIKE_FLAG => {
            "Bursts of reviews in a short window often come from coordinated campaigns rather than organic buyers."
        }
        AFFILIATE_FLAG => "Paid or gifted reviews often exaggerate product quality.",
        COPY_PASTE_FLAG => {
            "Repeated identical reviews usually mean astroturfing, not independent opinions."
        }
        GENERIC_PRAISE_FLAG => {
            "Vague praise with no specifics is a common sign of bulk-produced reviews."
        }
        _ => "A high share of negative reports suggests real owners are running into problems.",
    }
}

/// Evaluate every rule against the normalized items and computed penalties.
///
/// With zero items no rule fires; an empty list is valid output.
#[must_use]
pub fn detect_flags(
    items: &[SignalItem],
    penalties: &Penalties,
    duplicate_ratio: f64,
    config: &EngineConfig,
) -> Vec<RedFlag> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut flags = Vec::new();

    if penalties.timing_anomaly > config.spike_flag_threshold {
        let severity = if penalties.timing_anomaly > config.spike_flag_high {
            Severity::High
        } else {
            Severity::Medium
        };
        flags.push(make_flag(
            SPIKE_FLAG,
            severity,
            format!(
                "{} of review windows show abnormal bursts",
                percent(penalties.timing_anomaly)
            ),
        ));
    }

    if penalties.sponsored_ratio > config.sponsored_flag_threshold {
        let severity = if penalties.sponsored_ratio > config.sponsored_flag_high {
            Severity::High
        } else {
            Severity::Medium
        };
        let sponsored = items.iter().filter(|i| i.contains_sponsored_language).count();
        flags.push(make_flag(
            AFFILIATE_FLAG,
            severity,
            format!(
                "{sponsored} of {} items contain sponsored or affiliate language",
                items.len()
            ),
        ));
    }

    if duplicate_ratio > config.duplicate_flag_threshold {
        let severity = if duplicate_ratio > config.duplicate_flag_threshold * 2.0 {
            Severity::High
        } else {
            Severity::Medium
        };
        flags.push(make_flag(
            COPY_PASTE_FLAG,
            severity,
            format!("{} of collected posts were near-duplicates", percent(duplicate_ratio)),
        ));
    }

    if let Some(flag) = generic_praise(items, config) {
        flags.push(flag);
    }

    if penalties.complaints > config.complaint_flag_threshold {
        let severity = if penalties.complaints > config.complaint_flag_high {
            Severity::High
        } else {
            Severity::Medium
        };
        let negative = items
            .iter()
            .filter(|i| i.sentiment == Sentiment::Negative)
            .count();
        flags.push(make_flag(
            COMPLAINT_FLAG,
            severity,
            format!("{negative} of {} items report a negative experience", items.len()),
        ));
    }

    flags
}

/// Fires when positive items dominate but reuse the same few words.
///
/// Diversity is the distinct-token ratio over all positive item text; low
/// diversity despite a high positive share reads as templated praise.
fn generic_praise(items: &[SignalItem], config: &EngineConfig) -> Option<RedFlag> {
    let positives: Vec<_> = items
        .iter()
        .filter(|i| i.sentiment == Sentiment::Positive)
        .collect();
    if positives.len() < config.generic_praise_min_positive {
        return None;
    }

    // Item counts are bounded by the normalizer cap.
    #[allow(clippy::cast_precision_loss)]
    let positive_ratio = positives.len() as f64 / items.len() as f64;
    if positive_ratio <= config.generic_praise_min_ratio {
        return None;
    }

    let diversity = token_diversity(&positives);
    if diversity >= config.generic_praise_low_diversity {
        return None;
    }

    let severity = if diversity < config.generic_praise_medium_diversity {
        Severity::Medium
    } else {
        Severity::Low
    };
    Some(make_flag(
        GENERIC_PRAISE_FLAG,
        severity,
        format!(
            "praise across {} items reuses the same few phrases",
            positives.len()
        ),
    ))
}

/// Distinct-token ratio across the given items' text; 1.0 when no tokens.
fn token_diversity(items: &[&SignalItem]) -> f64 {
    use std::collections::HashSet;

    let mut total = 0_usize;
    let mut unique = HashSet::new();
    for item in items {
        for word in item.text.split_whitespace() {
            let token = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            total += 1;
            unique.insert(token);
        }
    }

    if total == 0 {
        return 1.0;
    }
    // Token counts stay far below f64 precision limits.
    #[allow(clippy::cast_precision_loss)]
    {
        unique.len() as f64 / total as f64
    }
}

fn make_flag(flag: &str, severity: Severity, detail: String) -> RedFlag {
    RedFlag {
        flag: flag.to_string(),
        severity,
        detail,
        explanation: explanation_for(flag).to_string(),
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
