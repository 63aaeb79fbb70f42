//! Pipeline orchestration: one request in, one finished report out.

use chrono::NaiveDate;
use truthcart_core::{AnalysisReport, AnalysisRequest, EngineConfig};

use crate::aggregate::external_norm;
use crate::confidence::assess;
use crate::flags::detect_flags;
use crate::narrative::{assemble, FALLBACK_TEXT, LOADING_TEXT};
use crate::normalize::normalize;
use crate::penalty::compute_penalties;
use crate::score::{breakdown, trust_score};

/// Run the full analysis pipeline for one product.
///
/// 1. Normalize and deduplicate the raw items; clean metadata.
/// 2. Compute the recency-weighted external sentiment norm.
/// 3. Compute the five penalty sub-scores.
/// 4. Compose the trust score, status, and breakdown.
/// 5. Detect red flags.
/// 6. Assess confidence (mode-aware).
/// 7. Assemble the narrative fields.
///
/// Pure: the same request, date, and config always produce the same report.
/// Zero usable items produce a degraded-but-valid report rather than an
/// error.
#[must_use]
pub fn analyze(request: AnalysisRequest, today: NaiveDate, config: &EngineConfig) -> AnalysisReport {
    let AnalysisRequest {
        product_name,
        brand_name,
        product_url,
        mode,
        metadata,
        items: raw_items,
    } = request;

    // Step 1: Normalize.
    let normalized = normalize(&raw_items, metadata, config);
    tracing::debug!(
        product = %product_name,
        raw = raw_items.len(),
        kept = normalized.items.len(),
        duplicate_ratio = normalized.duplicate_ratio,
        "normalized signal items"
    );

    // Step 2: Aggregate sentiment.
    let norm = external_norm(&normalized.items, today, config);

    // Step 3 + 4: Penalties, then score.
    let penalties = compute_penalties(
        &normalized.items,
        &normalized.metadata,
        norm,
        normalized.duplicate_ratio,
        config,
    );
    let score = trust_score(penalties.weighted());
    let status = truthcart_core::Status::for_score(score);

    // Step 5: Red flags.
    let red_flags = detect_flags(&normalized.items, &penalties, normalized.duplicate_ratio, config);

    // Step 6: Confidence.
    let confidence = assess(&normalized.items, today, mode, config);

    // Step 7: Narrative.
    let narrative = assemble(&normalized.items, status, score, &penalties, &red_flags);

    tracing::info!(
        product = %product_name,
        trust_score = score,
        status = %status,
        flags = red_flags.len(),
        "analysis complete"
    );

    AnalysisReport {
        product_name,
        brand_name,
        product_url,
        external_data_status: normalized.external_data_status,
        items: normalized.items,
        external_norm: norm,
        trust_score: score,
        status,
        breakdown: breakdown(&penalties),
        red_flags,
        top_quotes: narrative.top_quotes,
        badge_text: narrative.badge_text,
        status_text: narrative.status_text,
        score_explanation: narrative.score_explanation,
        quote_snippets: narrative.quote_snippets,
        red_flag_bullets: narrative.red_flag_bullets,
        loading_text: LOADING_TEXT.to_string(),
        fallback_text: FALLBACK_TEXT.to_string(),
        verdict: narrative.verdict,
        dominant_complaint: narrative.dominant_complaint,
        key_insight: narrative.key_insight,
        confidence_level: confidence.level,
        confidence_explanation: confidence.explanation,
        grounding_urls: narrative.grounding_urls,
    }
}
