//! Trust Score Compositor: weighted penalties into one score and status.

use truthcart_core::{BreakdownMetric, Status};

use crate::penalty::{Penalties, METRICS};

/// `round((1 − weighted_penalty) × 100)`, clamped to [0, 100].
#[must_use]
pub fn trust_score(weighted_penalty: f64) -> u8 {
    let score = ((1.0 - weighted_penalty) * 100.0).round().clamp(0.0, 100.0);
    // Rounded and clamped to [0, 100] above, so the cast is exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        score as u8
    }
}

/// Status tier for a weighted penalty's score.
#[must_use]
pub fn status_for(weighted_penalty: f64) -> Status {
    Status::for_score(trust_score(weighted_penalty))
}

/// Breakdown rows in fixed metric order with literal weights {35,20,20,15,10}.
#[must_use]
pub fn breakdown(penalties: &Penalties) -> Vec<BreakdownMetric> {
    penalties
        .in_order()
        .iter()
        .zip(METRICS)
        .map(|(penalty, (metric, weight_pct))| BreakdownMetric {
            metric: (*metric).to_string(),
            weight_pct: *weight_pct,
            penalty: *penalty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_penalty_scores_one_hundred() {
        assert_eq!(trust_score(0.0), 100);
    }

    #[test]
    fn full_penalty_scores_zero() {
        assert_eq!(trust_score(1.0), 0);
    }

    #[test]
    fn score_rounds_to_nearest_integer() {
        // 1 - 0.305 = 0.695 -> 69.5 -> 70
        assert_eq!(trust_score(0.305), 70);
        // 1 - 0.306 = 0.694 -> 69.4 -> 69
        assert_eq!(trust_score(0.306), 69);
    }

    #[test]
    fn out_of_range_penalty_clamps() {
        assert_eq!(trust_score(1.7), 0);
        assert_eq!(trust_score(-0.3), 100);
    }

    #[test]
    fn status_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(status_for(0.30), Status::Trusted); // score 70
        assert_eq!(status_for(0.31), Status::Mixed); // score 69
        assert_eq!(status_for(0.60), Status::Mixed); // score 40
        assert_eq!(status_for(0.61), Status::Suspicious); // score 39
    }

    #[test]
    fn breakdown_carries_fixed_order_and_weights() {
        let penalties = Penalties {
            sentiment_mismatch: 0.475,
            sponsored_ratio: 0.3,
            timing_anomaly: 0.0,
            complaints: 0.2,
            diversity: 0.1,
        };
        let rows = breakdown(&penalties);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].metric, "External Sentiment Mismatch");
        assert_eq!(rows[0].weight_pct, 35);
        assert_eq!(rows[0].penalty, 0.475);
        assert_eq!(rows[4].metric, "Reviewer Diversity");
        assert_eq!(rows[4].weight_pct, 10);
        let total: u8 = rows.iter().map(|r| r.weight_pct).sum();
        assert_eq!(total, 100);
    }
}
