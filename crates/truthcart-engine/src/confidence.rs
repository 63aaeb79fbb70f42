//! Confidence Assessor: how much the evidence supports the score.

use chrono::NaiveDate;
use truthcart_core::{
    AnalysisMode, ConfidenceAssessment, ConfidenceLevel, EngineConfig, SignalItem, Source,
};

use crate::aggregate::recency_fraction;

const NO_DATA_EXPLANATION: &str = "No community discussion was found to assess.";

/// Grade the analysis from item volume, source variety, and recency.
///
/// Deep mode raises the item bar for High confidence: a deep scan that still
/// came back thin deserves less trust than a fast scan of the same size.
#[must_use]
pub fn assess(
    items: &[SignalItem],
    today: NaiveDate,
    mode: AnalysisMode,
    config: &EngineConfig,
) -> ConfidenceAssessment {
    if items.is_empty() {
        return ConfidenceAssessment {
            level: ConfidenceLevel::Low,
            explanation: NO_DATA_EXPLANATION.to_string(),
        };
    }

    let n = items.len();
    let sources = distinct_sources(items);
    let recency = recency_fraction(items, today, config.recency_window_days);

    let high_bar = match mode {
        AnalysisMode::Fast => config.high_confidence_min_items,
        AnalysisMode::Deep => config.deep_high_confidence_min_items,
    };

    let level = if n >= high_bar
        && sources >= config.high_confidence_min_sources
        && recency >= config.high_confidence_recency
    {
        ConfidenceLevel::High
    } else if n < config.low_confidence_max_items
        || sources <= 1
        || recency < config.low_confidence_recency
    {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::Medium
    };

    let noun = if sources == 1 { "source" } else { "sources" };
    ConfidenceAssessment {
        level,
        explanation: format!(
            "Based on {n} discussions across {sources} {noun}, led by {}.",
            dominant_source(items).label()
        ),
    }
}

fn distinct_sources(items: &[SignalItem]) -> usize {
    use std::collections::HashSet;
    items.iter().map(|i| i.source).collect::<HashSet<_>>().len()
}

/// The source contributing the most items; ties break in reddit, x,
/// youtube order.
fn dominant_source(items: &[SignalItem]) -> Source {
    let mut best = (Source::Reddit, 0);
    for source in [Source::Reddit, Source::X, Source::Youtube] {
        let count = items.iter().filter(|i| i.source == source).count();
        if count > best.1 {
            best = (source, count);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: Source, date: Option<NaiveDate>) -> SignalItem {
        SignalItem {
            source,
            url: None,
            text: "text".to_string(),
            date,
            sentiment: truthcart_core::Sentiment::Mixed,
            sentiment_score: 0.0,
            contains_sponsored_language: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn recent() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 5, 15)
    }

    fn stale() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 15)
    }

    /// n recent reddit items plus n recent youtube items.
    fn balanced_corpus(per_source: usize) -> Vec<SignalItem> {
        let mut items = Vec::new();
        for _ in 0..per_source {
            items.push(item(Source::Reddit, recent()));
            items.push(item(Source::Youtube, recent()));
        }
        items
    }

    #[test]
    fn empty_items_are_low_with_fixed_sentence() {
        let out = assess(&[], today(), AnalysisMode::Fast, &EngineConfig::default());
        assert_eq!(out.level, ConfidenceLevel::Low);
        assert_eq!(out.explanation, "No community discussion was found to assess.");
    }

    #[test]
    fn large_varied_recent_corpus_is_high() {
        let out = assess(
            &balanced_corpus(10),
            today(),
            AnalysisMode::Fast,
            &EngineConfig::default(),
        );
        assert_eq!(out.level, ConfidenceLevel::High);
        assert!(out.explanation.contains("20 discussions"), "{}", out.explanation);
        assert!(out.explanation.contains("2 sources"), "{}", out.explanation);
    }

    #[test]
    fn deep_mode_raises_the_high_bar() {
        let corpus = balanced_corpus(10);
        let fast = assess(&corpus, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert_eq!(fast.level, ConfidenceLevel::High);

        let deep = assess(&corpus, today(), AnalysisMode::Deep, &EngineConfig::default());
        assert_eq!(deep.level, ConfidenceLevel::Medium);

        let deep_big = assess(
            &balanced_corpus(18),
            today(),
            AnalysisMode::Deep,
            &EngineConfig::default(),
        );
        assert_eq!(deep_big.level, ConfidenceLevel::High);
    }

    #[test]
    fn few_items_are_low() {
        let items = vec![
            item(Source::Reddit, recent()),
            item(Source::Youtube, recent()),
        ];
        let out = assess(&items, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert_eq!(out.level, ConfidenceLevel::Low);
    }

    #[test]
    fn single_source_is_low_regardless_of_volume() {
        let items: Vec<_> = (0..30).map(|_| item(Source::Reddit, recent())).collect();
        let out = assess(&items, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert_eq!(out.level, ConfidenceLevel::Low);
        assert!(out.explanation.contains("1 source,"), "{}", out.explanation);
    }

    #[test]
    fn stale_corpus_is_low() {
        let mut items: Vec<_> = (0..15).map(|_| item(Source::Reddit, stale())).collect();
        items.extend((0..15).map(|_| item(Source::X, stale())));
        let out = assess(&items, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert_eq!(out.level, ConfidenceLevel::Low);
    }

    #[test]
    fn middling_corpus_is_medium() {
        // 10 items, 2 sources, all recent: under the High item bar, over
        // every Low trigger.
        let out = assess(
            &balanced_corpus(5),
            today(),
            AnalysisMode::Fast,
            &EngineConfig::default(),
        );
        assert_eq!(out.level, ConfidenceLevel::Medium);
    }

    #[test]
    fn dominant_source_is_named() {
        let mut items = balanced_corpus(6);
        items.extend((0..5).map(|_| item(Source::Youtube, recent())));
        let out = assess(&items, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert!(out.explanation.contains("led by YouTube"), "{}", out.explanation);
    }

    #[test]
    fn dominant_source_ties_break_by_declaration_order() {
        let items = balanced_corpus(4);
        let out = assess(&items, today(), AnalysisMode::Fast, &EngineConfig::default());
        assert!(out.explanation.contains("led by Reddit"), "{}", out.explanation);
    }
}
