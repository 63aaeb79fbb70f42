//! Plain-text rendering of an analysis report for terminal output.

use truthcart_core::AnalysisReport;

/// Print the report as pretty JSON or as the text summary.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub(crate) fn print_report(report: &AnalysisReport, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}

/// The text summary: identity, score, breakdown, flags, quotes, verdict.
pub(crate) fn render_text(report: &AnalysisReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    match &report.brand_name {
        Some(brand) => {
            let _ = writeln!(out, "{} ({brand})", report.product_name);
        }
        None => {
            let _ = writeln!(out, "{}", report.product_name);
        }
    }
    let _ = writeln!(out, "{}", report.badge_text);
    let _ = writeln!(out, "Status: {}", report.status_text);
    let _ = writeln!(
        out,
        "Confidence: {} ({})",
        report.confidence_level, report.confidence_explanation
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.score_explanation);
    let _ = writeln!(out);

    let _ = writeln!(out, "Breakdown:");
    for row in &report.breakdown {
        let _ = writeln!(
            out,
            "  {:<40} {:>3}%  {:>5.2}",
            row.metric, row.weight_pct, row.penalty
        );
    }
    let _ = writeln!(out);

    if report.red_flag_bullets.is_empty() {
        let _ = writeln!(out, "Red flags: none");
    } else {
        let _ = writeln!(out, "Red flags:");
        for bullet in &report.red_flag_bullets {
            let _ = writeln!(out, "  {bullet}");
        }
    }
    let _ = writeln!(out);

    if report.quote_snippets.is_empty() {
        let _ = writeln!(out, "{}", report.fallback_text);
    } else {
        let _ = writeln!(out, "Top quotes:");
        for quote in &report.quote_snippets {
            let _ = writeln!(out, "  [{}] \"{}\"", quote.source.label(), quote.text);
        }
    }

    let themes: Vec<&str> = report
        .dominant_complaint
        .iter()
        .chain(report.key_insight.iter())
        .map(String::as_str)
        .collect();
    if !themes.is_empty() {
        let _ = writeln!(out);
        for line in themes {
            let _ = writeln!(out, "{line}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.verdict);
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use truthcart_core::{
        AnalysisMode, AnalysisRequest, EngineConfig, RawSignalItem, Sentiment, Source,
    };

    use super::*;

    fn raw_item(source: Source, text: &str, sentiment: Sentiment, score: f64) -> RawSignalItem {
        RawSignalItem {
            source: Some(source),
            url: None,
            text: Some(text.to_string()),
            date: None,
            sentiment: Some(sentiment),
            sentiment_score: Some(score),
            contains_sponsored_language: Some(false),
        }
    }

    fn report_for(items: Vec<RawSignalItem>) -> AnalysisReport {
        let request = AnalysisRequest {
            product_name: "Acme Kettle".to_string(),
            brand_name: Some("Acme".to_string()),
            product_url: "https://shop.example/kettle".to_string(),
            mode: AnalysisMode::Fast,
            metadata: None,
            items,
        };
        truthcart_engine::analyze(
            request,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn text_render_includes_the_headline_sections() {
        let text = render_text(&report_for(vec![
            raw_item(Source::Reddit, "boils in under a minute", Sentiment::Positive, 0.5),
            raw_item(Source::X, "lid latch broke in a week", Sentiment::Negative, -0.6),
        ]));

        assert!(text.starts_with("Acme Kettle (Acme)\n"));
        assert!(text.contains("Status: "));
        assert!(text.contains("Confidence: "));
        assert!(text.contains("Trust Score "));
        assert!(text.contains("Breakdown:"));
        assert!(text.contains("External Sentiment Mismatch"));
        assert!(text.contains("Reviewer Diversity"));
        assert!(text.contains("Verdict:"));
    }

    #[test]
    fn quotes_carry_their_source_labels() {
        let text = render_text(&report_for(vec![raw_item(
            Source::Youtube,
            "surprisingly quiet for the price",
            Sentiment::Positive,
            0.4,
        )]));
        assert!(text.contains("Top quotes:"));
        assert!(text.contains("[YouTube] \"surprisingly quiet for the price\""));
    }

    #[test]
    fn degraded_report_renders_the_fallback() {
        let text = render_text(&report_for(Vec::new()));
        assert!(text.contains("Red flags: none"));
        assert!(text.contains("Not enough community discussion to judge this product."));
        assert!(!text.contains("Top quotes:"));
    }
}
