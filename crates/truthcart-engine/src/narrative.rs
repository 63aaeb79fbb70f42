//! Narrative Assembler: numeric results into fixed human-readable copy.
//!
//! Strictly template-driven. Quotes are verbatim item text, themes come from
//! a frequency count, and every sentence is chosen from a fixed bank, so the
//! same analysis always renders the same words.

use std::collections::HashMap;

use truthcart_core::{Quote, RedFlag, Sentiment, Severity, SignalItem, Status};

use crate::penalty::Penalties;

/// Loading message callers show while an analysis is pending.
pub const LOADING_TEXT: &str = "Crunching the truth...";

/// Message callers show when the analysis came back degraded.
pub const FALLBACK_TEXT: &str = "Not enough community discussion to judge this product.";

/// Tokens too common to count as a theme.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "all", "any", "can", "had", "has",
    "have", "was", "were", "been", "being", "this", "that", "these", "those", "with", "from",
    "they", "their", "them", "then", "than", "there", "here", "when", "where", "which", "while",
    "will", "would", "could", "should", "may", "might", "must", "just", "really", "very", "too",
    "also", "even", "still", "much", "many", "more", "most", "less", "into", "over", "under",
    "after", "before", "again", "once", "only", "own", "same", "some", "such", "out", "about",
    "because", "how", "why", "what", "who", "its", "it's", "i'm", "ive", "i've", "dont", "don't",
    "didnt", "didn't", "doesnt", "doesn't", "cant", "can't", "wont", "won't", "got", "get",
    "one", "two", "product", "item", "thing", "bought", "buy", "like",
];

/// Everything the assembler renders.
#[derive(Debug, Clone)]
pub struct Narrative {
    pub top_quotes: Vec<Quote>,
    pub quote_snippets: Vec<Quote>,
    pub badge_text: String,
    pub status_text: String,
    pub score_explanation: String,
    pub verdict: String,
    pub dominant_complaint: Option<String>,
    pub key_insight: Option<String>,
    pub red_flag_bullets: Vec<String>,
    pub grounding_urls: Vec<String>,
}

/// Render the full narrative for one analysis.
#[must_use]
pub fn assemble(
    items: &[SignalItem],
    status: Status,
    trust_score: u8,
    penalties: &Penalties,
    flags: &[RedFlag],
) -> Narrative {
    let quotes = select_quotes(items);

    if items.is_empty() {
        return Narrative {
            top_quotes: Vec::new(),
            quote_snippets: Vec::new(),
            badge_text: "Not enough chatter to score this one.".to_string(),
            status_text: "Insufficient data".to_string(),
            score_explanation:
                "We could not find enough community discussion to calculate a meaningful score."
                    .to_string(),
            verdict: "Verdict: not enough community discussion to judge this product. Check back once more buyers weigh in."
                .to_string(),
            dominant_complaint: None,
            key_insight: None,
            red_flag_bullets: Vec::new(),
            grounding_urls: Vec::new(),
        };
    }

    Narrative {
        top_quotes: quotes.clone(),
        quote_snippets: quotes,
        badge_text: badge_text(status, trust_score),
        status_text: status_text(status).to_string(),
        score_explanation: score_explanation(trust_score, penalties),
        verdict: verdict(status).to_string(),
        dominant_complaint: Some(theme_line(items, Sentiment::Negative)),
        key_insight: Some(theme_line(items, Sentiment::Positive)),
        red_flag_bullets: flag_bullets(flags),
        grounding_urls: grounding_urls(items),
    }
}

/// Up to 3 quotes covering as many sentiment categories as possible before
/// repeating one; ties broken by recency, then original order.
fn select_quotes(items: &[SignalItem]) -> Vec<Quote> {
    let mut ranked: Vec<(usize, &SignalItem)> = items.iter().enumerate().collect();
    // Newest first, undated last, stable on original order.
    ranked.sort_by(|(ai, a), (bi, b)| match (b.date, a.date) {
        (Some(bd), Some(ad)) => bd.cmp(&ad).then(ai.cmp(bi)),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => ai.cmp(bi),
    });

    let mut selected: Vec<usize> = Vec::new();
    for sentiment in [Sentiment::Positive, Sentiment::Mixed, Sentiment::Negative] {
        if let Some((idx, _)) = ranked
            .iter()
            .find(|(idx, item)| item.sentiment == sentiment && !selected.contains(idx))
        {
            selected.push(*idx);
        }
    }
    for (idx, _) in &ranked {
        if selected.len() >= 3 {
            break;
        }
        if !selected.contains(idx) {
            selected.push(*idx);
        }
    }
    selected.truncate(3);

    selected
        .into_iter()
        .map(|idx| {
            let item = &items[idx];
            Quote {
                text: item.text.clone(),
                source: item.source,
                sentiment: item.sentiment,
                url: item.url.clone(),
            }
        })
        .collect()
}

/// One line naming the strongest theme among items of one sentiment.
fn theme_line(items: &[SignalItem], sentiment: Sentiment) -> String {
    let matching: Vec<&SignalItem> = items.iter().filter(|i| i.sentiment == sentiment).collect();

    if matching.is_empty() {
        return match sentiment {
            Sentiment::Negative => "No recurring complaints surfaced in the discussion.".to_string(),
            _ => "No standout positive theme surfaced in the discussion.".to_string(),
        };
    }

    if let Some(keyword) = dominant_keyword(&matching) {
        return match sentiment {
            Sentiment::Negative => format!("Complaints most often mention \"{keyword}\"."),
            _ => format!("Positive feedback most often highlights \"{keyword}\"."),
        };
    }

    // No repeated theme: the longest matching item speaks for the group.
    let longest = matching
        .iter()
        .max_by_key(|i| i.text.chars().count())
        .map(|i| i.text.clone())
        .unwrap_or_default();
    longest
}

/// Most frequent non-stopword token with at least 2 occurrences; ties break
/// toward the token seen earliest.
fn dominant_keyword(items: &[&SignalItem]) -> Option<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0_usize;
    for item in items {
        for word in item.text.split_whitespace() {
            let token = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.chars().count() < 3 || STOPWORDS.contains(&token.as_str()) {
                continue;
            }
            let entry = counts.entry(token).or_insert((0, position));
            entry.0 += 1;
            position += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= 2)
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(token, _)| token)
}

fn badge_text(status: Status, trust_score: u8) -> String {
    match status {
        Status::Trusted => format!("Community checks out at {trust_score}/100."),
        Status::Mixed => format!("A mixed bag at {trust_score}/100."),
        Status::Suspicious => format!("Serious doubts at {trust_score}/100."),
    }
}

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Trusted => "Looking trustworthy",
        Status::Mixed => "Proceed with caution",
        Status::Suspicious => "Buyer beware",
    }
}

fn score_explanation(trust_score: u8, penalties: &Penalties) -> String {
    let (metric, contribution) = penalties.top_contributor();
    if contribution <= 0.0 {
        return format!("Trust Score {trust_score}/100.\nNo meaningful deductions were found.");
    }
    format!(
        "Trust Score {trust_score}/100.\nThe largest deduction came from {}.",
        friendly_metric(metric)
    )
}

/// Buyer-facing phrasing for each breakdown metric.
fn friendly_metric(metric: &str) -> &'static str {
    match metric {
        "External Sentiment Mismatch" => "a gap between official ratings and community sentiment",
        "Sponsored/Affiliate Language Frequency" => "a high share of sponsored or affiliate posts",
        "Review Timing Anomalies" => "bursts of reviews packed into short windows",
        "External Complaints" => "an elevated rate of negative reports",
        _ => "reviews clustered around few distinct voices",
    }
}

fn verdict(status: Status) -> &'static str {
    match status {
        Status::Trusted => {
            "Verdict: community feedback backs this product. A solid pick if the price works for you."
        }
        Status::Mixed => {
            "Verdict: real buyers are split on this one. Read the quotes below before deciding."
        }
        Status::Suspicious => {
            "Verdict: too many warning signs to recommend right now. Consider a better-reviewed alternative."
        }
    }
}

/// One bullet per flag, marker mapped from severity.
fn flag_bullets(flags: &[RedFlag]) -> Vec<String> {
    flags
        .iter()
        .map(|flag| {
            let marker = match flag.severity {
                Severity::High => "🚩",
                Severity::Medium => "⚠️",
                Severity::Low => "ℹ️",
            };
            format!("{marker} {}: {}", flag.flag, flag.detail)
        })
        .collect()
}

/// Deduplicated item URLs in first-seen order.
fn grounding_urls(items: &[SignalItem]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter_map(|i| i.url.as_ref())
        .filter(|url| seen.insert((*url).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use truthcart_core::Source;

    use super::*;

    fn item(sentiment: Sentiment, text: &str) -> SignalItem {
        SignalItem {
            source: Source::Reddit,
            url: None,
            text: text.to_string(),
            date: None,
            sentiment,
            sentiment_score: 0.0,
            contains_sponsored_language: false,
        }
    }

    fn zero_penalties() -> Penalties {
        Penalties {
            sentiment_mismatch: 0.0,
            sponsored_ratio: 0.0,
            timing_anomaly: 0.0,
            complaints: 0.0,
            diversity: 0.0,
        }
    }

    // --- quote selection ---

    #[test]
    fn quotes_cover_sentiments_before_repeating() {
        let items = vec![
            item(Sentiment::Positive, "love it"),
            item(Sentiment::Positive, "still love it"),
            item(Sentiment::Negative, "hated it"),
            item(Sentiment::Mixed, "it is fine"),
        ];
        let quotes = select_quotes(&items);
        assert_eq!(quotes.len(), 3);
        let sentiments: Vec<_> = quotes.iter().map(|q| q.sentiment).collect();
        assert!(sentiments.contains(&Sentiment::Positive));
        assert!(sentiments.contains(&Sentiment::Mixed));
        assert!(sentiments.contains(&Sentiment::Negative));
    }

    #[test]
    fn quotes_prefer_recent_items_within_a_sentiment() {
        let mut old = item(Sentiment::Positive, "older praise");
        old.date = NaiveDate::from_ymd_opt(2025, 1, 1);
        let mut new = item(Sentiment::Positive, "newer praise");
        new.date = NaiveDate::from_ymd_opt(2026, 5, 1);
        let quotes = select_quotes(&[old, new]);
        assert_eq!(quotes[0].text, "newer praise");
    }

    #[test]
    fn quotes_fill_remaining_slots_when_one_sentiment_dominates() {
        let items = vec![
            item(Sentiment::Negative, "first complaint"),
            item(Sentiment::Negative, "second complaint"),
            item(Sentiment::Negative, "third complaint"),
            item(Sentiment::Negative, "fourth complaint"),
        ];
        let quotes = select_quotes(&items);
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].text, "first complaint");
    }

    #[test]
    fn fewer_items_than_slots_returns_them_all() {
        let quotes = select_quotes(&[item(Sentiment::Mixed, "only voice")]);
        assert_eq!(quotes.len(), 1);
    }

    // --- themes ---

    #[test]
    fn dominant_complaint_names_repeated_keyword() {
        let items = vec![
            item(Sentiment::Negative, "battery died within a week"),
            item(Sentiment::Negative, "the battery barely holds a charge"),
            item(Sentiment::Negative, "arrived scratched"),
        ];
        let line = theme_line(&items, Sentiment::Negative);
        assert_eq!(line, "Complaints most often mention \"battery\".");
    }

    #[test]
    fn theme_falls_back_to_longest_item_without_repeats() {
        let items = vec![
            item(Sentiment::Negative, "short gripe"),
            item(Sentiment::Negative, "a considerably longer complaint about delivery"),
        ];
        let line = theme_line(&items, Sentiment::Negative);
        assert_eq!(line, "a considerably longer complaint about delivery");
    }

    #[test]
    fn theme_uses_fixed_sentence_when_no_matching_items() {
        let items = vec![item(Sentiment::Positive, "all praise here")];
        let line = theme_line(&items, Sentiment::Negative);
        assert_eq!(line, "No recurring complaints surfaced in the discussion.");
    }

    #[test]
    fn stopwords_never_become_themes() {
        let items = vec![
            item(Sentiment::Positive, "really really good value"),
            item(Sentiment::Positive, "really solid value"),
        ];
        let line = theme_line(&items, Sentiment::Positive);
        assert_eq!(line, "Positive feedback most often highlights \"value\".");
    }

    // --- templates ---

    #[test]
    fn verdict_always_starts_with_the_verdict_prefix() {
        for status in [Status::Trusted, Status::Mixed, Status::Suspicious] {
            assert!(verdict(status).starts_with("Verdict:"));
        }
    }

    #[test]
    fn score_explanation_names_top_deduction() {
        let penalties = Penalties {
            sponsored_ratio: 0.8,
            ..zero_penalties()
        };
        let text = score_explanation(84, &penalties);
        assert!(text.starts_with("Trust Score 84/100.\n"), "{text}");
        assert!(text.contains("sponsored or affiliate"), "{text}");
    }

    #[test]
    fn score_explanation_handles_no_deductions() {
        let text = score_explanation(100, &zero_penalties());
        assert!(text.contains("No meaningful deductions"), "{text}");
    }

    // --- bullets, urls, degraded ---

    #[test]
    fn bullets_use_severity_markers() {
        let flags = vec![
            RedFlag {
                flag: "Complaint cluster".to_string(),
                severity: Severity::High,
                detail: "7 of 10 items report a negative experience".to_string(),
                explanation: "x.".to_string(),
            },
            RedFlag {
                flag: "Generic praise".to_string(),
                severity: Severity::Low,
                detail: "praise across 6 items reuses the same few phrases".to_string(),
                explanation: "x.".to_string(),
            },
        ];
        let bullets = flag_bullets(&flags);
        assert_eq!(
            bullets[0],
            "🚩 Complaint cluster: 7 of 10 items report a negative experience"
        );
        assert!(bullets[1].starts_with("ℹ️ Generic praise:"));
    }

    #[test]
    fn grounding_urls_dedup_in_first_seen_order() {
        let mut a = item(Sentiment::Mixed, "a");
        a.url = Some("https://reddit.com/1".to_string());
        let b = item(Sentiment::Mixed, "b");
        let mut c = item(Sentiment::Mixed, "c");
        c.url = Some("https://x.com/2".to_string());
        let mut d = item(Sentiment::Mixed, "d");
        d.url = Some("https://reddit.com/1".to_string());
        let narrative = assemble(&[a, b, c, d], Status::Mixed, 50, &zero_penalties(), &[]);
        assert_eq!(
            narrative.grounding_urls,
            vec!["https://reddit.com/1".to_string(), "https://x.com/2".to_string()]
        );
    }

    #[test]
    fn degraded_narrative_uses_no_data_templates() {
        let narrative = assemble(&[], Status::Trusted, 100, &zero_penalties(), &[]);
        assert!(narrative.top_quotes.is_empty());
        assert!(narrative.dominant_complaint.is_none());
        assert!(narrative.key_insight.is_none());
        assert_eq!(narrative.status_text, "Insufficient data");
        assert!(narrative.verdict.starts_with("Verdict: not enough community discussion"));
    }

    #[test]
    fn top_quotes_match_quote_snippets() {
        let items = vec![
            item(Sentiment::Positive, "good"),
            item(Sentiment::Negative, "bad"),
        ];
        let narrative = assemble(&items, Status::Mixed, 50, &zero_penalties(), &[]);
        assert_eq!(narrative.top_quotes, narrative.quote_snippets);
    }
}
