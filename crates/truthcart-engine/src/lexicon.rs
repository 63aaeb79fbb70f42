//! Product-review lexicon scorer and sponsored-language detector.
//!
//! Used by the normalizer to fill in classifications a signal source did not
//! provide. Both lists are fixed so repeated runs over the same items always
//! produce the same derived fields.

/// Product-review word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("quality", 0.3),
    ("durable", 0.4),
    ("sturdy", 0.4),
    ("reliable", 0.4),
    ("comfortable", 0.3),
    ("perfect", 0.5),
    ("solid", 0.3),
    ("happy", 0.3),
    ("impressed", 0.4),
    ("worth", 0.3),
    ("works", 0.3),
    // Negative signals
    ("broke", -0.6),
    ("broken", -0.6),
    ("refund", -0.5),
    ("return", -0.4),
    ("returned", -0.5),
    ("scam", -0.8),
    ("fake", -0.7),
    ("counterfeit", -0.8),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("bad", -0.4),
    ("awful", -0.6),
    ("cheap", -0.3),
    ("flimsy", -0.5),
    ("defective", -0.7),
    ("died", -0.5),
    ("useless", -0.6),
    ("waste", -0.5),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("misleading", -0.6),
    ("leaked", -0.5),
    ("cracked", -0.5),
    ("recall", -0.7),
    ("dangerous", -0.6),
    ("warranty", -0.3),
    ("complaint", -0.3),
    ("problem", -0.3),
    ("issue", -0.3),
];

/// Phrases that mark a post as paid or incentivized.
///
/// Matched case-insensitively as substrings of the cleaned text.
pub(crate) const SPONSORED_TERMS: &[&str] = &[
    "sponsored",
    "affiliate",
    "promo code",
    "free product",
    "gifted",
    "#ad",
    "discount code",
];

/// Score a text string using the product-review lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Whether the text contains any sponsored-language marker.
#[must_use]
pub fn has_sponsored_language(text: &str) -> bool {
    let lower = text.to_lowercase();
    SPONSORED_TERMS.iter().any(|term| lower.contains(term))
}
