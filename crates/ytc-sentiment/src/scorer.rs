//! General-purpose English lexicon scorer for comment text.

use std::panic;

use ytc_core::SentimentLabel;

/// Polarity magnitude below which a text is labeled neutral.
pub const NEUTRAL_THRESHOLD: f32 = 0.05;

/// Scale applied to a sentiment word that follows a negator. Flips the sign
/// and halves the strength: "not good" is mildly negative, not terrible.
const NEGATION_FACTOR: f32 = -0.5;

/// Word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("amazing", 0.6),
    ("awesome", 0.6),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("clear", 0.1),
    ("cool", 0.35),
    ("cute", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("funny", 0.25),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("hilarious", 0.5),
    ("incredible", 0.9),
    ("informative", 0.5),
    ("inspiring", 0.6),
    ("interesting", 0.5),
    ("legend", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("masterpiece", 0.9),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("recommend", 0.4),
    ("right", 0.3),
    ("super", 0.35),
    ("thank", 0.4),
    ("thanks", 0.4),
    ("useful", 0.4),
    ("well", 0.2),
    ("wholesome", 0.6),
    ("win", 0.4),
    ("wonderful", 1.0),
    ("wow", 0.1),
    // Negative signals
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("clickbait", -0.6),
    ("confusing", -0.3),
    ("cringe", -0.6),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dislike", -0.5),
    ("dumb", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("fake", -0.5),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("lame", -0.5),
    ("lie", -0.5),
    ("lies", -0.5),
    ("mess", -0.4),
    ("misleading", -0.6),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scam", -0.8),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("trash", -0.8),
    ("ugly", -0.7),
    ("useless", -0.5),
    ("waste", -0.6),
    ("worse", -0.6),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Words that flip the next sentiment word in the same clause.
const NEGATORS: &[&str] = &[
    "ain't", "aren't", "can't", "cannot", "cant", "couldn't", "didn't", "didnt",
    "doesn't", "doesnt", "don't", "dont", "hardly", "isn't", "isnt", "never", "no",
    "nobody", "none", "nor", "not", "nothing", "shouldn't", "wasn't", "wasnt",
    "weren't", "won't", "wont", "wouldn't",
];

/// Multipliers applied to the next sentiment word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("absolutely", 1.4),
    ("completely", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("really", 1.3),
    ("so", 1.2),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("too", 1.1),
    ("totally", 1.3),
    ("very", 1.3),
];

fn word_weight(word: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|&&(lex_word, _)| lex_word == word)
        .map(|&(_, weight)| weight)
}

fn intensity(word: &str) -> Option<f32> {
    INTENSIFIERS
        .iter()
        .find(|&&(w, _)| w == word)
        .map(|&(_, factor)| factor)
}

fn ends_clause(token: &str) -> bool {
    token.ends_with(['.', '!', '?', ',', ';'])
}

fn raw_polarity(text: &str) -> f32 {
    let mut total = 0.0_f32;
    let mut matched = 0_u16;
    let mut negated = false;
    let mut boost = 1.0_f32;

    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '\u{2019}')
            .trim_matches(['\'', '\u{2019}'])
            .replace('\u{2019}', "'")
            .to_lowercase();

        if !word.is_empty() {
            if NEGATORS.contains(&word.as_str()) {
                negated = true;
            } else if let Some(factor) = intensity(&word) {
                boost *= factor;
            } else if let Some(weight) = word_weight(&word) {
                let mut score = weight * boost;
                if negated {
                    score *= NEGATION_FACTOR;
                }
                total += score;
                matched = matched.saturating_add(1);
                negated = false;
                boost = 1.0;
            } else {
                boost = 1.0;
            }
        }

        if ends_clause(token) {
            negated = false;
            boost = 1.0;
        }
    }

    if matched == 0 {
        return 0.0;
    }
    (total / f32::from(matched)).clamp(-1.0, 1.0)
}

/// Polarity of `text` in `[-1.0, 1.0]`.
///
/// The mean weight of the sentiment words found, after negation and
/// intensifiers. Returns `0.0` for empty text, text without known words, and
/// text made only of emoji or punctuation. Never panics: a failure inside the
/// scorer yields `0.0`.
#[must_use]
pub fn polarity(text: &str) -> f32 {
    match panic::catch_unwind(|| raw_polarity(text)) {
        Ok(score) if score.is_finite() => score,
        Ok(_) => 0.0,
        Err(_) => {
            tracing::warn!(chars = text.chars().count(), "sentiment scorer panicked, treating as neutral");
            0.0
        }
    }
}

/// Maps a polarity score onto a label using [`NEUTRAL_THRESHOLD`].
#[must_use]
pub fn label_for(polarity: f32) -> SentimentLabel {
    if polarity >= NEUTRAL_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity <= -NEUTRAL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Classifies a single comment. Deterministic for identical text.
#[must_use]
pub fn classify(text: &str) -> SentimentLabel {
    label_for(polarity(text))
}
