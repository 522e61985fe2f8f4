use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collected comment, normalized from the remote API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Display name of the comment author.
    pub author: String,
    /// Raw comment text as returned by the API (plain text format).
    pub text: String,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
}

/// Polarity class assigned to a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label counts for one analyzed snapshot.
///
/// The three counts always add up to the number of records analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub num_positive: usize,
    pub num_negative: usize,
    pub num_neutral: usize,
}

impl SentimentSummary {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.num_positive += 1,
            SentimentLabel::Negative => self.num_negative += 1,
            SentimentLabel::Neutral => self.num_neutral += 1,
        }
    }

    #[must_use]
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.num_positive,
            SentimentLabel::Negative => self.num_negative,
            SentimentLabel::Neutral => self.num_neutral,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.num_positive + self.num_negative + self.num_neutral
    }

    /// Percentage of records carrying `label`, `0.0` for an empty summary.
    #[must_use]
    pub fn share(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = self.count(label) as f64 * 100.0 / total as f64;
        pct
    }
}
