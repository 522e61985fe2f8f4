//! Lexicon-based sentiment classification of comment text.
//!
//! Every text maps to exactly one [`SentimentLabel`]; this crate has no error
//! path. Scoring is per comment and never looks at the rest of the batch.

pub mod aggregate;
pub mod scorer;

pub use aggregate::{summarize, LabeledComment};
pub use scorer::{classify, label_for, polarity, NEUTRAL_THRESHOLD};
pub use ytc_core::{SentimentLabel, SentimentSummary};
