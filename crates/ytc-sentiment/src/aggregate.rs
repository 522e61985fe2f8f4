//! Per-snapshot sentiment tallies.

use serde::Serialize;
use ytc_core::{CommentRecord, SentimentLabel, SentimentSummary};

use crate::scorer::{label_for, polarity};

/// A comment paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledComment {
    #[serde(flatten)]
    pub record: CommentRecord,
    pub label: SentimentLabel,
    pub polarity: f32,
}

/// Classifies every record and tallies the labels.
///
/// The labeled sequence has one entry per input record, in input order. An
/// empty snapshot yields an all-zero summary.
#[must_use]
pub fn summarize(records: &[CommentRecord]) -> (SentimentSummary, Vec<LabeledComment>) {
    let mut summary = SentimentSummary::default();
    let labeled: Vec<LabeledComment> = records
        .iter()
        .map(|record| {
            let score = polarity(&record.text);
            let label = label_for(score);
            summary.record(label);
            LabeledComment {
                record: record.clone(),
                label,
                polarity: score,
            }
        })
        .collect();

    tracing::debug!(
        records = records.len(),
        positive = summary.num_positive,
        negative = summary.num_negative,
        neutral = summary.num_neutral,
        "summarized sentiment"
    );

    (summary, labeled)
}
