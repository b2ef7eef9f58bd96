//! Positional line pairing of generated text.
//!
//! The input is split on `'\n'` with no filtering. Line `2i` becomes the question of record `i`
//! and line `2i + 1` its answer. Nothing checks that a line *looks* like a question: multi-line
//! answers, blank separator lines or reordered content shift every following pair. Callers that
//! need reliable pairing must get the upstream generator to emit exactly one line per field.

use crate::models::{Extraction, ExtractionDegraded, Record, RecordSequence};
use tracing::debug;

/// Pairs consecutive lines into records.
///
/// Never fails. The empty string yields no records; an odd line count yields a final record with
/// an empty answer; whitespace-only lines become empty fields rather than being skipped.
pub fn segment(text: &str) -> RecordSequence {
    if text.is_empty() {
        return RecordSequence::default();
    }

    let lines = text.split('\n').collect::<Vec<_>>();
    lines
        .chunks(2)
        .map(|pair| {
            let question = pair.first().copied().unwrap_or_default();
            let answer = pair.get(1).copied().unwrap_or_default();
            Record::new(question, answer)
        })
        .collect()
}

/// Same records as [`segment`], plus the informational conditions that applied.
pub fn segment_with_report(text: &str) -> Extraction {
    let records = segment(text);
    let mut degraded = Vec::new();

    if text.is_empty() {
        degraded.push(ExtractionDegraded::EmptyInput);
    } else if text.split('\n').count() % 2 == 1 {
        degraded.push(ExtractionDegraded::UnpairedTrailingLine);
    }

    let incomplete = records.incomplete_count();
    if incomplete > 0 {
        degraded.push(ExtractionDegraded::BlankFields {
            records: incomplete,
        });
    }

    if !degraded.is_empty() {
        debug!(
            record_count = records.len(),
            conditions = ?degraded,
            "extraction degraded"
        );
    }

    Extraction { records, degraded }
}
