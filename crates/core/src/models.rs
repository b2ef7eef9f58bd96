use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// One question/answer pair.
///
/// Both fields are stored stripped of surrounding whitespace and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct Record {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Answer")]
    answer: String,
}

#[derive(Deserialize)]
struct RecordFields {
    #[serde(rename = "Question", default)]
    question: String,
    #[serde(rename = "Answer", default)]
    answer: String,
}

impl From<RecordFields> for Record {
    fn from(value: RecordFields) -> Self {
        Record::new(value.question, value.answer)
    }
}

impl Record {
    pub fn new(question: impl AsRef<str>, answer: impl AsRef<str>) -> Self {
        Self {
            question: question.as_ref().trim().to_string(),
            answer: answer.as_ref().trim().to_string(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// True when neither field is blank.
    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.answer.is_empty()
    }
}

/// Ordered, immutable list of records produced by one extraction.
///
/// Clones share storage; there is no way to mutate the records once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSequence {
    records: Arc<[Record]>,
}

impl RecordSequence {
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn incomplete_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.is_complete())
            .count()
    }
}

impl Default for RecordSequence {
    fn default() -> Self {
        Vec::<Record>::new().into()
    }
}

impl From<Vec<Record>> for RecordSequence {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl FromIterator<Record> for RecordSequence {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl Deref for RecordSequence {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordSequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Informational conditions noticed while pairing lines. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionDegraded {
    /// Input was the empty string; no records were produced.
    EmptyInput,
    /// Odd line count; the last record has an empty answer.
    UnpairedTrailingLine,
    /// Number of records with at least one blank field.
    BlankFields { records: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: RecordSequence,
    pub degraded: Vec<ExtractionDegraded>,
}

impl Extraction {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordSequence};

    #[test]
    fn record_fields_are_stripped() {
        let record = Record::new("  What is ownership?\t", "\u{a0}A set of rules. ");
        assert_eq!(record.question(), "What is ownership?");
        assert_eq!(record.answer(), "A set of rules.");
        assert!(record.is_complete());
    }

    #[test]
    fn blank_answer_is_incomplete() {
        let record = Record::new("Q1", "   ");
        assert_eq!(record.answer(), "");
        assert!(!record.is_complete());
    }

    #[test]
    fn record_serializes_with_column_names() -> Result<(), serde_json::Error> {
        let record = Record::new("Q1", "A1");
        let json = serde_json::to_string(&record)?;
        assert_eq!(json, r#"{"Question":"Q1","Answer":"A1"}"#);

        let parsed: Record = serde_json::from_str(r#"{"Question":" Q2 "}"#)?;
        assert_eq!(parsed, Record::new("Q2", ""));
        Ok(())
    }

    #[test]
    fn sequence_clones_share_records() {
        let sequence: RecordSequence = vec![Record::new("Q1", "A1"), Record::new("Q2", "")].into();
        let view = sequence.clone();

        assert_eq!(view.len(), 2);
        assert_eq!(view.as_slice(), sequence.as_slice());
        assert_eq!(sequence.incomplete_count(), 1);
        assert!(RecordSequence::default().is_empty());
    }
}
