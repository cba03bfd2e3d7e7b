//! Canonical data model produced by feed ingestion.

use serde::{Serialize, Serializer};

/// Outcome of a single assessment cell.
///
/// Mirrors the score vocabulary of the source spreadsheet: a plain number,
/// the credit token `зачет`, or the absence token `н`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Numeric(f64),
    Pass,
    Absence,
}

impl Score {
    /// Classifies a trimmed, quote-stripped score cell.
    ///
    /// Checked in order: the absence token, a finite number, then any text
    /// containing the credit token. Anything else is unrecognized and the
    /// cell is dropped by the caller.
    pub fn classify(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        if lowered == "н" {
            Some(Score::Absence)
        } else if let Ok(value) = text.parse::<f64>() {
            value.is_finite().then_some(Score::Numeric(value))
        } else if lowered.contains("зачет") {
            Some(Score::Pass)
        } else {
            None
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Score::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_absence(&self) -> bool {
        matches!(self, Score::Absence)
    }
}

impl Serialize for Score {
    /// Serializes with the feed's own vocabulary: a number, `"зачет"`, or `"н"`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Numeric(v) => serializer.serialize_f64(*v),
            Score::Pass => serializer.serialize_str("зачет"),
            Score::Absence => serializer.serialize_str("н"),
        }
    }
}

/// One assessment entry for one student, as extracted from the grade sheet.
///
/// `date` is the ISO `YYYY-MM-DD` form when the source label normalized,
/// otherwise the original trimmed label. `subject_average` is the sheet's
/// precomputed per-subject average, repeated on every record of that
/// `(student, subject)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    pub student_id: String,
    pub student_name: Option<String>,
    pub subject: String,
    pub topic: String,
    pub date: String,
    pub score: Score,
    pub subject_average: Option<f64>,
}

/// One homework assignment from the flat homework feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Homework {
    pub week: i32,
    pub day: String,
    pub subject: String,
    pub task: String,
}

/// Student ids granted access to class-wide views, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AllowedUsers {
    ids: Vec<String>,
}

impl AllowedUsers {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.ids.iter().any(|id| id == student_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
