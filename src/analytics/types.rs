//! Aggregate types derived from grade records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::GradeRecord;

/// One student's records for a single subject, in emission order, with the
/// sheet's precomputed average for that subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectGroup {
    pub subject: String,
    pub average: Option<f64>,
    pub records: Vec<GradeRecord>,
}

/// One row of the class ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    pub student_id: String,
    pub rating: f64,
}

/// One row of the full leaderboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub student_id: String,
    pub student_name: String,
    pub overall_rating: f64,
    pub subject_averages: BTreeMap<String, f64>,
}

/// A single missed assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenceEntry {
    pub topic: String,
    pub date: String,
}

/// One student's absences grouped by subject, for the class roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAbsences {
    pub student_id: String,
    pub student_name: String,
    pub total_absences: usize,
    pub by_subject: Vec<(String, Vec<AbsenceEntry>)>,
}

/// Direction of a subject's numeric scores over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl Trend {
    /// Short guidance shown next to a subject's grade history.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Trend::Improving => "Results are clearly improving. Keep the momentum.",
            Trend::Declining => "Results are slipping. This subject needs more attention.",
            Trend::Stable => "Results are steady, with room to grow.",
            Trend::InsufficientData => "Not enough data yet to judge the dynamics.",
        }
    }
}

/// Per-subject drill-down for one student: score extremes, spread, trend,
/// and the topics worth another attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAnalytics {
    pub subject: String,
    pub average: Option<f64>,
    pub best: f64,
    pub worst: f64,
    pub spread: f64,
    pub trend: Trend,
    pub needs_work: Vec<GradeRecord>,
}
