//! Score-trend classification and per-subject drill-down analytics.

use std::cmp::Ordering;

use super::types::{SubjectAnalytics, SubjectGroup, Trend};
use super::utility::{mean, stddev};
use crate::records::GradeRecord;

/// Point difference between half-means that moves a trend off stable.
const TREND_THRESHOLD: f64 = 5.0;

/// Highest numeric score still flagged as worth another attempt.
const NEEDS_WORK_MAX: f64 = 56.0;

/// Numeric-score records in ascending date order. Canonical dates order
/// chronologically; labels that never normalized sort among themselves.
pub fn numeric_history(records: &[GradeRecord]) -> Vec<GradeRecord> {
    let mut history: Vec<GradeRecord> = records
        .iter()
        .filter(|record| record.score.as_numeric().is_some())
        .cloned()
        .collect();
    history.sort_by(|a, b| a.date.cmp(&b.date));
    history
}

/// Compares the first and second half of a date-ordered score series.
///
/// Fewer than three points is not enough signal. With an odd count the
/// middle point belongs to neither half: the first half is the earliest
/// `floor(n/2)` points and the second the latest `floor(n/2)`.
pub fn classify_trend(scores: &[f64]) -> Trend {
    if scores.len() < 3 {
        return Trend::InsufficientData;
    }

    let first_mean = mean(&scores[..scores.len() / 2]);
    let second_mean = mean(&scores[scores.len().div_ceil(2)..]);

    if second_mean > first_mean + TREND_THRESHOLD {
        Trend::Improving
    } else if first_mean > second_mean + TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Numeric records at or below the retake threshold, worst first. Equal
/// scores keep their input order.
pub fn improvement_candidates(records: &[GradeRecord]) -> Vec<GradeRecord> {
    let mut candidates: Vec<GradeRecord> = records
        .iter()
        .filter(|record| {
            record
                .score
                .as_numeric()
                .is_some_and(|value| value <= NEEDS_WORK_MAX)
        })
        .cloned()
        .collect();

    candidates.sort_by(|a, b| {
        let left = a.score.as_numeric().unwrap_or(0.0);
        let right = b.score.as_numeric().unwrap_or(0.0);
        left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    });

    candidates
}

/// Full drill-down for one subject group: score extremes (floor 0 and
/// ceiling 100 stand in when there are no numeric scores), spread, trend,
/// and the topics worth another attempt.
pub fn subject_analytics(group: &SubjectGroup) -> SubjectAnalytics {
    let history = numeric_history(&group.records);
    let scores: Vec<f64> = history
        .iter()
        .filter_map(|record| record.score.as_numeric())
        .collect();

    SubjectAnalytics {
        subject: group.subject.clone(),
        average: group.average,
        best: scores.iter().copied().fold(0.0, f64::max),
        worst: scores.iter().copied().fold(100.0, f64::min),
        spread: stddev(&scores, mean(&scores)),
        trend: classify_trend(&scores),
        needs_work: improvement_candidates(&history),
    }
}
