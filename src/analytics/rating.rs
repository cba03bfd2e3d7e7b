//! Per-subject grouping, overall ratings, class ranking, and the full
//! leaderboard.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::types::{LeaderboardEntry, RankedStudent, SubjectGroup};
use super::utility::mean;
use crate::records::GradeRecord;

/// Groups one student's records by subject, keeping first-encounter
/// subject order. The group average is taken from the subject's first
/// record (the sheet repeats it on every record of the pair).
pub fn group_by_subject(records: &[GradeRecord]) -> Vec<SubjectGroup> {
    let mut groups: Vec<SubjectGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let at = *positions.entry(record.subject.clone()).or_insert_with(|| {
            groups.push(SubjectGroup {
                subject: record.subject.clone(),
                average: record.subject_average,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[at].records.push(record.clone());
    }

    groups
}

/// Mean of the per-subject averages; each subject contributes once no
/// matter how many records it has. 0.0 when nothing carries an average.
pub fn overall_rating(groups: &[SubjectGroup]) -> f64 {
    let averages: Vec<f64> = groups.iter().filter_map(|group| group.average).collect();
    mean(&averages)
}

/// Two-decimal display form of a rating. Ranking compares the underlying
/// number, never this string.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.2}")
}

/// Ranks every student appearing anywhere in the dataset by overall
/// rating, descending. Equal ratings keep their encounter order; rank is
/// the 1-based position in the result.
pub fn class_ranking(all_records: &[GradeRecord]) -> Vec<RankedStudent> {
    let mut order: Vec<String> = Vec::new();
    let mut subject_averages: HashMap<String, HashMap<String, f64>> = HashMap::new();

    for record in all_records {
        if !subject_averages.contains_key(&record.student_id) {
            order.push(record.student_id.clone());
        }
        let subjects = subject_averages.entry(record.student_id.clone()).or_default();
        if let Some(average) = record.subject_average {
            subjects.insert(record.subject.clone(), average);
        }
    }

    let mut ranking: Vec<RankedStudent> = order
        .into_iter()
        .map(|student_id| {
            let averages: Vec<f64> = subject_averages[&student_id].values().copied().collect();
            RankedStudent {
                rating: mean(&averages),
                student_id,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    ranking
}

/// 1-based rank of the given student, with the class size.
pub fn rank_of(ranking: &[RankedStudent], student_id: &str) -> Option<(usize, usize)> {
    ranking
        .iter()
        .position(|entry| entry.student_id == student_id)
        .map(|index| (index + 1, ranking.len()))
}

/// Full leaderboard rows in ranking order: display name (with an id-based
/// fallback) and the per-subject averages behind each rating.
pub fn leaderboard(
    all_records: &[GradeRecord],
    ranking: &[RankedStudent],
) -> Vec<LeaderboardEntry> {
    ranking
        .iter()
        .map(|ranked| {
            let student_records: Vec<&GradeRecord> = all_records
                .iter()
                .filter(|record| record.student_id == ranked.student_id)
                .collect();

            let student_name = student_records
                .first()
                .and_then(|record| record.student_name.clone())
                .unwrap_or_else(|| format!("User {}", ranked.student_id));

            let mut subject_averages = BTreeMap::new();
            for record in &student_records {
                if let Some(average) = record.subject_average {
                    subject_averages.insert(record.subject.clone(), average);
                }
            }

            LeaderboardEntry {
                student_id: ranked.student_id.clone(),
                student_name,
                overall_rating: ranked.rating,
                subject_averages,
            }
        })
        .collect()
}
