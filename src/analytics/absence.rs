//! Absence counting and the class absence roster.

use std::collections::HashMap;

use super::types::{AbsenceEntry, StudentAbsences};
use crate::records::GradeRecord;

/// Number of missed assessments in the given records.
pub fn absence_count(records: &[GradeRecord]) -> usize {
    records.iter().filter(|record| record.score.is_absence()).count()
}

/// One student's absences grouped by subject, in encounter order.
pub fn absences_by_subject(records: &[GradeRecord]) -> Vec<(String, Vec<AbsenceEntry>)> {
    let mut groups: Vec<(String, Vec<AbsenceEntry>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|record| record.score.is_absence()) {
        let at = *positions.entry(record.subject.clone()).or_insert_with(|| {
            groups.push((record.subject.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[at].1.push(AbsenceEntry {
            topic: record.topic.clone(),
            date: record.date.clone(),
        });
    }

    groups
}

/// Class-wide roster of absences, sorted by total descending. Equal totals
/// keep their encounter order.
pub fn absence_roster(all_records: &[GradeRecord]) -> Vec<StudentAbsences> {
    let mut roster: Vec<StudentAbsences> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in all_records.iter().filter(|record| record.score.is_absence()) {
        let at = *positions.entry(record.student_id.clone()).or_insert_with(|| {
            roster.push(StudentAbsences {
                student_id: record.student_id.clone(),
                student_name: record
                    .student_name
                    .clone()
                    .unwrap_or_else(|| format!("User {}", record.student_id)),
                total_absences: 0,
                by_subject: Vec::new(),
            });
            roster.len() - 1
        });

        let student = &mut roster[at];
        student.total_absences += 1;

        let entry = AbsenceEntry {
            topic: record.topic.clone(),
            date: record.date.clone(),
        };
        match student
            .by_subject
            .iter_mut()
            .find(|(subject, _)| subject == &record.subject)
        {
            Some((_, entries)) => entries.push(entry),
            None => student.by_subject.push((record.subject.clone(), vec![entry])),
        }
    }

    roster.sort_by(|a, b| b.total_absences.cmp(&a.total_absences));
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Score;

    fn absence(student_id: &str, subject: &str, topic: &str) -> GradeRecord {
        GradeRecord {
            student_id: student_id.to_string(),
            student_name: None,
            subject: subject.to_string(),
            topic: topic.to_string(),
            date: "2025-09-05".to_string(),
            score: Score::Absence,
            subject_average: Some(70.0),
        }
    }

    fn numeric(student_id: &str, subject: &str) -> GradeRecord {
        GradeRecord {
            score: Score::Numeric(80.0),
            ..absence(student_id, subject, "N/A")
        }
    }

    #[test]
    fn test_absence_count_ignores_other_scores() {
        let records = vec![
            absence("1", "Мат", "Векторы"),
            numeric("1", "Мат"),
            absence("1", "Био", "Клетки"),
        ];
        assert_eq!(absence_count(&records), 2);
    }

    #[test]
    fn test_absences_grouped_by_subject_in_order() {
        let records = vec![
            absence("1", "Мат", "Векторы"),
            absence("1", "Био", "Клетки"),
            absence("1", "Мат", "Производные"),
        ];
        let groups = absences_by_subject(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Мат");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].topic, "Производные");
    }

    #[test]
    fn test_roster_sorted_by_total_descending_stable() {
        let records = vec![
            absence("A", "Мат", "1"),
            absence("B", "Мат", "1"),
            absence("B", "Био", "2"),
            absence("C", "Мат", "1"),
            numeric("D", "Мат"),
        ];
        let roster = absence_roster(&records);
        let ids: Vec<&str> = roster.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert_eq!(roster[0].total_absences, 2);
        assert_eq!(roster[0].by_subject.len(), 2);
    }

    #[test]
    fn test_roster_name_fallback() {
        let roster = absence_roster(&[absence("42", "Мат", "1")]);
        assert_eq!(roster[0].student_name, "User 42");
    }
}
