use std::collections::HashSet;

use anyhow::anyhow;
use gradefeed::analytics::types::Trend;
use gradefeed::analytics::{absence, rating, trend};
use gradefeed::parser::{PivotParser, parse_allowed_users, parse_homework};
use gradefeed::records::{AllowedUsers, GradeRecord, Score};
use gradefeed::snapshot::Snapshot;

const GRADE_SHEET: &str = include_str!("fixtures/grade_sheet.csv");
const HOMEWORK_FEED: &str = include_str!("fixtures/homework.csv");

fn parse_fixture() -> Vec<GradeRecord> {
    PivotParser::default().with_current_year(2025).parse(GRADE_SHEET)
}

#[test]
fn test_fixture_sheet_extraction() {
    let records = parse_fixture();
    assert_eq!(records.len(), 16);

    let subjects: HashSet<&str> = records.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects, HashSet::from(["Математика", "Физика"]));

    // Right-to-left scan: the newest assessment of a row comes out first.
    let first = records.first().unwrap();
    assert_eq!(first.student_id, "100001");
    assert_eq!(first.date, "2025-09-19");
    assert_eq!(first.score, Score::Numeric(88.0));
}

#[test]
fn test_fixture_parse_is_idempotent() {
    assert_eq!(parse_fixture(), parse_fixture());
}

#[test]
fn test_student_overview_numbers() {
    let records = parse_fixture();
    let mine: Vec<GradeRecord> = records
        .iter()
        .filter(|r| r.student_id == "100001")
        .cloned()
        .collect();

    let groups = rating::group_by_subject(&mine);
    assert_eq!(groups.len(), 2);

    // Math average 84.5, physics 90.5.
    let overall = rating::overall_rating(&groups);
    assert_eq!(rating::format_rating(overall), "87.50");

    assert_eq!(absence::absence_count(&mine), 1);
    let by_subject = absence::absences_by_subject(&mine);
    assert_eq!(by_subject.len(), 1);
    assert_eq!(by_subject[0].0, "Математика");
    assert_eq!(by_subject[0].1[0].topic, "Векторы");
    assert_eq!(by_subject[0].1[0].date, "2025-09-12");
}

#[test]
fn test_class_ranking_and_leaderboard() {
    let records = parse_fixture();
    let ranking = rating::class_ranking(&records);

    let ids: Vec<&str> = ranking.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(ids, vec!["100001", "100003", "100002"]);
    assert_eq!(rating::rank_of(&ranking, "100003"), Some((2, 3)));

    let board = rating::leaderboard(&records, &ranking);
    assert_eq!(board[0].student_name, "Анна Иванова");
    assert_eq!(board[0].subject_averages.len(), 2);
    assert_eq!(board[0].subject_averages["Физика"], 90.5);
}

#[test]
fn test_absence_roster_from_fixture() {
    let records = parse_fixture();
    let roster = absence::absence_roster(&records);

    // One absence each, encounter order preserved on the tie.
    let ids: Vec<&str> = roster.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["100001", "100002"]);
    assert_eq!(roster[1].by_subject[0].0, "Физика");
}

#[test]
fn test_subject_trend_from_fixture() {
    let records = parse_fixture();
    let vera: Vec<GradeRecord> = records
        .iter()
        .filter(|r| r.student_id == "100003")
        .cloned()
        .collect();

    let groups = rating::group_by_subject(&vera);
    let physics = groups.iter().find(|g| g.subject == "Физика").unwrap();
    let analytics = trend::subject_analytics(physics);

    // 60, 70, 90 by date: first half [60], second half [90].
    assert_eq!(analytics.trend, Trend::Improving);
    assert_eq!(analytics.best, 90.0);
    assert_eq!(analytics.worst, 60.0);
    assert_eq!(analytics.average, Some(75.5));
}

#[test]
fn test_homework_feed_fixture() {
    let homework = parse_homework(HOMEWORK_FEED);

    assert_eq!(homework.len(), 3);
    assert_eq!(homework[0].week, 1);
    assert_eq!(homework[0].task, "Задачи 1, 2 и 3");
    assert_eq!(homework[2].subject, "Математика");
    assert!(homework.iter().all(|hw| hw.subject != "Химия"));
}

#[test]
fn test_allowed_users_feed() {
    let users = parse_allowed_users("100001\n100003\n\n");
    assert_eq!(users.ids(), ["100001", "100003"]);
    assert!(users.contains("100003"));
    assert!(!users.contains("100002"));
}

#[test]
fn test_snapshot_fallback_assembly() {
    let snapshot = Snapshot::from_results(
        Err(anyhow!("feed request failed with status 502")),
        Ok(parse_homework(HOMEWORK_FEED)),
        Err(anyhow!("connection reset")),
    );

    assert!(snapshot.is_demo());
    assert!(!snapshot.grades.is_empty());
    assert_eq!(snapshot.homework.len(), 3);
    assert!(snapshot.allowed_users.is_empty());
    assert!(snapshot.grades_error.as_deref().unwrap().contains("502"));
    assert!(snapshot.allowed_users_error.is_some());

    // The fallback data flows through the same analytics as live data.
    let ranking = rating::class_ranking(&snapshot.grades);
    assert!(!ranking.is_empty());
}

#[test]
fn test_snapshot_all_ok_has_no_errors() {
    let snapshot = Snapshot::from_results(
        Ok(parse_fixture()),
        Ok(parse_homework(HOMEWORK_FEED)),
        Ok(AllowedUsers::new(vec!["100001".to_string()])),
    );

    assert!(!snapshot.is_demo());
    assert!(snapshot.homework_error.is_none());
    assert_eq!(snapshot.grades_for("100002").len(), 5);
}
