//! Readers for the two flat CSV feeds: homework and allowed users.

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::records::{AllowedUsers, Homework};

/// Parses the homework feed. The header row is discarded; a row is dropped
/// when its week is not an integer or any other field is blank after
/// trimming. Input order is kept.
pub fn parse_homework(csv_text: &str) -> Vec<Homework> {
    let text = strip_bom(csv_text);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut homework = Vec::new();
    for record in reader.records().flatten() {
        let Some(week) = record.get(0).and_then(|week| week.parse::<i32>().ok()) else {
            debug!(row = ?record.get(0), "Homework row with unparsable week dropped");
            continue;
        };
        let day = record.get(1).unwrap_or("");
        let subject = record.get(2).unwrap_or("");
        let task = record.get(3).unwrap_or("");
        if day.is_empty() || subject.is_empty() || task.is_empty() {
            continue;
        }

        homework.push(Homework {
            week,
            day: day.to_string(),
            subject: subject.to_string(),
            task: task.to_string(),
        });
    }

    homework
}

/// Parses the allowed-user feed: each row's first column is one id, blank
/// ids are dropped, order is kept.
pub fn parse_allowed_users(csv_text: &str) -> AllowedUsers {
    let text = strip_bom(csv_text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let ids = reader
        .records()
        .flatten()
        .filter_map(|record| record.get(0).map(str::to_string))
        .filter(|id| !id.is_empty())
        .collect();

    AllowedUsers::new(ids)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
