//! Extractor for the block-organized grade sheet.
//!
//! The published sheet packs up to ten subjects into one CSV as
//! fixed-height blocks: a header row (subject name, then assessment dates
//! from the first score column on), a topic row aligned to the same
//! columns, and the student rows. [`SheetLayout`] holds the geometry so
//! the template can change without touching the extraction logic.

use chrono::{Datelike, Utc};
use tracing::warn;

use super::{normalize_date, parse_row};
use crate::records::{GradeRecord, Score};

/// Row and column geometry of the published grade sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// First row index of each subject block.
    pub block_starts: Vec<usize>,
    /// Rows per block, header and topic rows included.
    pub block_height: usize,
    /// First column holding scores; earlier columns are id, name, average.
    pub score_column_start: usize,
}

impl Default for SheetLayout {
    /// The canonical template: ten 18-row blocks, scores from column 3.
    fn default() -> Self {
        Self {
            block_starts: (0..10).map(|block| block * 18).collect(),
            block_height: 18,
            score_column_start: 3,
        }
    }
}

/// A unit of source data the lenient parse silently skipped.
///
/// Collected only through [`PivotParser::audit`]; the default parse
/// treats all of these as expected noise in a hand-maintained sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseWarning {
    /// The sheet has too few lines to contain even one block.
    SheetTooShort { lines: usize },
    /// A block whose header row carries no subject name.
    BlankSubject { row: usize },
    /// A student row with no id in its first column.
    MissingStudentId { row: usize },
    /// A score cell whose header column has no date label.
    MissingAssessmentDate { row: usize, column: usize },
    /// A score cell that is neither a number nor a known token.
    UnrecognizedScore { row: usize, column: usize, text: String },
}

/// Result of an auditing parse: the records the lenient parse would have
/// produced, plus everything it would have swallowed.
#[derive(Debug, Default)]
pub struct SheetAudit {
    pub records: Vec<GradeRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Parser for the block-organized pivot layout.
pub struct PivotParser {
    layout: SheetLayout,
    current_year: i32,
}

impl Default for PivotParser {
    fn default() -> Self {
        Self::new(SheetLayout::default())
    }
}

impl PivotParser {
    pub fn new(layout: SheetLayout) -> Self {
        Self {
            layout,
            current_year: Utc::now().year(),
        }
    }

    /// Overrides the year assumed for day-and-month date labels. Tests and
    /// replays of archived sheets set this instead of the wall clock.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Extracts every grade record from the sheet, silently skipping
    /// malformed rows and cells.
    pub fn parse(&self, csv_text: &str) -> Vec<GradeRecord> {
        self.audit(csv_text).records
    }

    /// Same extraction as [`parse`](Self::parse), but reports what was
    /// skipped instead of swallowing it.
    pub fn audit(&self, csv_text: &str) -> SheetAudit {
        let mut audit = SheetAudit::default();

        let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text).trim();
        let rows: Vec<&str> = text.lines().collect();
        if rows.len() < 3 {
            warn!(lines = rows.len(), "Grade sheet too short, nothing extracted");
            audit.warnings.push(ParseWarning::SheetTooShort { lines: rows.len() });
            return audit;
        }

        for &start in &self.layout.block_starts {
            if start >= rows.len() {
                continue;
            }
            self.extract_block(&rows, start, &mut audit);
        }

        audit
    }

    fn extract_block(&self, rows: &[&str], start: usize, audit: &mut SheetAudit) {
        let header = parse_row(rows[start]);
        let subject = header.first().map(String::as_str).unwrap_or("");
        if subject.is_empty() {
            audit.warnings.push(ParseWarning::BlankSubject { row: start });
            return;
        }

        let topics = rows
            .get(start + 1)
            .copied()
            .map(parse_row)
            .unwrap_or_default();

        let data_end = rows.len().min(start + self.layout.block_height);
        for row_index in (start + 2)..data_end {
            if rows[row_index].trim().is_empty() {
                continue;
            }
            let row = parse_row(rows[row_index]);

            let student_id = row.first().map(String::as_str).unwrap_or("");
            if student_id.is_empty() {
                audit.warnings.push(ParseWarning::MissingStudentId { row: row_index });
                continue;
            }
            let student_name = row.get(1).filter(|name| !name.is_empty()).cloned();
            let subject_average = row
                .get(2)
                .and_then(|avg| avg.replace(',', ".").parse::<f64>().ok());

            // Score cells are walked strictly right to left; record emission
            // order follows the scan.
            for column in (self.layout.score_column_start..row.len()).rev() {
                let cell = row[column].replace('"', "");
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }

                let date = header.get(column).map(String::as_str).unwrap_or("");
                if date.is_empty() {
                    audit.warnings.push(ParseWarning::MissingAssessmentDate {
                        row: row_index,
                        column,
                    });
                    continue;
                }

                let Some(score) = Score::classify(cell) else {
                    audit.warnings.push(ParseWarning::UnrecognizedScore {
                        row: row_index,
                        column,
                        text: cell.to_string(),
                    });
                    continue;
                };

                let topic = topics
                    .get(column)
                    .filter(|topic| !topic.is_empty())
                    .cloned()
                    .unwrap_or_else(|| "N/A".to_string());

                audit.records.push(GradeRecord {
                    student_id: student_id.to_string(),
                    student_name: student_name.clone(),
                    subject: subject.to_string(),
                    topic,
                    date: normalize_date(date, self.current_year),
                    score,
                    subject_average,
                });
            }
        }
    }
}
