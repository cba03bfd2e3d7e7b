//! CSV ingestion for the three published spreadsheet feeds.
//!
//! The grade sheet uses a human-authored pivot layout (fixed-height
//! subject blocks) and is decoded by [`PivotParser`]; the homework and
//! allowed-user feeds are plain flat CSV. Malformed rows and cells are
//! skipped, never fatal; only feed-level transport failures error.

mod date;
mod flat;
mod pivot;
mod row;

pub use date::normalize_date;
pub use flat::{parse_allowed_users, parse_homework};
pub use pivot::{ParseWarning, PivotParser, SheetAudit, SheetLayout};
pub use row::parse_row;
