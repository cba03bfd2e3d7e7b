//! Grade aggregation and analytics.
//!
//! Pure functions over parsed [`GradeRecord`](crate::records::GradeRecord)
//! collections: per-subject grouping, overall ratings, class ranking,
//! absence rosters, and score-trend classification. No I/O; every call is
//! independent given its input snapshot.

pub mod absence;
pub mod rating;
pub mod trend;
pub mod types;
pub mod utility;
