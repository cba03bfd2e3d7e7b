//! Feed configuration, the sheets service, and immutable data snapshots.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::demo;
use crate::fetch::{BasicClient, CacheBust, HttpClient, fetch_text};
use crate::parser::{PivotParser, parse_allowed_users, parse_homework};
use crate::records::{AllowedUsers, GradeRecord, Homework};

/// Published CSV endpoints for the three feeds.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub grades_url: String,
    pub homework_url: String,
    pub allowed_users_url: String,
}

impl FeedConfig {
    /// Reads the feed URLs from `GRADES_FEED_URL`, `HOMEWORK_FEED_URL`,
    /// and `ALLOWED_USERS_FEED_URL`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            grades_url: env_url("GRADES_FEED_URL")?,
            homework_url: env_url("HOMEWORK_FEED_URL")?,
            allowed_users_url: env_url("ALLOWED_USERS_FEED_URL")?,
        })
    }
}

fn env_url(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

/// One immutable generation of all three feeds.
///
/// A refresh builds a complete new snapshot; nothing merges into a prior
/// one. Per-feed failures are recorded instead of failing the refresh: a
/// failed grade feed falls back to the bundled demo dataset, the flat
/// feeds fall back to empty collections.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub grades: Vec<GradeRecord>,
    pub homework: Vec<Homework>,
    pub allowed_users: AllowedUsers,
    pub grades_error: Option<String>,
    pub homework_error: Option<String>,
    pub allowed_users_error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Assembles a snapshot from the three fetch outcomes, applying the
    /// per-feed fallback policy.
    pub fn from_results(
        grades: Result<Vec<GradeRecord>>,
        homework: Result<Vec<Homework>>,
        allowed_users: Result<AllowedUsers>,
    ) -> Self {
        let (grades, grades_error) = match grades {
            Ok(records) => (records, None),
            Err(err) => {
                error!(error = %err, "Grade feed failed, falling back to demo dataset");
                (demo::demo_grades(), Some(format!("{err:#}")))
            }
        };

        let (homework, homework_error) = match homework {
            Ok(rows) => (rows, None),
            Err(err) => {
                error!(error = %err, "Homework feed failed");
                (Vec::new(), Some(format!("{err:#}")))
            }
        };

        let (allowed_users, allowed_users_error) = match allowed_users {
            Ok(users) => (users, None),
            Err(err) => {
                error!(error = %err, "Allowed-user feed failed");
                (AllowedUsers::default(), Some(format!("{err:#}")))
            }
        };

        Snapshot {
            grades,
            homework,
            allowed_users,
            grades_error,
            homework_error,
            allowed_users_error,
            fetched_at: Utc::now(),
        }
    }

    /// Records belonging to one student, in emission order.
    pub fn grades_for(&self, student_id: &str) -> Vec<GradeRecord> {
        self.grades
            .iter()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect()
    }

    /// True when the grade feed failed and demo data is standing in.
    pub fn is_demo(&self) -> bool {
        self.grades_error.is_some()
    }
}

/// Abstraction over a snapshot provider, for consumers that should not
/// care where the data comes from.
#[async_trait]
pub trait SnapshotSource {
    /// Produces a complete new snapshot generation.
    async fn refresh(&self) -> Snapshot;
}

/// Fetches and parses the three published feeds.
pub struct SheetsService<C> {
    client: CacheBust<C>,
    config: FeedConfig,
    parser: PivotParser,
}

impl SheetsService<BasicClient> {
    pub fn new(config: FeedConfig) -> Self {
        Self::with_client(BasicClient::new(), config)
    }
}

impl<C: HttpClient> SheetsService<C> {
    pub fn with_client(client: C, config: FeedConfig) -> Self {
        Self {
            client: CacheBust::new(client),
            config,
            parser: PivotParser::default(),
        }
    }

    pub async fn fetch_grades(&self) -> Result<Vec<GradeRecord>> {
        let text = fetch_text(&self.client, &self.config.grades_url)
            .await
            .context("grade feed")?;
        Ok(self.parser.parse(&text))
    }

    pub async fn fetch_homework(&self) -> Result<Vec<Homework>> {
        let text = fetch_text(&self.client, &self.config.homework_url)
            .await
            .context("homework feed")?;
        Ok(parse_homework(&text))
    }

    pub async fn fetch_allowed_users(&self) -> Result<AllowedUsers> {
        let text = fetch_text(&self.client, &self.config.allowed_users_url)
            .await
            .context("allowed-user feed")?;
        Ok(parse_allowed_users(&text))
    }
}

#[async_trait]
impl<C: HttpClient> SnapshotSource for SheetsService<C> {
    /// Issues the three feed fetches concurrently. Each outcome lands in
    /// its own snapshot field; one feed failing never blocks the others.
    async fn refresh(&self) -> Snapshot {
        let (grades, homework, allowed_users) = tokio::join!(
            self.fetch_grades(),
            self.fetch_homework(),
            self.fetch_allowed_users(),
        );

        let snapshot = Snapshot::from_results(grades, homework, allowed_users);
        info!(
            grades = snapshot.grades.len(),
            homework = snapshot.homework.len(),
            allowed_users = snapshot.allowed_users.len(),
            demo = snapshot.is_demo(),
            "Snapshot refreshed"
        );
        snapshot
    }
}
