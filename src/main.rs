//! CLI entry point for the gradefeed tool.
//!
//! Provides subcommands for fetching the published spreadsheet feeds and
//! printing per-student analytics, the class leaderboard, absence rosters,
//! homework, or the raw snapshot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gradefeed::analytics::{absence, rating, trend};
use gradefeed::records::Homework;
use gradefeed::snapshot::{FeedConfig, SheetsService, Snapshot, SnapshotSource};
use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradefeed")]
#[command(about = "Class gradebook analytics from published spreadsheet feeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one student's rating, rank, absences, and per-subject analytics
    Overview {
        /// Student id as it appears in the grade sheet
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// Show the full class leaderboard
    Ranking,
    /// Show the class absence roster
    Absences,
    /// Show the homework list
    Homework {
        /// Only show this week
        #[arg(short, long)]
        week: Option<i32>,
    },
    /// Fetch all feeds and dump the snapshot as JSON
    Snapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gradefeed.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradefeed.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = FeedConfig::from_env()?;
    let service = SheetsService::new(config);
    let snapshot = service.refresh().await;

    match cli.command {
        Commands::Overview { student_id } => print_overview(&snapshot, &student_id),
        Commands::Ranking => print_ranking(&snapshot),
        Commands::Absences => print_absences(&snapshot),
        Commands::Homework { week } => print_homework(&snapshot.homework, week),
        Commands::Snapshot => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }

    Ok(())
}

fn print_overview(snapshot: &Snapshot, student_id: &str) {
    let my_records = snapshot.grades_for(student_id);
    if my_records.is_empty() {
        warn!(student_id, "No grade records found for this student");
    }

    let groups = rating::group_by_subject(&my_records);
    let overall = rating::overall_rating(&groups);
    let ranking = rating::class_ranking(&snapshot.grades);

    if snapshot.is_demo() {
        println!("[demo data: the grade feed was unavailable]");
    }
    println!("Overall rating: {}", rating::format_rating(overall));
    if let Some((rank, total)) = rating::rank_of(&ranking, student_id) {
        println!("Class rank: {rank} of {total}");
    }
    println!("Absences: {}", absence::absence_count(&my_records));

    for group in &groups {
        let analytics = trend::subject_analytics(group);
        println!();
        println!("{}", analytics.subject);
        match analytics.average {
            Some(average) => println!("  average: {}", rating::format_rating(average)),
            None => println!("  average: N/A"),
        }
        println!("  best: {} / worst: {}", analytics.best, analytics.worst);
        println!("  {}", analytics.trend.recommendation());
        for item in &analytics.needs_work {
            if let Some(score) = item.score.as_numeric() {
                println!("  review {}: {score} on {}", item.topic, item.date);
            }
        }
    }
}

fn print_ranking(snapshot: &Snapshot) {
    let ranking = rating::class_ranking(&snapshot.grades);
    let board = rating::leaderboard(&snapshot.grades, &ranking);

    for (position, entry) in board.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) {}",
            position + 1,
            entry.student_name,
            entry.student_id,
            rating::format_rating(entry.overall_rating),
        );
    }
}

fn print_absences(snapshot: &Snapshot) {
    let roster = absence::absence_roster(&snapshot.grades);
    if roster.is_empty() {
        println!("No absences recorded.");
        return;
    }

    for student in &roster {
        println!(
            "{} ({}): {} missed",
            student.student_name, student.student_id, student.total_absences,
        );
        for (subject, entries) in &student.by_subject {
            for entry in entries {
                println!("  {subject}: {} on {}", entry.topic, entry.date);
            }
        }
    }
}

fn print_homework(homework: &[Homework], week: Option<i32>) {
    let rows: Vec<&Homework> = homework
        .iter()
        .filter(|hw| week.is_none_or(|w| hw.week == w))
        .collect();
    if rows.is_empty() {
        println!("No homework found.");
        return;
    }

    for hw in rows {
        println!("week {} / {} / {}: {}", hw.week, hw.day, hw.subject, hw.task);
    }
}
