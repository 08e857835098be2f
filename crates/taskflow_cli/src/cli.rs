//! Command line definitions.
//!
//! # Responsibility
//! - Declare global flags and subcommands with clap derive.
//! - Parse user-facing values (dates, categories, priorities) into core types.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskflow_core::{Category, Priority};

/// Personal task tracker with time tracking and achievements
#[derive(Parser, Debug)]
#[command(name = "taskflow", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Path to log directory (overrides config)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    Add(AddArgs),

    /// List tasks, pending first (default if no subcommand given)
    List {
        /// Only show pending tasks
        #[arg(long)]
        pending: bool,
    },

    /// Toggle completion of a task
    Done { id: String },

    /// Delete a task
    Delete { id: String },

    /// Add tracked minutes to a task
    Track { id: String, minutes: u32 },

    /// Edit task fields
    Edit(EditArgs),

    /// Tasks due today
    Today,

    /// Tasks due on a given day (YYYY-MM-DD)
    Day {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Days with due tasks in a month
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },

    /// Weekly, monthly and category statistics
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Achievement catalog and unlock state
    Achievements,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,

    /// Due date: YYYY-MM-DD or "YYYY-MM-DD HH:MM"
    #[arg(long, value_parser = parse_due)]
    pub due: Option<DateTime<Local>>,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    /// Due date: YYYY-MM-DD or "YYYY-MM-DD HH:MM"
    #[arg(long, value_parser = parse_due, conflicts_with = "clear_due")]
    pub due: Option<DateTime<Local>>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Remove the notes
    #[arg(long)]
    pub clear_notes: bool,
}

/// Date-only values mean the end of that day.
pub fn parse_due(value: &str) -> Result<DateTime<Local>, String> {
    let value = value.trim();
    let naive = match NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        Ok(naive) => naive,
        Err(_) => {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 0)
                .ok_or_else(|| "invalid end-of-day time".to_string())?;
            parse_date(value)?.and_time(end_of_day)
        }
    };
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("`{value}` does not exist in the local time zone"))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))
}

pub fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let first = format!("{}-01", value.trim());
    NaiveDate::parse_from_str(&first, "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| format!("expected YYYY-MM, got `{value}`"))
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|category| category.label()).collect();
        format!("unknown category `{value}` (expected one of: {})", known.join(", "))
    })
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority `{value}` (low, medium, high)"))
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_due, parse_month, Cli, Command};
    use chrono::{Datelike, Timelike};
    use clap::Parser;

    #[test]
    fn due_accepts_date_and_date_time() {
        let full = parse_due("2026-03-10 14:30").unwrap();
        assert_eq!((full.day(), full.hour(), full.minute()), (10, 14, 30));

        let date_only = parse_due("2026-03-10").unwrap();
        assert_eq!((date_only.hour(), date_only.minute()), (23, 59));

        assert!(parse_due("tomorrow").is_err());
    }

    #[test]
    fn month_and_date_reject_garbage() {
        assert_eq!(parse_month("2026-02").unwrap(), (2026, 2));
        assert!(parse_month("2026-13").is_err());
        assert!(parse_date("2026/03/10").is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskflow",
            "add",
            "Buy milk",
            "--category",
            "health",
            "--database",
            "/tmp/t.sqlite3",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.database.is_some());
        match cli.command {
            Some(Command::Add(args)) => {
                assert_eq!(args.title, "Buy milk");
                assert_eq!(args.category, Some(taskflow_core::Category::Health));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_rejects_due_and_clear_due_together() {
        let result = Cli::try_parse_from([
            "taskflow",
            "edit",
            "task-1",
            "--due",
            "2026-03-10",
            "--clear-due",
        ]);
        assert!(result.is_err());
    }
}
