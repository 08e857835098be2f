//! TaskFlow command line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the SQLite store.
//! - Restore a task session and run exactly one command against it.
//!
//! # Invariants
//! - Logging setup failures are reported on stderr and never abort a command.
//! - Only config and database open failures produce a non-zero exit.

mod cli;

use chrono::{Datelike, Local};
use clap::Parser;
use cli::{AddArgs, Cli, Command, EditArgs};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskflow_core::db::open_db;
use taskflow_core::{
    category_breakdown, classify, completion_progress, days_with_tasks, init_logging,
    monthly_summary, partition_by_completion, tasks_due_on, time_by_category, today_tasks,
    weekly_summary, AchievementId, AppConfig, KeyValueStore, LogLevel, LogSettings, NewTask,
    SqliteKeyValueStore, SystemClock, Task, TaskId, TaskPatch, TaskSession, UuidIdSource, CATALOG,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_exit module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    start_logging(&config, cli.log_dir.as_deref(), cli.verbose);

    let db_path = match cli.database {
        Some(path) => path,
        None => config.db_path().map_err(|err| err.to_string())?,
    };
    let conn = open_db(&db_path)
        .map_err(|err| format!("failed to open database `{}`: {err}", db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        db_path.display()
    );

    let mut session = TaskSession::restore(
        SqliteKeyValueStore::new(&conn),
        config.session_options(),
        Box::new(SystemClock),
        Box::new(UuidIdSource),
    );

    match cli.command.unwrap_or(Command::List { pending: false }) {
        Command::Add(args) => add(&mut session, args),
        Command::List { pending } => {
            list(&session, pending);
            Ok(())
        }
        Command::Done { id } => {
            let id = resolve_id(&session, &id)?;
            let report = session.toggle_complete(&id);
            if let Some(task) = session.task(&id) {
                let state = if task.completed { "completed" } else { "reopened" };
                println!("{state}: {}", task.title);
            }
            announce(&report.unlocked);
            Ok(())
        }
        Command::Delete { id } => {
            let id = resolve_id(&session, &id)?;
            let title = session.task(&id).map(|task| task.title.clone());
            session.delete_task(&id);
            println!("deleted: {}", title.unwrap_or_else(|| id.to_string()));
            Ok(())
        }
        Command::Track { id, minutes } => {
            let id = resolve_id(&session, &id)?;
            let report = session.add_time_spent(&id, minutes);
            if let Some(task) = session.task(&id) {
                println!(
                    "{}: {} tracked in total",
                    task.title,
                    format_minutes(u64::from(task.time_spent_minutes()))
                );
            }
            announce(&report.unlocked);
            Ok(())
        }
        Command::Edit(args) => edit(&mut session, args),
        Command::Today => {
            let now = session.now();
            print_tasks(&today_tasks(session.tasks(), now), now);
            Ok(())
        }
        Command::Day { date } => {
            print_tasks(&tasks_due_on(session.tasks(), date), session.now());
            Ok(())
        }
        Command::Calendar { month } => {
            let now = session.now();
            let (year, month) = month.unwrap_or((now.year(), now.month()));
            let days = days_with_tasks(session.tasks(), Some((year, month)));
            if days.is_empty() {
                println!("no due tasks in {year}-{month:02}");
            }
            for day in days {
                let count = tasks_due_on(session.tasks(), day).len();
                println!("{day} {} {count}", day.weekday());
            }
            Ok(())
        }
        Command::Stats { json } => stats(&session, json),
        Command::Achievements => {
            achievements(&session);
            Ok(())
        }
    }
}

fn start_logging(config: &AppConfig, override_dir: Option<&Path>, verbose: bool) {
    let dir = match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => config.log_dir().map_err(|err| err.to_string()),
    };
    let result = dir.and_then(|dir| absolute(&dir)).and_then(|dir| {
        let settings = LogSettings {
            level: if verbose { LogLevel::Debug } else { config.log_level() },
            dir,
            echo_to_stderr: verbose,
        };
        init_logging(&settings).map_err(|err| err.to_string())
    });
    if let Err(err) = result {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("failed to resolve `{}`: {err}", path.display()))
}

/// Accepts a full id or an unambiguous prefix of one.
fn resolve_id<S: KeyValueStore>(session: &TaskSession<S>, raw: &str) -> Result<TaskId, String> {
    let raw = raw.trim();
    let exact = TaskId::new(raw);
    if session.task(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<&Task> = session
        .tasks()
        .iter()
        .filter(|task| !raw.is_empty() && task.id.as_str().starts_with(raw))
        .collect();
    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => Err(format!("no task with id `{raw}`")),
        _ => Err(format!("id prefix `{raw}` matches {} tasks", matches.len())),
    }
}

fn add<S: KeyValueStore>(session: &mut TaskSession<S>, args: AddArgs) -> Result<(), String> {
    let mut request = NewTask::new(args.title);
    if let Some(due) = args.due {
        request = request.due(due);
    }
    if let Some(category) = args.category {
        request = request.category(category);
    }
    if let Some(priority) = args.priority {
        request = request.priority(priority);
    }
    if let Some(notes) = args.notes {
        request = request.notes(notes);
    }

    let added = session.add_task(request).map_err(|err| err.to_string())?;
    println!("added {}", added.id);
    announce(&added.unlocked);
    Ok(())
}

fn edit<S: KeyValueStore>(session: &mut TaskSession<S>, args: EditArgs) -> Result<(), String> {
    let id = resolve_id(session, &args.id)?;
    let patch = TaskPatch {
        title: args.title,
        due_date: if args.clear_due {
            Some(None)
        } else {
            args.due.map(Some)
        },
        category: args.category,
        priority: args.priority,
        notes: if args.clear_notes {
            Some(None)
        } else {
            args.notes.map(Some)
        },
    };
    if patch.is_empty() {
        return Err("nothing to change; pass at least one field flag".to_string());
    }

    let report = session.edit_task(&id, &patch).map_err(|err| err.to_string())?;
    println!("updated {id}");
    announce(&report.unlocked);
    Ok(())
}

fn list<S: KeyValueStore>(session: &TaskSession<S>, pending_only: bool) {
    let now = session.now();
    let (pending, completed) = partition_by_completion(session.tasks());
    if pending.is_empty() && (pending_only || completed.is_empty()) {
        println!("no tasks");
        return;
    }
    print_tasks(&pending, now);
    if !pending_only && !completed.is_empty() {
        println!();
        println!("completed:");
        print_tasks(&completed, now);
    }
}

fn print_tasks(tasks: &[&Task], now: chrono::DateTime<Local>) {
    for task in tasks {
        let status = classify(task, now);
        let marker = if status.is_warning() { "!" } else { " " };
        let due = task
            .due_date
            .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{marker} {:<8} {:<10} {:<16} {:<9} {:<6} {}",
            short_id(&task.id),
            status.label(),
            due,
            task.category,
            task.priority,
            task.title
        );
    }
}

fn short_id(id: &TaskId) -> &str {
    let raw = id.as_str();
    raw.get(..8).unwrap_or(raw)
}

fn stats<S: KeyValueStore>(session: &TaskSession<S>, json: bool) -> Result<(), String> {
    let now = session.now();
    let tasks = session.tasks();
    let week = weekly_summary(tasks, now);
    let month = monthly_summary(tasks, now);
    let categories = category_breakdown(tasks);
    let time = time_by_category(tasks);
    let progress = completion_progress(tasks);

    if json {
        let value = serde_json::json!({
            "progress": progress,
            "week": week,
            "month": month,
            "categories": categories,
            "timeByCategory": time,
        });
        let rendered = serde_json::to_string_pretty(&value).map_err(|err| err.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "progress: {}/{} ({}%)",
        progress.completed, progress.total, progress.percent
    );
    println!("this week:");
    for day in &week {
        println!(
            "  {} {} done {:>2}  open {:>2}",
            day.date, day.weekday, day.split.completed, day.split.pending
        );
    }
    println!(
        "this month: done {} open {}",
        month.completed, month.pending
    );
    println!("by category:");
    for entry in &categories {
        println!("  {:<10} {}", entry.category, entry.count);
    }
    if !time.is_empty() {
        println!("time tracked:");
        for entry in &time {
            println!("  {:<10} {}", entry.category, format_minutes(entry.minutes));
        }
    }
    Ok(())
}

fn achievements<S: KeyValueStore>(session: &TaskSession<S>) {
    for definition in CATALOG.iter() {
        let mark = if session.unlocked().contains(definition.id) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("{mark} {:<16} {}", definition.name, definition.description);
    }
}

fn announce(unlocked: &[AchievementId]) {
    for id in unlocked {
        let definition = id.definition();
        println!("achievement unlocked: {} ({})", definition.name, definition.description);
    }
}

fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, rest) => format!("{rest}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_minutes;

    #[test]
    fn minutes_render_as_hours_and_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(135), "2h 15m");
    }
}
