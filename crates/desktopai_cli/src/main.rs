//! Terminal front end for the DesktopAI shell.
//!
//! # Responsibility
//! - Drive the core view controller against the local task store.
//! - Print the calendar grid and dashboard panels as plain text.

mod render;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use desktopai_core::{
    init_logging, local_today, CalendarModel, DateKey, LocalBackend, RefreshOutcome, ShellConfig,
    TaskId, ViewController, YearMonth,
};
use log::info;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "desktopai")]
#[command(about = "Calendar, schedule and todo view over the local task store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid
    Calendar {
        /// Month to show (YYYY-MM); defaults to the selected date's month
        #[arg(long)]
        month: Option<String>,

        /// Selected date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        select: Option<String>,
    },
    /// Print the schedule and todo panels for one date
    Dashboard {
        /// Date to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Add an untimed task for today
    Add { text: String },
    /// Flip completion of a task
    Toggle { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
    /// Store a setting; VALUE must be JSON (e.g. '"radio"' or 'true')
    Set { key: String, value: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ShellConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        let Some(log_dir) = log_dir.to_str() else {
            bail!("log dir `{}` is not UTF-8", log_dir.display());
        };
        init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    match cli.command {
        Commands::Calendar { month, select } => {
            print!(
                "{}",
                calendar_text(&config, month.as_deref(), select.as_deref(), local_today())?
            );
        }
        Commands::Dashboard { date } => {
            let date = parse_date_or_today(date.as_deref())?;
            let mut controller = open_controller(&config)?;
            expect_applied(controller.select_date(date).await)?;
            print_dashboard(&controller);
        }
        Commands::Add { text } => {
            let mut controller = open_controller(&config)?;
            let Some(outcome) = controller.quick_add_task(&text).await? else {
                bail!("task text must not be empty");
            };
            expect_applied(outcome)?;
            print_dashboard(&controller);
        }
        Commands::Toggle { id } => {
            let mut controller = open_controller(&config)?;
            expect_applied(controller.toggle_task(id).await?)?;
            print_dashboard(&controller);
        }
        Commands::Delete { id } => {
            let mut controller = open_controller(&config)?;
            expect_applied(controller.delete_task(id).await?)?;
            print_dashboard(&controller);
        }
        Commands::Set { key, value } => {
            let value: serde_json::Value =
                serde_json::from_str(&value).context("setting value is not JSON")?;
            let mut controller = open_controller(&config)?;
            controller.update_setting(&key, value).await?;
            println!("Setting `{key}` saved.");
        }
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

/// Renders a month grid; the task store is never opened.
fn calendar_text(
    config: &ShellConfig,
    month: Option<&str>,
    select: Option<&str>,
    today: NaiveDate,
) -> Result<String> {
    let selected = match select {
        Some(value) => DateKey::parse_iso(value)?.date(),
        None => today,
    };
    let month = match month {
        Some(raw) => YearMonth::parse(raw)?,
        None => YearMonth::of(selected),
    };
    let calendar = CalendarModel::new(selected).with_week_start(config.week_start);
    let cells = calendar.grid_layout(month, today);
    Ok(render::render_calendar(month, calendar.week_start(), &cells))
}

fn open_controller(config: &ShellConfig) -> Result<ViewController<LocalBackend>> {
    let backend = LocalBackend::from_config(config)
        .with_context(|| format!("failed to open task store `{}`", config.db_path.display()))?;
    let calendar = CalendarModel::starting_today().with_week_start(config.week_start);
    Ok(ViewController::new(Arc::new(backend), calendar))
}

fn parse_date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(value) => Ok(DateKey::parse_iso(value)?.date()),
        None => Ok(local_today()),
    }
}

fn expect_applied(outcome: RefreshOutcome) -> Result<()> {
    match outcome {
        RefreshOutcome::Applied => Ok(()),
        RefreshOutcome::Stale => bail!("dashboard refresh was superseded"),
        RefreshOutcome::Failed => bail!("dashboard refresh failed"),
    }
}

fn print_dashboard(controller: &ViewController<LocalBackend>) {
    if let Some(dashboard) = controller.dashboard() {
        print!("{}", render::render_dashboard(dashboard));
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_text, open_controller};
    use chrono::NaiveDate;
    use desktopai_core::{ShellConfig, WeekStart};

    fn unreachable_store_config() -> ShellConfig {
        ShellConfig {
            db_path: std::env::temp_dir()
                .join("desktopai-missing-dir")
                .join("nested")
                .join("store.sqlite3"),
            week_start: WeekStart::Monday,
            ..ShellConfig::default()
        }
    }

    #[test]
    fn calendar_renders_without_opening_store() {
        let config = unreachable_store_config();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");

        let text = calendar_text(&config, Some("2026-11"), Some("2026-11-02"), today)
            .expect("calendar should not need the store");
        assert!(text.contains("November 2026"));
        assert!(text.lines().nth(1).is_some_and(|line| line.starts_with(" Mo ")));
        assert!(text.contains("  2* "));
        assert!(!config.db_path.exists());

        assert!(open_controller(&config).is_err());
    }

    #[test]
    fn calendar_rejects_malformed_arguments() {
        let config = unreachable_store_config();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");

        assert!(calendar_text(&config, Some("2026-13"), None, today).is_err());
        assert!(calendar_text(&config, None, Some("19.10.2026"), today).is_err());
    }
}
