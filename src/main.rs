mod calc;
mod cmd;
mod data;
mod tracker;
mod ui;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use data::{CalendarView, CounterMode, Language, MoodLevel};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

#[derive(Parser)]
#[command(name = "miaura", about = "one colour a day: a mood calendar")]
struct Cli {
    /// Directory holding storage.json and the optional templates.yaml (default: ./data)
    #[arg(long, env = "MIAURA_DATA_DIR", default_value = "./data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a mood (1-5 or fantastic, fine, okay, low, down)
    Log {
        mood: MoodLevel,
        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Print the calendar grid
    Show {
        /// View to print instead of the saved one
        #[arg(short, long, value_enum)]
        view: Option<CalendarView>,
        /// Years, months or weeks to move from today (negative goes back)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
    /// List or switch color templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Update and print display preferences
    Settings {
        #[arg(long, value_enum)]
        language: Option<Language>,
        #[arg(long, value_enum)]
        counter: Option<CounterMode>,
        #[arg(long, value_enum)]
        view: Option<CalendarView>,
    },
    /// Synthetic data utilities
    Debug {
        #[command(subcommand)]
        action: DebugAction,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List all templates
    List,
    /// Make a template active
    Use { id: String },
}

#[derive(Subcommand)]
enum DebugAction {
    /// Backfill a synthetic streak ending today (at most 365 days)
    Fill { days: u32 },
    /// Remove every synthetic entry
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };

    init_logging(&data_dir, cli.command.is_none())?;

    match cli.command {
        None => cmd::root::run(&data_dir),
        Some(Commands::Log { mood, date }) => cmd::log::run(&data_dir, mood, date),
        Some(Commands::Show { view, shift }) => cmd::show::run(&data_dir, view, shift),
        Some(Commands::Templates { action }) => match action {
            TemplateAction::List => cmd::templates::run_list(&data_dir),
            TemplateAction::Use { id } => cmd::templates::run_use(&data_dir, &id),
        },
        Some(Commands::Settings {
            language,
            counter,
            view,
        }) => cmd::settings::run(&data_dir, language, counter, view),
        Some(Commands::Debug { action }) => match action {
            DebugAction::Fill { days } => cmd::debug::run_fill(&data_dir, days),
            DebugAction::Clear => cmd::debug::run_clear(&data_dir),
        },
    }
}

/// `RUST_LOG` filter, `warn` by default. The interactive calendar owns the
/// terminal, so it logs to `miaura.log` in the data directory instead of
/// stderr.
fn init_logging(data_dir: &Path, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    if interactive {
        let path = log_file_path(data_dir);
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create dir {}", data_dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn log_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("miaura.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_log_with_date() {
        let cli = Cli::try_parse_from(["miaura", "log", "fine", "--date", "2025-01-15"]).unwrap();
        match cli.command {
            Some(Commands::Log { mood, date }) => {
                assert_eq!(mood, MoodLevel::Fine);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15));
            }
            _ => panic!("expected log command"),
        }
    }

    #[test]
    fn test_parse_log_rejects_unknown_mood() {
        assert!(Cli::try_parse_from(["miaura", "log", "great"]).is_err());
    }

    #[test]
    fn test_parse_show_negative_shift() {
        let cli = Cli::try_parse_from(["miaura", "show", "--view", "month", "--shift", "-3"]).unwrap();
        match cli.command {
            Some(Commands::Show { view, shift }) => {
                assert_eq!(view, Some(CalendarView::Month));
                assert_eq!(shift, -3);
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_no_subcommand_opens_calendar() {
        let cli = Cli::try_parse_from(["miaura", "--data-dir", "/tmp/miaura"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/miaura"));
    }

    #[test]
    fn test_log_file_lives_in_data_dir() {
        assert_eq!(
            log_file_path(Path::new("/data")),
            PathBuf::from("/data/miaura.log")
        );
    }
}
