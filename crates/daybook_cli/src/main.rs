//! CLI entry point for the daybook tool facade.
//!
//! # Responsibility
//! - Resolve store and logging configuration from flags or environment.
//! - List tools, call one tool with JSON arguments, or print the digest.
//! - Print results as pretty JSON on stdout; errors go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_core::config::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
use daybook_core::logging::{LOG_DIR_ENV, LOG_LEVEL_ENV};
use daybook_core::{
    core_version, default_log_level, init_logging, JsonStore, StoreConfig, SystemClock,
    ToolRegistry,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "daybook", version, about = "Tasks, notes, expenses, events and reminders")]
struct Cli {
    /// Directory holding the collection documents.
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every tool with its input schema.
    Tools,
    /// Call one tool with JSON arguments.
    Call {
        /// Tool name, e.g. `create_task`.
        name: String,
        /// JSON object with tool arguments.
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Print the daily digest.
    Summary {
        /// Day to summarize (defaults to today).
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let log_dir = absolute_path(log_dir)?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).context("logging init failed")?;
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = JsonStore::open(StoreConfig::new(&cli.data_dir))
        .with_context(|| format!("failed to open data dir `{}`", cli.data_dir.display()))?;
    let registry = ToolRegistry::new(store, Arc::new(SystemClock));

    match cli.command {
        Command::Tools => print_json(&Value::Array(registry.list_tools())),
        Command::Call { name, args } => {
            let arguments: Value =
                serde_json::from_str(&args).context("tool arguments must be valid JSON")?;
            let result = registry
                .call_tool(&name, &arguments)
                .with_context(|| format!("tool `{name}` failed"))?;
            print_json(&result)
        }
        Command::Summary { date } => {
            let arguments = match date {
                Some(date) => serde_json::json!({ "date": date }),
                None => serde_json::json!({}),
            };
            let result = registry.call_tool("generate_daily_summary", &arguments)?;
            print!("{}", result["summary"].as_str().unwrap_or_default());
            Ok(())
        }
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    Ok(cwd.join(path))
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use daybook_core::config::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
    use std::path::Path;

    #[test]
    fn data_dir_defaults_to_core_default_and_honors_env() {
        std::env::remove_var(DATA_DIR_ENV);
        let cli = Cli::try_parse_from(["daybook", "tools"]).unwrap();
        assert_eq!(cli.data_dir, Path::new(DEFAULT_DATA_DIR));

        std::env::set_var(DATA_DIR_ENV, "/srv/daybook");
        let cli = Cli::try_parse_from(["daybook", "tools"]).unwrap();
        std::env::remove_var(DATA_DIR_ENV);
        assert_eq!(cli.data_dir, Path::new("/srv/daybook"));
    }

    #[test]
    fn call_defaults_to_empty_arguments() {
        let cli = Cli::try_parse_from(["daybook", "--data-dir", "/tmp/db", "call", "list_tasks"])
            .unwrap();
        assert_eq!(cli.data_dir.to_str(), Some("/tmp/db"));
        match cli.command {
            Command::Call { name, args } => {
                assert_eq!(name, "list_tasks");
                assert_eq!(args, "{}");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summary_accepts_date_flag() {
        let cli = Cli::try_parse_from(["daybook", "summary", "--date", "tomorrow"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Summary { date: Some(ref date) } if date == "tomorrow"
        ));
    }
}
