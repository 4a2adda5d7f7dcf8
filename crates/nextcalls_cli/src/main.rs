//! Command-line front end for the call derivation engine.
//!
//! # Responsibility
//! - Wire JSON fixture providers and the SQLite settings store into one
//!   engine per invocation.
//! - Print derived calls, complete them, and manage the list selection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nextcalls_core::db::{open_db, open_db_in_memory};
use nextcalls_core::{
    core_version, default_log_level, init_stderr_logging, CachedContactSource,
    CallDerivationEngine, CompleteOutcome, FixtureContactSource, FixtureReminderSource,
    ReminderSource, SettingsService, SqliteSettingsRepository,
};

#[derive(Debug, Parser)]
#[command(name = "nextcalls")]
#[command(about = "Derive call entries from reminders and contacts")]
struct Cli {
    /// One of trace|debug|info|warn|error; defaults to the build's level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the derived call list.
    Calls(CallsArgs),
    /// Print the available reminder lists.
    Lists(FixtureArgs),
    /// Complete the n-th derived call.
    Complete(CompleteArgs),
    /// Read or change the selected reminder list.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Print the core version.
    Version,
}

#[derive(Debug, Args)]
struct FixtureArgs {
    /// JSON document with `reminders`, `contacts` and optional `lists`.
    #[arg(long)]
    fixture: PathBuf,
}

#[derive(Debug, Args)]
struct CallsArgs {
    #[command(flatten)]
    source: FixtureArgs,
    /// Settings database; without it every list is read.
    #[arg(long)]
    settings_db: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    #[command(flatten)]
    source: FixtureArgs,
    #[arg(long)]
    settings_db: Option<PathBuf>,
    /// 1-based position in the derived call list.
    #[arg(long)]
    call: usize,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    Get(SettingsDbArgs),
    Set(SettingsSetArgs),
    /// Select the default reminder list.
    Reset(SettingsDbArgs),
}

#[derive(Debug, Args)]
struct SettingsDbArgs {
    #[arg(long)]
    settings_db: PathBuf,
}

#[derive(Debug, Args)]
struct SettingsSetArgs {
    #[command(flatten)]
    db: SettingsDbArgs,
    /// Reminder list name; an empty name reads every list.
    name: String,
}

type Settings = SettingsService<SqliteSettingsRepository>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_stderr_logging(log_level) {
        eprintln!("warning: logging disabled: {err}");
    }
    if let Err(err) = run(cli.command).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Calls(args) => print_calls(args).await,
        Command::Lists(args) => print_lists(&args.fixture).await,
        Command::Complete(args) => complete_call(args).await,
        Command::Settings { command } => run_settings(command),
        Command::Version => {
            println!("nextcalls {}", core_version());
            Ok(())
        }
    }
}

async fn print_calls(args: CallsArgs) -> Result<()> {
    let settings = open_settings(args.settings_db.as_deref())?;
    let engine = build_engine(&args.source.fixture, &settings);
    engine.refresh().await.context("failed to derive calls")?;

    let calls = engine.calls();
    if args.json {
        println!("{}", serde_json::to_string_pretty(calls.as_slice())?);
        return Ok(());
    }
    if calls.is_empty() {
        println!("no calls");
    }
    for (position, call) in calls.iter().enumerate() {
        println!(
            "{:>3}. {:<16} {}",
            position + 1,
            call.phone,
            call.reminder.title
        );
    }
    Ok(())
}

async fn print_lists(fixture: &Path) -> Result<()> {
    let source = FixtureReminderSource::new(fixture);
    source.request_access().await?;
    for name in source.list_available_lists().await? {
        println!("{name}");
    }
    Ok(())
}

async fn complete_call(args: CompleteArgs) -> Result<()> {
    let settings = open_settings(args.settings_db.as_deref())?;
    let engine = build_engine(&args.source.fixture, &settings);
    engine.refresh().await.context("failed to derive calls")?;

    let calls = engine.calls();
    let Some(call) = args.call.checked_sub(1).and_then(|index| calls.get(index)) else {
        bail!("no call at position {} ({} calls)", args.call, calls.len());
    };

    match engine.complete(call).await? {
        CompleteOutcome::Removed => println!("completed: {}", call.reminder.title),
        CompleteOutcome::NotPresent => println!("already completed: {}", call.reminder.title),
    }
    Ok(())
}

fn run_settings(command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Get(args) => {
            let settings = open_settings(Some(&args.settings_db))?;
            if settings.has_selected_list() {
                println!("{}", settings.selected_list_name());
            } else {
                println!("(all lists)");
            }
        }
        SettingsCommand::Set(args) => {
            let settings = open_settings(Some(&args.db.settings_db))?;
            settings.set_selected_list_name(&args.name)?;
        }
        SettingsCommand::Reset(args) => {
            let settings = open_settings(Some(&args.settings_db))?;
            settings.reset_to_default()?;
            println!("{}", settings.selected_list_name());
        }
    }
    Ok(())
}

fn open_settings(path: Option<&Path>) -> Result<Settings> {
    let conn = match path {
        Some(path) => open_db(path)
            .with_context(|| format!("failed to open settings `{}`", path.display()))?,
        None => open_db_in_memory().context("failed to open in-memory settings")?,
    };
    Ok(SettingsService::new(SqliteSettingsRepository::new(conn))?)
}

fn build_engine(fixture: &Path, settings: &Settings) -> CallDerivationEngine {
    let contacts = FixtureContactSource::new(fixture);
    CallDerivationEngine::new(
        Arc::new(FixtureReminderSource::new(fixture)),
        Arc::new(CachedContactSource::new(Arc::new(contacts))),
        settings.subscribe(),
    )
}
