pub mod check_in;
pub mod history;
pub mod info;
pub mod logs;
pub mod output;
pub mod prompt;
pub mod setup;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use check_in::{CheckInCommand, process_check_in_command};
use clap::{CommandFactory, Parser, Subcommand};
use history::{HistoryCommand, process_history_command};
use logs::process_logs_command;
use setup::process_setup_command;
use tracing::level_filters::LevelFilter;

use crate::{
    storage::habit_store::{HabitStore, JsonHabitStore},
    utils::{
        clock::DefaultClock,
        dir::resolve_application_path,
        logging::{CLI_PREFIX, enable_logging},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Habitual", version, long_about = None)]
#[command(about = "Track daily habits and keep your streaks going", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Define the habits to track. Replaces previously defined habits")]
    Setup {
        #[arg(help = "Habit names. Prompts for them when none are given")]
        habits: Vec<String>,
    },
    #[command(about = "Record which habits were completed today")]
    CheckIn {
        #[command(flatten)]
        command: CheckInCommand,
    },
    #[command(about = "Display all recorded logs together with current streaks")]
    Logs {},
    #[command(about = "Display completion history of habits over a date range")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
    #[command(about = "Clear all logs and streaks. Habits are kept")]
    Clear {},
    #[command(about = "Reset everything: habits, logs and streaks")]
    Reset {},
    #[command(about = "Display information about the application")]
    Info {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = resolve_application_path(args.dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let store = JsonHabitStore::new(app_dir)?;
    store.initialize().await?;

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();

    match args.commands {
        Commands::Setup { habits } => {
            process_setup_command(&store, habits, &mut stdin, &mut stdout).await
        }
        Commands::CheckIn { command } => {
            process_check_in_command(command, &store, &DefaultClock, &mut stdin, &mut stdout)
                .await
        }
        Commands::Logs {} => process_logs_command(&store, &DefaultClock, &mut stdout).await,
        Commands::History { command } => {
            process_history_command(command, &store, &DefaultClock, &mut stdout).await
        }
        Commands::Clear {} => {
            store.clear_tracking_data().await?;
            writeln!(stdout, "Logs and streaks cleared. Habits were kept.")?;
            Ok(())
        }
        Commands::Reset {} => {
            store.reset().await?;
            writeln!(
                stdout,
                "Everything has been reset. Run `habitual setup` to start fresh."
            )?;
            Ok(())
        }
        Commands::Info {} => info::print_app_info(&mut stdout),
    }
}

/// Builds a user facing validation error, formatted the same way clap reports bad arguments.
pub(crate) fn validation_error(message: impl std::fmt::Display) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .into()
}
