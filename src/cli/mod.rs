pub mod commands;
pub mod export;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    habit::{entity::HabitId, storage::JsonHabitStorage},
    utils::{
        dir::{create_application_default_path, ensure_dir},
        logging::enable_logging,
    },
};

use commands::{
    process_add_command, process_done_command, process_export_command, process_list_command,
    process_remove_command, process_rename_command, process_reset_command, process_stats_command,
    process_status_command, process_undo_command, FrequencyArg, StatusArg,
};

#[derive(Parser, Debug)]
#[command(name = "Habitual", version, long_about = None)]
#[command(about = "Command line tracker for daily habits", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Add a new habit")]
    Add {
        name: String,
        #[arg(short, long, default_value_t = FrequencyArg::Daily, help = "How often the habit repeats")]
        frequency: FrequencyArg,
        #[arg(short, long, help = "Goal number of days")]
        target: u32,
    },
    #[command(about = "Show all habits with their progress")]
    List {
        #[arg(long, help = "Only show habits with this status")]
        status: Option<StatusArg>,
    },
    #[command(about = "Record one more completed day for a habit")]
    Done { id: HabitId },
    #[command(about = "Take back one completed day of a habit")]
    Undo { id: HabitId },
    #[command(about = "Rename a habit")]
    Rename { id: HabitId, name: String },
    #[command(about = "Override the status of a habit by hand")]
    Status { id: HabitId, status: StatusArg },
    #[command(about = "Delete a habit")]
    Remove { id: HabitId },
    #[command(about = "Delete all habits")]
    Reset {},
    #[command(about = "Show the habit totals")]
    Stats {},
    #[command(about = "Write a plain-text report of all habits")]
    Export {
        #[arg(short, long, help = "Destination file. Prints to stdout when omitted")]
        output: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let application_dir = match args.dir {
        Some(dir) => ensure_dir(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&application_dir, logging_level, args.log)?;

    let storage = JsonHabitStorage::new(&application_dir);

    match args.commands {
        Commands::Add {
            name,
            frequency,
            target,
        } => process_add_command(&storage, &name, frequency, target).await,
        Commands::List { status } => process_list_command(&storage, status).await,
        Commands::Done { id } => process_done_command(&storage, id).await,
        Commands::Undo { id } => process_undo_command(&storage, id).await,
        Commands::Rename { id, name } => process_rename_command(&storage, id, &name).await,
        Commands::Status { id, status } => process_status_command(&storage, id, status).await,
        Commands::Remove { id } => process_remove_command(&storage, id).await,
        Commands::Reset {} => process_reset_command(&storage).await,
        Commands::Stats {} => process_stats_command(&storage).await,
        Commands::Export { output } => process_export_command(&storage, output.as_deref()).await,
    }
}
