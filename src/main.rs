mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planner_core::config::PlannerConfig;
use planner_core::storage::FileStore;
use planner_core::{Day, DaySet, Planner};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan your week: time slots as rows, days as columns")]
struct Cli {
    /// Which planner to use: "weekend" or "week" (defaults to day_set from config)
    #[arg(long, global = true)]
    days: Option<DaySet>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the planner grid
    Show {
        /// Print the schedule as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Add, edit or delete time slots
    Slot {
        #[command(subcommand)]
        action: SlotCommand,
    },
    /// Set the event in a cell (prompts for the text if omitted)
    Set {
        day: Day,

        /// Time slot label (e.g. "06:00 - 07:30") or its start time ("06:00")
        slot: String,

        text: Option<String>,
    },
    /// Print the event in a cell
    Get { day: Day, slot: String },
    /// Remove the event from a cell
    Clear { day: Day, slot: String },
    /// Show or change the configuration
    Config {
        /// Make this day set the default
        #[arg(long)]
        default_days: Option<DaySet>,
    },
}

#[derive(Subcommand)]
enum SlotCommand {
    /// Add a time slot (e.g. `planner slot add 06:00 07:30`)
    Add { start: String, end: String },
    /// Change the start and end of an existing slot
    Edit {
        /// Current label or start time of the slot
        slot: String,
        start: String,
        end: String,
    },
    /// Delete a time slot and every event in it
    Delete { slot: String },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = PlannerConfig::load().context("Could not load planner config")?;
    let day_set = cli.days.unwrap_or(config.day_set);

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json } => commands::show::run(&open_planner(&config, day_set), json),
        Commands::Slot { action } => {
            let planner = &mut open_planner(&config, day_set);
            match action {
                SlotCommand::Add { start, end } => commands::slot::add(planner, &start, &end),
                SlotCommand::Edit { slot, start, end } => {
                    commands::slot::edit(planner, &slot, &start, &end)
                }
                SlotCommand::Delete { slot } => commands::slot::delete(planner, &slot),
            }
        }
        Commands::Set { day, slot, text } => {
            commands::event::set(&mut open_planner(&config, day_set), day, &slot, text)
        }
        Commands::Get { day, slot } => {
            commands::event::get(&open_planner(&config, day_set), day, &slot)
        }
        Commands::Clear { day, slot } => {
            commands::event::clear(&mut open_planner(&config, day_set), day, &slot)
        }
        Commands::Config { default_days } => commands::config::run(config, default_days),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("planner_cli=warn,planner_core=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_planner(config: &PlannerConfig, day_set: DaySet) -> Planner<FileStore> {
    let store = FileStore::new(config.data_path());
    debug!(%day_set, dir = %store.dir().display(), "Opening planner");
    Planner::open(day_set, store, config.storage_keys(day_set))
}
