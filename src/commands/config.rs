use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use planner_core::DaySet;
use planner_core::config::PlannerConfig;

pub fn run(mut config: PlannerConfig, default_days: Option<DaySet>) -> Result<()> {
    if let Some(day_set) = default_days {
        config.day_set = day_set;
        config.save().context("Could not save planner config")?;
        println!("  {} {}", "Default planner:".green(), day_set);
        return Ok(());
    }

    let path = PlannerConfig::config_path()?;
    println!("{} {}", "config:".dimmed(), path.display());
    println!("{} {}", "data_dir:".dimmed(), config.data_path().display());
    println!("{} {}", "day_set:".dimmed(), config.day_set);

    for day_set in [DaySet::Weekend, DaySet::Week] {
        let keys = config.storage_keys(day_set);
        println!(
            "{} {}, {}",
            format!("{} keys:", day_set).dimmed(),
            keys.time_slots,
            keys.events
        );
    }

    Ok(())
}
