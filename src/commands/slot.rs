use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::storage::KeyValueStore;
use planner_core::{Planner, SlotChange};

use crate::commands::resolve_slot;
use crate::render::Render;

pub fn add<S: KeyValueStore>(planner: &mut Planner<S>, start: &str, end: &str) -> Result<()> {
    let change = planner.add_or_update_time_slot(start, end, None)?;
    print_change(planner, change);
    Ok(())
}

pub fn edit<S: KeyValueStore>(
    planner: &mut Planner<S>,
    slot: &str,
    start: &str,
    end: &str,
) -> Result<()> {
    let label = resolve_slot(planner.schedule(), slot)?;
    let change = planner.add_or_update_time_slot(start, end, Some(&label))?;

    if change == SlotChange::Unchanged {
        println!("  {}: {}", change.render(), label);
        return Ok(());
    }

    print_change(planner, change);
    Ok(())
}

pub fn delete<S: KeyValueStore>(planner: &mut Planner<S>, slot: &str) -> Result<()> {
    let label = resolve_slot(planner.schedule(), slot)?;
    planner.delete_time_slot(&label)?;
    println!("  {} {}", "Deleted:".red(), label);
    Ok(())
}

fn print_change<S: KeyValueStore>(planner: &Planner<S>, change: SlotChange) {
    let label = match change {
        SlotChange::Added(id) | SlotChange::Relabeled(id) => planner
            .schedule()
            .slot_by_id(id)
            .map(|s| s.label().to_string()),
        SlotChange::Unchanged | SlotChange::Ignored => None,
    };

    match label {
        Some(label) => println!("  {}: {}", change.render(), label),
        None => println!("  {}", change.render()),
    }
}
