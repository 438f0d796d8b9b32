use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use planner_core::storage::KeyValueStore;
use planner_core::{Day, Planner};

use crate::commands::resolve_slot;
use crate::render::Render;

/// Save the text of a cell. Without `text`, prompt for it, starting from
/// whatever the cell holds now. Blank text clears the cell.
pub fn set<S: KeyValueStore>(
    planner: &mut Planner<S>,
    day: Day,
    slot: &str,
    text: Option<String>,
) -> Result<()> {
    planner.schedule().check_day(day)?;
    let label = resolve_slot(planner.schedule(), slot)?;

    let text = match text {
        Some(t) => t,
        None => {
            let current = planner.find_event(day, &label).unwrap_or_default().to_string();
            Input::<String>::new()
                .with_prompt(format!("  {} {}", day, label))
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?
        }
    };

    let change = planner.upsert_event(day, &label, &text)?;
    println!("  {}: {} {}", change.render(), day, label.dimmed());
    Ok(())
}

pub fn get<S: KeyValueStore>(planner: &Planner<S>, day: Day, slot: &str) -> Result<()> {
    planner.schedule().check_day(day)?;
    let label = resolve_slot(planner.schedule(), slot)?;

    match planner.find_event(day, &label) {
        Some(text) => println!("{}", text),
        None => println!("{}", "(empty)".dimmed()),
    }
    Ok(())
}

pub fn clear<S: KeyValueStore>(planner: &mut Planner<S>, day: Day, slot: &str) -> Result<()> {
    planner.schedule().check_day(day)?;
    let label = resolve_slot(planner.schedule(), slot)?;

    if planner.delete_event(day, &label)? {
        println!("  {}: {} {}", "Cleared".red(), day, label.dimmed());
    } else {
        println!("  {}", "Nothing to clear".dimmed());
    }
    Ok(())
}
