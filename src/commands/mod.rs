pub mod config;
pub mod event;
pub mod show;
pub mod slot;

use anyhow::Result;
use planner_core::schedule::Schedule;
use planner_core::time_slot::parse_clock;

/// Resolve a slot argument to its label.
///
/// Accepts the exact label, or a start time when exactly one slot starts
/// then (`"06:00"` for `"06:00 - 07:30"`).
pub fn resolve_slot(schedule: &Schedule, input: &str) -> Result<String> {
    if let Some(slot) = schedule.slot(input) {
        return Ok(slot.label().to_string());
    }

    if let Ok(start) = parse_clock(input) {
        let matches: Vec<_> = schedule
            .time_slots()
            .iter()
            .filter(|s| s.start_time() == Some(start))
            .collect();

        if let [slot] = matches.as_slice() {
            return Ok(slot.label().to_string());
        }
    }

    let available: Vec<_> = schedule.labels();
    if available.is_empty() {
        anyhow::bail!("Time slot '{}' not found. No time slots exist yet.", input);
    }
    anyhow::bail!(
        "Time slot '{}' not found. Available: {}",
        input,
        available.join(", ")
    )
}
