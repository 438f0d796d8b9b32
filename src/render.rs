//! Terminal rendering for planner types.

use owo_colors::OwoColorize;
use planner_core::schedule::Schedule;
use planner_core::{EventChange, SlotChange};

const CORNER: &str = "Time / Day";
const EMPTY_CELL: &str = "+";

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Schedule {
    /// Slots as rows, days as columns, `+` for empty cells.
    fn render(&self) -> String {
        if self.time_slots().is_empty() {
            return format!(
                "No time slots yet. Add one with:\n  {}",
                "planner slot add <start> <end>".bold()
            );
        }

        let days = self.days();

        let mut widths: Vec<usize> = std::iter::once(CORNER.chars().count())
            .chain(days.iter().map(|d| d.name().chars().count()))
            .collect();

        for slot in self.time_slots() {
            widths[0] = widths[0].max(slot.label().chars().count());
            for (i, day) in days.iter().enumerate() {
                let text = self.cell(*day, slot.id()).unwrap_or(EMPTY_CELL);
                widths[i + 1] = widths[i + 1].max(text.chars().count());
            }
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("┼");

        let mut lines = Vec::new();

        let header = std::iter::once(pad(CORNER, widths[0]))
            .chain(days.iter().zip(&widths[1..]).map(|(d, w)| pad(d.name(), *w)))
            .map(|h| format!(" {} ", h.bold()))
            .collect::<Vec<_>>()
            .join("│");
        lines.push(header);
        lines.push(separator.dimmed().to_string());

        for slot in self.time_slots() {
            let mut cells = vec![format!(" {} ", pad(slot.label(), widths[0]).cyan())];
            for (day, width) in days.iter().zip(&widths[1..]) {
                let cell = match self.cell(*day, slot.id()) {
                    Some(text) => pad(text, *width),
                    None => pad(EMPTY_CELL, *width).dimmed().to_string(),
                };
                cells.push(format!(" {} ", cell));
            }
            lines.push(cells.join("│"));
        }

        lines.join("\n")
    }
}

impl Render for SlotChange {
    fn render(&self) -> String {
        match self {
            SlotChange::Added(_) => "Added".green().to_string(),
            SlotChange::Relabeled(_) => "Updated".yellow().to_string(),
            SlotChange::Unchanged => "Unchanged".dimmed().to_string(),
            SlotChange::Ignored => "Ignored (start and end are required)".dimmed().to_string(),
        }
    }
}

impl Render for EventChange {
    fn render(&self) -> String {
        match self {
            EventChange::Created => "Created".green().to_string(),
            EventChange::Updated => "Updated".yellow().to_string(),
            EventChange::Removed => "Cleared".red().to_string(),
            EventChange::Unchanged => "Unchanged".dimmed().to_string(),
        }
    }
}

/// Left-align `text` in a column of `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{Day, DaySet};

    #[test]
    fn pad_counts_characters_not_bytes() {
        assert_eq!(pad("café", 6), "café  ");
    }

    #[test]
    fn grid_lists_days_slots_and_events() {
        let mut schedule = Schedule::new(DaySet::Weekend);
        schedule.add_or_update_time_slot("09:00", "10:00", None).unwrap();
        schedule
            .upsert_event(Day::Sunday, "09:00 - 10:00", "Farmers market")
            .unwrap();

        let grid = schedule.render();
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Saturday") && lines[0].contains("Sunday"));
        assert!(lines[2].contains("06:00 - 07:30"));
        assert!(lines[3].contains("09:00 - 10:00"));
        assert!(lines[3].contains("Farmers market"));
        assert!(!grid.contains("Monday"));
    }

    #[test]
    fn week_grid_has_seven_columns() {
        let grid = Schedule::new(DaySet::Week).render();
        let header = grid.lines().next().unwrap();

        assert_eq!(header.matches('│').count(), 7);
    }

    #[test]
    fn empty_schedule_explains_how_to_add_a_slot() {
        let grid = Schedule::empty(DaySet::Weekend).render();
        assert!(grid.contains("planner slot add"));
    }
}
