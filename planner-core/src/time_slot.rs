//! Time slots: the labeled rows of the planner grid.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use uuid::Uuid;

use crate::error::{PlannerError, PlannerResult};

/// Separator between the start and end of a slot label (`"06:00 - 07:30"`).
pub const LABEL_SEPARATOR: &str = " - ";

const CLOCK_FORMAT: &str = "%H:%M";

/// Stable in-memory identity of a time slot.
///
/// Event records point at this rather than the label, so relabeling a slot
/// keeps its events attached. Ids are not persisted; storage uses labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    pub(crate) fn new() -> Self {
        SlotId(Uuid::new_v4())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TimeSlot {
    id: SlotId,
    label: String,
}

impl TimeSlot {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        TimeSlot {
            id: SlotId::new(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn relabel(&mut self, label: String) {
        self.label = label;
    }

    /// Split the label back into its start and end parts, e.g. to prefill
    /// an edit form. `None` for labels without the separator.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        self.label.split_once(LABEL_SEPARATOR)
    }

    /// Parsed start of the range, if the label starts with a valid `HH:MM`.
    pub fn start_time(&self) -> Option<NaiveTime> {
        let start = match self.bounds() {
            Some((start, _)) => start,
            None => self.label.as_str(),
        };
        parse_clock(start).ok()
    }

    /// Minutes since midnight of the range start.
    pub fn start_minutes(&self) -> Option<u32> {
        self.start_time().map(|t| t.hour() * 60 + t.minute())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Parse a 24-hour `HH:MM` clock string.
pub fn parse_clock(s: &str) -> PlannerResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), CLOCK_FORMAT)
        .map_err(|_| PlannerError::InvalidTime(s.to_string()))
}

/// Build the canonical `"HH:MM - HH:MM"` label for a range.
pub fn format_label(start: NaiveTime, end: NaiveTime) -> String {
    format!(
        "{}{}{}",
        start.format(CLOCK_FORMAT),
        LABEL_SEPARATOR,
        end.format(CLOCK_FORMAT)
    )
}

/// Sort slots ascending by start time.
///
/// The sort is stable, so equal starts keep their current order. Labels with
/// no parsable start go last.
pub(crate) fn sort_slots(slots: &mut [TimeSlot]) {
    slots.sort_by_key(|slot| match slot.start_minutes() {
        Some(minutes) => (false, minutes),
        None => (true, 0),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(slots: &[TimeSlot]) -> Vec<&str> {
        slots.iter().map(|s| s.label()).collect()
    }

    #[test]
    fn format_label_pads_hours() {
        let start = parse_clock("6:00").unwrap();
        let end = parse_clock("07:30").unwrap();
        assert_eq!(format_label(start, end), "06:00 - 07:30");
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("noon").is_err());
        assert!(parse_clock("").is_err());
    }

    #[test]
    fn bounds_split_label() {
        let slot = TimeSlot::new("06:00 - 07:30");
        assert_eq!(slot.bounds(), Some(("06:00", "07:30")));
        assert_eq!(slot.start_minutes(), Some(360));
    }

    #[test]
    fn legacy_label_without_separator_has_no_bounds() {
        let slot = TimeSlot::new("6:00-7:30");
        assert_eq!(slot.bounds(), None);
        assert_eq!(slot.start_minutes(), None);
    }

    #[test]
    fn sort_orders_by_start_minutes() {
        let mut slots = vec![
            TimeSlot::new("18:00 - 19:00"),
            TimeSlot::new("06:00 - 07:30"),
            TimeSlot::new("09:15 - 10:00"),
        ];
        sort_slots(&mut slots);
        assert_eq!(
            labels(&slots),
            vec!["06:00 - 07:30", "09:15 - 10:00", "18:00 - 19:00"]
        );
    }

    #[test]
    fn sort_is_stable_and_puts_unparsable_last() {
        let mut slots = vec![
            TimeSlot::new("bogus"),
            TimeSlot::new("08:00 - 10:00"),
            TimeSlot::new("08:00 - 09:00"),
            TimeSlot::new("07:00 - 08:00"),
        ];
        sort_slots(&mut slots);
        assert_eq!(
            labels(&slots),
            vec!["07:00 - 08:00", "08:00 - 10:00", "08:00 - 09:00", "bogus"]
        );
    }

    #[test]
    fn slot_ids_are_unique() {
        assert_ne!(TimeSlot::new("a").id(), TimeSlot::new("a").id());
    }
}
