//! The schedule store: ordered time slots plus the events assigned to
//! (day, time slot) cells.
//!
//! All mutations are plain `&mut self` methods that report what changed.
//! Nothing here touches storage; persisting is up to the caller (see
//! [`crate::planner::Planner`]).

use std::collections::HashSet;

use tracing::debug;

use crate::day::{Day, DaySet};
use crate::error::{PlannerError, PlannerResult};
use crate::time_slot::{SlotId, TimeSlot, format_label, parse_clock, sort_slots};

/// The single slot a fresh planner starts with.
pub const DEFAULT_TIME_SLOT: &str = "06:00 - 07:30";

/// Text assigned to one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub day: Day,
    pub slot: SlotId,
    pub text: String,
}

/// Result of [`Schedule::add_or_update_time_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    Added(SlotId),
    Relabeled(SlotId),
    /// Input was valid but nothing needed to change (duplicate label,
    /// relabel target already taken, or the slot being edited is gone).
    Unchanged,
    /// Start or end was empty.
    Ignored,
}

impl SlotChange {
    pub fn is_mutation(&self) -> bool {
        matches!(self, SlotChange::Added(_) | SlotChange::Relabeled(_))
    }
}

/// Result of [`Schedule::upsert_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChange {
    Created,
    Updated,
    /// Empty text was saved over an existing record.
    Removed,
    Unchanged,
}

impl EventChange {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, EventChange::Unchanged)
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    day_set: DaySet,
    slots: Vec<TimeSlot>,
    events: Vec<EventRecord>,
    /// Stored events for days outside the day set. Another planner sharing
    /// the same storage owns them; they ride along so saving keeps them.
    other_days: Vec<EventRecord>,
}

impl Schedule {
    /// A schedule holding the default dataset: one slot, no events.
    pub fn new(day_set: DaySet) -> Self {
        Schedule {
            day_set,
            slots: vec![TimeSlot::new(DEFAULT_TIME_SLOT)],
            events: Vec::new(),
            other_days: Vec::new(),
        }
    }

    /// A schedule with no slots at all.
    pub fn empty(day_set: DaySet) -> Self {
        Schedule {
            day_set,
            slots: Vec::new(),
            events: Vec::new(),
            other_days: Vec::new(),
        }
    }

    /// Assemble a schedule from stored parts.
    ///
    /// Slot order is kept as given. Repeated labels keep their first
    /// occurrence; events for unknown labels are skipped; a later record for
    /// the same cell replaces an earlier one. Events for days outside the
    /// day set are kept aside, untouched, in [`Schedule::other_day_events`].
    /// Returns the schedule and the number of event records skipped.
    pub(crate) fn from_labels<L, E>(day_set: DaySet, labels: L, events: E) -> (Self, usize)
    where
        L: IntoIterator<Item = String>,
        E: IntoIterator<Item = (Day, String, String)>,
    {
        let mut schedule = Schedule::empty(day_set);

        for label in labels {
            if schedule.slot(&label).is_none() {
                schedule.slots.push(TimeSlot::new(label));
            }
        }

        let mut skipped = 0;
        for (day, label, text) in events {
            if day_set.contains(day) {
                if schedule.upsert_event(day, &label, &text).is_err() {
                    skipped += 1;
                }
                continue;
            }

            match schedule.slot(&label).map(|s| s.id()) {
                Some(slot) if !text.trim().is_empty() => {
                    schedule
                        .other_days
                        .retain(|e| !(e.day == day && e.slot == slot));
                    schedule.other_days.push(EventRecord { day, slot, text });
                }
                Some(_) => {}
                None => skipped += 1,
            }
        }

        (schedule, skipped)
    }

    pub fn day_set(&self) -> DaySet {
        self.day_set
    }

    /// The grid columns, in display order.
    pub fn days(&self) -> &'static [Day] {
        self.day_set.days()
    }

    /// The grid rows, sorted by start time.
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.label()).collect()
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn slot(&self, label: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.label() == label)
    }

    pub fn slot_by_id(&self, id: SlotId) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id() == id)
    }

    /// Text in the cell for `day` and slot `id`, if any.
    pub fn cell(&self, day: Day, id: SlotId) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.day == day && e.slot == id)
            .map(|e| e.text.as_str())
    }

    /// Events as (day, slot label, text), in insertion order.
    pub fn labeled_events(&self) -> impl Iterator<Item = (Day, &str, &str)> {
        self.events.iter().filter_map(|e| {
            self.slot_by_id(e.slot)
                .map(|slot| (e.day, slot.label(), e.text.as_str()))
        })
    }

    /// Events kept for days outside the day set.
    pub fn other_day_events(&self) -> &[EventRecord] {
        &self.other_days
    }

    /// Every event to persist, in-set first, as (day, slot label, text).
    pub fn stored_events(&self) -> impl Iterator<Item = (Day, &str, &str)> {
        self.labeled_events().chain(self.other_days.iter().filter_map(|e| {
            self.slot_by_id(e.slot)
                .map(|slot| (e.day, slot.label(), e.text.as_str()))
        }))
    }

    // =========================================================================
    // Time slots
    // =========================================================================

    /// Add the slot `"<start> - <end>"`, or relabel `editing` to it.
    ///
    /// Empty `start` or `end` is ignored without error. Relabeling keeps the
    /// slot's id, so its events move with it. The sequence is re-sorted by
    /// start time after any change.
    pub fn add_or_update_time_slot(
        &mut self,
        start: &str,
        end: &str,
        editing: Option<&str>,
    ) -> PlannerResult<SlotChange> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Ok(SlotChange::Ignored);
        }

        let label = format_label(parse_clock(start)?, parse_clock(end)?);

        let change = match editing {
            Some(old) => {
                let Some(index) = self.slots.iter().position(|s| s.label() == old) else {
                    debug!(slot = old, "Slot to edit no longer exists");
                    return Ok(SlotChange::Unchanged);
                };
                if self.slot(&label).is_some() {
                    debug!(from = old, to = %label, "Relabel target already exists");
                    return Ok(SlotChange::Unchanged);
                }
                let slot = &mut self.slots[index];
                debug!(from = old, to = %label, "Relabeling time slot");
                slot.relabel(label);
                SlotChange::Relabeled(slot.id())
            }
            None => {
                if self.slot(&label).is_some() {
                    return Ok(SlotChange::Unchanged);
                }
                let slot = TimeSlot::new(label);
                let id = slot.id();
                debug!(slot = slot.label(), "Adding time slot");
                self.slots.push(slot);
                SlotChange::Added(id)
            }
        };

        sort_slots(&mut self.slots);
        Ok(change)
    }

    /// Remove a slot together with every event in it.
    /// Returns false if no slot has that label.
    pub fn delete_time_slot(&mut self, label: &str) -> bool {
        let Some(index) = self.slots.iter().position(|s| s.label() == label) else {
            return false;
        };

        let removed = self.slots.remove(index);
        let before = self.events.len();
        self.events.retain(|e| e.slot != removed.id());
        self.other_days.retain(|e| e.slot != removed.id());

        debug!(
            slot = label,
            events = before - self.events.len(),
            "Deleted time slot"
        );
        true
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Set the text of a cell, replacing whatever was there.
    ///
    /// Blank text clears the cell instead of storing an empty record.
    pub fn upsert_event(&mut self, day: Day, time: &str, text: &str) -> PlannerResult<EventChange> {
        self.check_day(day)?;
        let slot = self
            .slot(time)
            .map(|s| s.id())
            .ok_or_else(|| PlannerError::UnknownTimeSlot(time.to_string()))?;

        let existing = self
            .events
            .iter()
            .position(|e| e.day == day && e.slot == slot);

        if text.trim().is_empty() {
            return Ok(match existing {
                Some(index) => {
                    self.events.remove(index);
                    debug!(%day, slot = time, "Cleared event");
                    EventChange::Removed
                }
                None => EventChange::Unchanged,
            });
        }

        let change = match existing {
            Some(index) if self.events[index].text == text => return Ok(EventChange::Unchanged),
            Some(index) => {
                self.events.remove(index);
                EventChange::Updated
            }
            None => EventChange::Created,
        };

        self.events.push(EventRecord {
            day,
            slot,
            text: text.to_string(),
        });
        debug!(%day, slot = time, ?change, "Saved event");

        Ok(change)
    }

    /// Remove the event in a cell. Returns false if the cell was empty.
    pub fn delete_event(&mut self, day: Day, time: &str) -> bool {
        let Some(slot) = self.slot(time).map(|s| s.id()) else {
            return false;
        };
        let before = self.events.len();
        self.events.retain(|e| !(e.day == day && e.slot == slot));
        before != self.events.len()
    }

    pub fn find_event(&self, day: Day, time: &str) -> Option<&str> {
        let slot = self.slot(time)?;
        self.cell(day, slot.id())
    }

    /// Error unless `day` is one of this schedule's columns.
    pub fn check_day(&self, day: Day) -> PlannerResult<()> {
        if self.day_set.contains(day) {
            Ok(())
        } else {
            Err(PlannerError::DayNotInSet {
                day: day.to_string(),
                day_set: self.day_set.to_string(),
            })
        }
    }
}

impl PartialEq for Schedule {
    /// Slot ids are session-local, so schedules compare by labels and the
    /// (day, label, text) set.
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<_> = self.stored_events().collect();
        let theirs: HashSet<_> = other.stored_events().collect();

        self.day_set == other.day_set && self.labels() == other.labels() && ours == theirs
    }
}
