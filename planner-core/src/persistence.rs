//! Loading and saving a [`Schedule`] through a [`KeyValueStore`].
//!
//! A schedule is stored as two independent JSON values: the ordered list of
//! slot labels, and the list of `{day, time, event}` records. Both are
//! rewritten in full on every save.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::day::{Day, DaySet};
use crate::error::PlannerResult;
use crate::schedule::{DEFAULT_TIME_SLOT, Schedule};
use crate::storage::KeyValueStore;

/// Legacy key for the event records.
pub const EVENTS_KEY: &str = "plannerEvents";
/// Legacy key for the slot labels.
pub const TIME_SLOTS_KEY: &str = "plannerTimeSlots";

const WEEK_EVENTS_KEY: &str = "weekPlannerEvents";
const WEEK_TIME_SLOTS_KEY: &str = "weekPlannerTimeSlots";

/// The pair of storage keys a schedule lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub events: String,
    pub time_slots: String,
}

impl StorageKeys {
    /// Default keys per day set. The weekend planner keeps the legacy keys;
    /// the full week gets its own so the two never overwrite each other.
    pub fn for_day_set(day_set: DaySet) -> Self {
        let (events, time_slots) = match day_set {
            DaySet::Weekend => (EVENTS_KEY, TIME_SLOTS_KEY),
            DaySet::Week => (WEEK_EVENTS_KEY, WEEK_TIME_SLOTS_KEY),
        };
        StorageKeys {
            events: events.to_string(),
            time_slots: time_slots.to_string(),
        }
    }
}

/// One persisted cell, in the stored wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub day: String,
    pub time: String,
    pub event: String,
}

pub struct PersistenceAdapter<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        PersistenceAdapter { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the schedule back from storage.
    ///
    /// Never fails: missing or malformed slot data gives the default slot,
    /// missing or malformed event data gives no events.
    pub fn load(&self, day_set: DaySet) -> Schedule {
        let labels: Vec<String> = self
            .read_json(&self.keys.time_slots)
            .unwrap_or_else(|| vec![DEFAULT_TIME_SLOT.to_string()]);

        let records: Vec<serde_json::Value> = self.read_json(&self.keys.events).unwrap_or_default();

        let mut malformed = 0;
        let events: Vec<(Day, String, String)> = records
            .into_iter()
            .filter_map(|value| {
                let parsed = serde_json::from_value::<StoredEvent>(value)
                    .ok()
                    .and_then(|stored| {
                        let day = stored.day.parse::<Day>().ok()?;
                        Some((day, stored.time, stored.event))
                    });
                if parsed.is_none() {
                    malformed += 1;
                }
                parsed
            })
            .collect();

        let (schedule, skipped) = Schedule::from_labels(day_set, labels, events);

        if malformed + skipped > 0 {
            warn!(
                malformed,
                skipped,
                key = %self.keys.events,
                "Dropped stored events with no matching slot or unreadable fields"
            );
        }
        debug!(
            slots = schedule.time_slots().len(),
            events = schedule.events().len(),
            "Loaded schedule"
        );

        schedule
    }

    /// Write both snapshots, unconditionally.
    ///
    /// Slots are written before events, so a failed second write can only
    /// leave events missing, never events pointing at unstored slots.
    /// Events for days outside the schedule's day set are written back
    /// as they were loaded.
    pub fn save(&mut self, schedule: &Schedule) -> PlannerResult<()> {
        let labels = serde_json::to_string(&schedule.labels())?;

        let records: Vec<StoredEvent> = schedule
            .stored_events()
            .map(|(day, label, text)| StoredEvent {
                day: day.to_string(),
                time: label.to_string(),
                event: text.to_string(),
            })
            .collect();
        let events = serde_json::to_string(&records)?;

        self.store.set(&self.keys.time_slots, &labels)?;
        self.store.set(&self.keys.events, &events)?;

        debug!(
            slots = schedule.time_slots().len(),
            events = records.len(),
            "Saved schedule"
        );
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Could not read from storage, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed stored value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::storage::MemoryStore;
    use crate::storage::testing::FailingStore;

    fn adapter(store: MemoryStore) -> PersistenceAdapter<MemoryStore> {
        adapter_with(store)
    }

    fn adapter_with<S: KeyValueStore>(store: S) -> PersistenceAdapter<S> {
        PersistenceAdapter::new(store, StorageKeys::for_day_set(DaySet::Weekend))
    }

    #[test]
    fn empty_storage_loads_default_dataset() {
        let schedule = adapter(MemoryStore::new()).load(DaySet::Weekend);

        assert_eq!(schedule, Schedule::new(DaySet::Weekend));
    }

    #[test]
    fn malformed_json_loads_default_dataset() {
        let mut store = MemoryStore::new();
        store.set(TIME_SLOTS_KEY, "[\"06:00 - 07:30\"").unwrap();
        store.set(EVENTS_KEY, "{not json").unwrap();

        let schedule = adapter(store).load(DaySet::Weekend);

        assert_eq!(schedule.labels(), vec![DEFAULT_TIME_SLOT]);
        assert!(schedule.events().is_empty());
    }

    #[test]
    fn wrong_json_shape_is_treated_as_absent() {
        let mut store = MemoryStore::new();
        store.set(TIME_SLOTS_KEY, "{\"a\": 1}").unwrap();

        let schedule = adapter(store).load(DaySet::Weekend);

        assert_eq!(schedule.labels(), vec![DEFAULT_TIME_SLOT]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut schedule = Schedule::new(DaySet::Weekend);
        schedule.add_or_update_time_slot("07:30", "09:00", None).unwrap();
        schedule.add_or_update_time_slot("05:00", "06:00", None).unwrap();
        schedule
            .upsert_event(Day::Saturday, "07:30 - 09:00", "Market")
            .unwrap();
        schedule
            .upsert_event(Day::Sunday, "05:00 - 06:00", "Sunrise hike")
            .unwrap();

        let mut adapter = adapter(MemoryStore::new());
        adapter.save(&schedule).unwrap();
        let loaded = adapter.load(DaySet::Weekend);

        assert_eq!(loaded, schedule);
        assert_eq!(
            loaded.labels(),
            vec!["05:00 - 06:00", "06:00 - 07:30", "07:30 - 09:00"]
        );
    }

    #[test]
    fn saves_legacy_wire_format() {
        let mut schedule = Schedule::new(DaySet::Weekend);
        schedule
            .upsert_event(Day::Sunday, DEFAULT_TIME_SLOT, "Gym")
            .unwrap();

        let mut adapter = adapter(MemoryStore::new());
        adapter.save(&schedule).unwrap();

        let store = adapter.into_store();
        assert_eq!(
            store.get(TIME_SLOTS_KEY).unwrap().as_deref(),
            Some("[\"06:00 - 07:30\"]")
        );
        assert_eq!(
            store.get(EVENTS_KEY).unwrap().as_deref(),
            Some("[{\"day\":\"Sunday\",\"time\":\"06:00 - 07:30\",\"event\":\"Gym\"}]")
        );
    }

    #[test]
    fn empty_slot_list_is_kept_empty() {
        let mut store = MemoryStore::new();
        store.set(TIME_SLOTS_KEY, "[]").unwrap();

        let schedule = adapter(store).load(DaySet::Weekend);

        assert!(schedule.time_slots().is_empty());
    }

    #[test]
    fn bad_records_are_dropped_individually() {
        let mut store = MemoryStore::new();
        store
            .set(TIME_SLOTS_KEY, "[\"06:00 - 07:30\", \"6:00-7:30\"]")
            .unwrap();
        store
            .set(
                EVENTS_KEY,
                r#"[
                    {"day": "Saturday", "time": "06:00 - 07:30", "event": "Gym"},
                    {"day": "Monday", "time": "06:00 - 07:30", "event": "Work"},
                    {"day": "Sunday", "time": "6:00-7:30", "event": "Legacy"},
                    {"day": "Sunday", "time": "12:00 - 13:00", "event": "Orphan"},
                    {"day": "Sunday"},
                    42
                ]"#,
            )
            .unwrap();

        let schedule = adapter(store).load(DaySet::Weekend);

        assert_eq!(schedule.labels(), vec!["06:00 - 07:30", "6:00-7:30"]);
        assert_eq!(schedule.find_event(Day::Saturday, "06:00 - 07:30"), Some("Gym"));
        assert_eq!(schedule.find_event(Day::Sunday, "6:00-7:30"), Some("Legacy"));
        assert_eq!(schedule.events().len(), 2);
        assert_eq!(schedule.other_day_events().len(), 1);
    }

    #[test]
    fn save_writes_slots_before_events() {
        let mut store = FailingStore::new();
        store.fail_set_on = Some(EVENTS_KEY.to_string());
        let mut adapter = adapter_with(store);

        let result = adapter.save(&Schedule::new(DaySet::Weekend));

        assert!(matches!(result, Err(PlannerError::Storage(_))));
        let store = adapter.into_store();
        assert!(store.inner.get(TIME_SLOTS_KEY).unwrap().is_some());
        assert_eq!(store.inner.get(EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn read_error_loads_default_dataset() {
        let mut store = FailingStore::new();
        store
            .inner
            .set(TIME_SLOTS_KEY, "[\"09:00 - 10:00\"]")
            .unwrap();
        store.fail_get = true;

        let schedule = adapter_with(store).load(DaySet::Weekend);

        assert_eq!(schedule, Schedule::new(DaySet::Weekend));
    }

    #[test]
    fn variants_use_separate_keys() {
        assert_ne!(
            StorageKeys::for_day_set(DaySet::Week),
            StorageKeys::for_day_set(DaySet::Weekend)
        );
        assert_eq!(StorageKeys::for_day_set(DaySet::Weekend).events, EVENTS_KEY);
    }
}
