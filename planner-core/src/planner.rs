//! A planner session: the schedule plus, once storage is available, the
//! adapter that mirrors it.
//!
//! Until [`Planner::attach`] is called the session runs purely in memory on
//! the default dataset. After that, every operation that changes the
//! schedule writes both snapshots before returning.

use tracing::debug;

use crate::day::{Day, DaySet};
use crate::error::PlannerResult;
use crate::persistence::{PersistenceAdapter, StorageKeys};
use crate::schedule::{EventChange, Schedule, SlotChange};
use crate::storage::KeyValueStore;

pub struct Planner<S> {
    schedule: Schedule,
    adapter: Option<PersistenceAdapter<S>>,
}

impl<S: KeyValueStore> Planner<S> {
    /// In-memory session with the default dataset.
    pub fn new(day_set: DaySet) -> Self {
        Planner {
            schedule: Schedule::new(day_set),
            adapter: None,
        }
    }

    /// Session backed by `store` from the start.
    pub fn open(day_set: DaySet, store: S, keys: StorageKeys) -> Self {
        let mut planner = Self::new(day_set);
        planner.attach(store, keys);
        planner
    }

    /// Start persisting into `store`.
    ///
    /// The in-memory schedule is replaced by whatever the store holds (or
    /// the default dataset if it holds nothing usable).
    pub fn attach(&mut self, store: S, keys: StorageKeys) {
        let adapter = PersistenceAdapter::new(store, keys);
        self.schedule = adapter.load(self.schedule.day_set());
        debug!(keys = ?adapter.keys(), "Attached storage");
        self.adapter = Some(adapter);
    }

    /// Stop persisting and hand the store back.
    pub fn detach(&mut self) -> Option<S> {
        self.adapter.take().map(PersistenceAdapter::into_store)
    }

    pub fn is_persistent(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn store(&self) -> Option<&S> {
        self.adapter.as_ref().map(|a| a.store())
    }

    pub fn add_or_update_time_slot(
        &mut self,
        start: &str,
        end: &str,
        editing: Option<&str>,
    ) -> PlannerResult<SlotChange> {
        let change = self.schedule.add_or_update_time_slot(start, end, editing)?;
        if change.is_mutation() {
            self.persist()?;
        }
        Ok(change)
    }

    pub fn delete_time_slot(&mut self, label: &str) -> PlannerResult<bool> {
        let deleted = self.schedule.delete_time_slot(label);
        if deleted {
            self.persist()?;
        }
        Ok(deleted)
    }

    pub fn upsert_event(&mut self, day: Day, time: &str, text: &str) -> PlannerResult<EventChange> {
        let change = self.schedule.upsert_event(day, time, text)?;
        if change.is_mutation() {
            self.persist()?;
        }
        Ok(change)
    }

    pub fn delete_event(&mut self, day: Day, time: &str) -> PlannerResult<bool> {
        let deleted = self.schedule.delete_event(day, time);
        if deleted {
            self.persist()?;
        }
        Ok(deleted)
    }

    pub fn find_event(&self, day: Day, time: &str) -> Option<&str> {
        self.schedule.find_event(day, time)
    }

    fn persist(&mut self) -> PlannerResult<()> {
        match &mut self.adapter {
            Some(adapter) => adapter.save(&self.schedule),
            None => Ok(()),
        }
    }
}
