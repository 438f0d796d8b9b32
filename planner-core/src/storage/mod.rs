//! Durable key-value storage the planner persists into.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::PlannerResult;

/// A string-to-string store, the only host facility the planner needs.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()>;
}
