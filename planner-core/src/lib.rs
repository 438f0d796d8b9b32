//! Core of the weekly planner.
//!
//! - [`schedule`]: time slots and the events assigned to (day, slot) cells
//! - [`persistence`] and [`storage`]: mirroring a schedule into key-value storage
//! - [`planner`]: a session tying the two together
//! - [`config`]: global configuration

pub mod config;
pub mod day;
pub mod error;
pub mod persistence;
pub mod planner;
pub mod schedule;
pub mod storage;
pub mod time_slot;

pub use day::{Day, DaySet};
pub use error::{PlannerError, PlannerResult};
pub use planner::Planner;
pub use schedule::{EventChange, EventRecord, Schedule, SlotChange};
