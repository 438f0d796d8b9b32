use anyhow::Result;
use planner_core::Planner;
use planner_core::persistence::StoredEvent;
use planner_core::storage::KeyValueStore;
use serde::Serialize;

use crate::render::Render;

#[derive(Serialize)]
struct ScheduleJson<'a> {
    days: Vec<&'static str>,
    time_slots: Vec<&'a str>,
    events: Vec<StoredEvent>,
}

pub fn run<S: KeyValueStore>(planner: &Planner<S>, json: bool) -> Result<()> {
    let schedule = planner.schedule();

    if json {
        let out = ScheduleJson {
            days: schedule.days().iter().map(|d| d.name()).collect(),
            time_slots: schedule.labels(),
            events: schedule
                .labeled_events()
                .map(|(day, time, text)| StoredEvent {
                    day: day.to_string(),
                    time: time.to_string(),
                    event: text.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", schedule.render());
    Ok(())
}
