//! Days of the week and the day sets that make up a planner's columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A column of the planner grid.
///
/// Serialized by its full English name (`"Monday"`), which is also the
/// form stored in persisted event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Day {
    type Err = PlannerError;

    /// Accepts full names and common abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Day::Monday,
            "tuesday" | "tue" | "tues" => Day::Tuesday,
            "wednesday" | "wed" => Day::Wednesday,
            "thursday" | "thu" | "thur" | "thurs" => Day::Thursday,
            "friday" | "fri" => Day::Friday,
            "saturday" | "sat" => Day::Saturday,
            "sunday" | "sun" => Day::Sunday,
            _ => return Err(PlannerError::UnknownDay(s.to_string())),
        };
        Ok(day)
    }
}

/// Which days a planner shows as columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySet {
    /// Monday through Sunday.
    Week,
    /// Saturday and Sunday.
    #[default]
    Weekend,
}

impl DaySet {
    pub fn days(&self) -> &'static [Day] {
        match self {
            DaySet::Week => &Day::ALL,
            DaySet::Weekend => &[Day::Saturday, Day::Sunday],
        }
    }

    pub fn contains(&self, day: Day) -> bool {
        self.days().contains(&day)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DaySet::Week => write!(f, "week"),
            DaySet::Weekend => write!(f, "weekend"),
        }
    }
}

impl FromStr for DaySet {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "full" => Ok(DaySet::Week),
            "weekend" => Ok(DaySet::Weekend),
            _ => Err(PlannerError::Config(format!(
                "Unknown day set '{}'. Expected 'week' or 'weekend'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_names_and_abbreviations() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("sat".parse::<Day>().unwrap(), Day::Saturday);
        assert_eq!("THURS".parse::<Day>().unwrap(), Day::Thursday);
        assert_eq!(" sunday ".parse::<Day>().unwrap(), Day::Sunday);
    }

    #[test]
    fn parse_unknown_day_fails() {
        assert!(matches!(
            "someday".parse::<Day>(),
            Err(PlannerError::UnknownDay(_))
        ));
    }

    #[test]
    fn weekend_is_saturday_and_sunday() {
        assert_eq!(DaySet::Weekend.days(), &[Day::Saturday, Day::Sunday]);
        assert!(!DaySet::Weekend.contains(Day::Monday));
        assert_eq!(DaySet::Week.days().len(), 7);
    }

    #[test]
    fn day_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Day::Friday).unwrap(), "\"Friday\"");
        assert_eq!(
            serde_json::from_str::<Day>("\"Tuesday\"").unwrap(),
            Day::Tuesday
        );
    }
}
