use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Position of an event in the season's canonical event list
pub type EventId = usize;

/// Category of the day a match falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Friday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Friday, DayType::Saturday, DayType::Sunday];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Friday => "friday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = RosterError;

    /// Accepts the full name, the three-letter abbreviation, or the
    /// Dutch shorthand used by the old planning sheets ("vr", "za", "zo").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friday" | "fri" | "vr" => Ok(DayType::Friday),
            "saturday" | "sat" | "za" => Ok(DayType::Saturday),
            "sunday" | "sun" | "zo" => Ok(DayType::Sunday),
            _ => Err(RosterError::InvalidDayType(s.to_string())),
        }
    }
}

/// A roster member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// High-profile opponent this person would most like to attend
    #[serde(default)]
    pub preferred_opponent: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            preferred_opponent: None,
        }
    }

    pub fn with_preference(name: impl Into<String>, opponent: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            preferred_opponent: Some(opponent.into()),
        }
    }

    pub fn prefers(&self, opponent: &str) -> bool {
        self.preferred_opponent.as_deref() == Some(opponent)
    }
}

/// One scheduled match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub opponent: String,
    pub day_type: DayType,
    pub high_profile: bool,
}

/// Outcome of planning a single event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "people", rename_all = "snake_case")]
pub enum Assignment {
    /// Committed group, kept in roster order
    Group(Vec<String>),
    /// Fewer than two people could attend
    NoOneAvailable,
}

impl Assignment {
    pub fn members(&self) -> &[String] {
        match self {
            Assignment::Group(members) => members,
            Assignment::NoOneAvailable => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members().iter().any(|m| m == name)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Assignment::Group(_))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Group(members) => f.write_str(&members.join(", ")),
            Assignment::NoOneAvailable => f.write_str("NO ONE AVAILABLE"),
        }
    }
}

/// Assignment table: one entry per event, aligned with the event list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Schedule { assignments }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn get(&self, event: EventId) -> Option<&Assignment> {
        self.assignments.get(event)
    }

    pub fn get_mut(&mut self, event: EventId) -> Option<&mut Assignment> {
        self.assignments.get_mut(event)
    }

    /// Number of events this person currently appears in, by full scan
    pub fn assignment_count(&self, name: &str) -> usize {
        self.assignments.iter().filter(|a| a.contains(name)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventId, &Assignment)> {
        self.assignments.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_type_parses_known_spellings() {
        assert_eq!("Friday".parse::<DayType>().unwrap(), DayType::Friday);
        assert_eq!("za".parse::<DayType>().unwrap(), DayType::Saturday);
        assert_eq!(" sun ".parse::<DayType>().unwrap(), DayType::Sunday);
    }

    #[test]
    fn malformed_day_type_is_rejected() {
        let err = "monday".parse::<DayType>().unwrap_err();
        assert_eq!(err, RosterError::InvalidDayType("monday".to_string()));
    }

    #[test]
    fn assignment_count_scans_whole_schedule() {
        let schedule = Schedule::new(vec![
            Assignment::Group(vec!["Rob".into(), "Tobias".into()]),
            Assignment::NoOneAvailable,
            Assignment::Group(vec!["Rob".into(), "Laurens".into(), "Seppie".into()]),
        ]);
        assert_eq!(schedule.assignment_count("Rob"), 2);
        assert_eq!(schedule.assignment_count("Laurens"), 1);
        // Exact membership, not substring matching
        assert_eq!(schedule.assignment_count("Ro"), 0);
    }

    #[test]
    fn sentinel_renders_as_unfilled() {
        assert_eq!(Assignment::NoOneAvailable.to_string(), "NO ONE AVAILABLE");
        assert!(!Assignment::NoOneAvailable.is_filled());
        assert!(Assignment::NoOneAvailable.members().is_empty());
    }
}
