use thiserror::Error;

use crate::schedule::EventId;

/// Errors raised when the caller hands the planner or resolver input that
/// breaks a precondition. Unfilled events and blocked withdrawals are not
/// errors; they show up as data in the schedule and proposal feed.
#[derive(Error, Debug, PartialEq)]
pub enum RosterError {
    #[error("unknown person: {0}")]
    UnknownPerson(String),

    #[error("duplicate person in roster: {0}")]
    DuplicatePerson(String),

    #[error("unknown event: {0}")]
    UnknownEvent(EventId),

    #[error("invalid day type: {0:?}")]
    InvalidDayType(String),

    #[error("no pending substitution for {person} at event {event}")]
    NoPendingSubstitution { event: EventId, person: String },

    #[error("no eligible replacement for {person} at event {event}")]
    NoCandidate { event: EventId, person: String },

    #[error("schedule has {schedule} entries but the season has {events} events")]
    ScheduleMismatch { schedule: usize, events: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    ConfigIo(String),
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::ConfigIo(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::InvalidConfig(err.to_string())
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
