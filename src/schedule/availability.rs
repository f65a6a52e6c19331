use std::collections::HashSet;

use crate::error::{RosterError, RosterResult};
use super::roster::{PersonIdx, Roster};
use super::types::EventId;

/// Per-(event, person) availability and withdrawal flags.
///
/// The two flags are independent: someone can be available and withdrawn
/// at the same time. Only "available and not withdrawn" counts as eligible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityBook {
    event_count: usize,
    available: HashSet<(EventId, PersonIdx)>,
    withdrawn: HashSet<(EventId, PersonIdx)>,
}

impl AvailabilityBook {
    pub fn new(event_count: usize) -> Self {
        AvailabilityBook {
            event_count,
            ..Default::default()
        }
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    fn check_event(&self, event: EventId) -> RosterResult<()> {
        if event < self.event_count {
            Ok(())
        } else {
            Err(RosterError::UnknownEvent(event))
        }
    }

    pub fn set_available(&mut self, event: EventId, person: PersonIdx, available: bool) -> RosterResult<()> {
        self.check_event(event)?;
        if available {
            self.available.insert((event, person));
        } else {
            self.available.remove(&(event, person));
        }
        Ok(())
    }

    pub fn set_withdrawn(&mut self, event: EventId, person: PersonIdx, withdrawn: bool) -> RosterResult<()> {
        self.check_event(event)?;
        if withdrawn {
            self.withdrawn.insert((event, person));
        } else {
            self.withdrawn.remove(&(event, person));
        }
        Ok(())
    }

    pub fn is_available(&self, event: EventId, person: PersonIdx) -> bool {
        self.available.contains(&(event, person))
    }

    pub fn is_withdrawn(&self, event: EventId, person: PersonIdx) -> bool {
        self.withdrawn.contains(&(event, person))
    }

    pub fn is_eligible(&self, event: EventId, person: PersonIdx) -> bool {
        self.is_available(event, person) && !self.is_withdrawn(event, person)
    }

    /// Eligible people for an event, in roster order
    pub fn eligible(&self, event: EventId, roster: &Roster) -> Vec<PersonIdx> {
        (0..roster.len())
            .filter(|&p| self.is_eligible(event, p))
            .collect()
    }
}
