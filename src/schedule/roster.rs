use std::collections::HashSet;

use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use super::types::Person;

/// Index of a person in roster order
pub type PersonIdx = usize;

/// Fixed, ordered set of people. Roster order drives every enumeration and
/// tie-break in the planner and resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate names
    pub fn new(people: Vec<Person>) -> RosterResult<Self> {
        let mut seen = HashSet::new();
        for person in &people {
            if !seen.insert(person.name.as_str()) {
                return Err(RosterError::DuplicatePerson(person.name.clone()));
            }
        }
        Ok(Roster { people })
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, idx: PersonIdx) -> &Person {
        &self.people[idx]
    }

    pub fn name(&self, idx: PersonIdx) -> &str {
        &self.people[idx].name
    }

    pub fn index_of(&self, name: &str) -> Option<PersonIdx> {
        self.people.iter().position(|p| p.name == name)
    }

    /// Like `index_of`, but an unknown name is a caller error
    pub fn require(&self, name: &str) -> RosterResult<PersonIdx> {
        self.index_of(name)
            .ok_or_else(|| RosterError::UnknownPerson(name.to_string()))
    }

    pub fn set_preference(&mut self, name: &str, opponent: Option<String>) -> RosterResult<()> {
        let idx = self.require(name)?;
        self.people[idx].preferred_opponent = opponent;
        Ok(())
    }

    /// Names for the given indices, in roster order
    pub fn names_in_order(&self, members: &[PersonIdx]) -> Vec<String> {
        let mut sorted = members.to_vec();
        sorted.sort_unstable();
        sorted.into_iter().map(|idx| self.name(idx).to_string()).collect()
    }

    /// Resolves a group of names back to roster indices
    pub fn indices_of(&self, names: &[String]) -> RosterResult<Vec<PersonIdx>> {
        names.iter().map(|name| self.require(name)).collect()
    }
}
