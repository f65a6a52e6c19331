use std::collections::HashMap;

use itertools::Itertools;

use super::roster::PersonIdx;
use super::types::{DayType, Event};

/// Running fairness counters for one planning pass.
///
/// Owned by the planner for the duration of a pass and only grown by
/// `commit`. A new pass starts from `FairnessLedger::new`, never from the
/// ledger of an earlier pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FairnessLedger {
    totals: Vec<u32>,
    high_profile: Vec<u32>,
    day_types: HashMap<(PersonIdx, DayType), u32>,
    // keyed by the sorted member list of the exact committed group
    groups: HashMap<Vec<PersonIdx>, u32>,
    // every 2-element sub-pair of every committed group, (low, high)
    pairs: HashMap<(PersonIdx, PersonIdx), u32>,
}

impl FairnessLedger {
    pub fn new(roster_len: usize) -> Self {
        FairnessLedger {
            totals: vec![0; roster_len],
            high_profile: vec![0; roster_len],
            day_types: HashMap::new(),
            groups: HashMap::new(),
            pairs: HashMap::new(),
        }
    }

    pub fn roster_len(&self) -> usize {
        self.totals.len()
    }

    pub fn total(&self, person: PersonIdx) -> u32 {
        self.totals[person]
    }

    pub fn high_profile(&self, person: PersonIdx) -> u32 {
        self.high_profile[person]
    }

    pub fn day_type(&self, person: PersonIdx, day_type: DayType) -> u32 {
        self.day_types.get(&(person, day_type)).copied().unwrap_or(0)
    }

    /// How often exactly this set of people has been committed together
    pub fn group_count(&self, group: &[PersonIdx]) -> u32 {
        self.groups.get(&group_key(group)).copied().unwrap_or(0)
    }

    /// How often `a` and `b` have shared any committed group
    pub fn pair_count(&self, a: PersonIdx, b: PersonIdx) -> u32 {
        self.pairs.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&Vec<PersonIdx>, u32)> {
        self.groups.iter().map(|(k, v)| (k, *v))
    }

    pub fn pairs(&self) -> impl Iterator<Item = ((PersonIdx, PersonIdx), u32)> + '_ {
        self.pairs.iter().map(|(k, v)| (*k, *v))
    }

    /// Records a finalized group for an event
    pub fn commit(&mut self, group: &[PersonIdx], event: &Event) {
        for &person in group {
            self.totals[person] += 1;
            if event.high_profile {
                self.high_profile[person] += 1;
            }
            *self.day_types.entry((person, event.day_type)).or_insert(0) += 1;
        }

        *self.groups.entry(group_key(group)).or_insert(0) += 1;

        for (a, b) in group.iter().tuple_combinations() {
            *self.pairs.entry(pair_key(*a, *b)).or_insert(0) += 1;
        }
    }
}

fn group_key(group: &[PersonIdx]) -> Vec<PersonIdx> {
    let mut key = group.to_vec();
    key.sort_unstable();
    key
}

fn pair_key(a: PersonIdx, b: PersonIdx) -> (PersonIdx, PersonIdx) {
    if a <= b { (a, b) } else { (b, a) }
}
