use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::schedule::{DayType, Event, EventId, FairnessLedger, Roster, Schedule};

/// Counters of one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonTally {
    pub name: String,
    pub total: u32,
    pub high_profile: u32,
    pub per_day_type: BTreeMap<DayType, u32>,
}

/// How often two people attended together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairTally {
    pub first: String,
    pub second: String,
    pub count: u32,
}

/// Fairness overview in roster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FairnessSummary {
    pub people: Vec<PersonTally>,
    pub pairs: Vec<PairTally>,
}

impl FairnessSummary {
    pub fn from_ledger(ledger: &FairnessLedger, roster: &Roster) -> Self {
        let people = (0..roster.len())
            .map(|p| PersonTally {
                name: roster.name(p).to_string(),
                total: ledger.total(p),
                high_profile: ledger.high_profile(p),
                per_day_type: DayType::ALL
                    .iter()
                    .map(|&d| (d, ledger.day_type(p, d)))
                    .collect(),
            })
            .collect();

        let mut pairs: Vec<_> = ledger.pairs().filter(|(_, count)| *count > 0).collect();
        pairs.sort_unstable();
        let pairs = pairs
            .into_iter()
            .map(|((a, b), count)| PairTally {
                first: roster.name(a).to_string(),
                second: roster.name(b).to_string(),
                count,
            })
            .collect();

        FairnessSummary { people, pairs }
    }

    pub fn person(&self, name: &str) -> Option<&PersonTally> {
        self.people.iter().find(|p| p.name == name)
    }
}

/// Rebuilds the counters from the assignment table alone.
///
/// Used for the overview of a final (possibly substituted) schedule, and to
/// check that a planning pass left no drift between its ledger and its table.
pub fn replay(schedule: &Schedule, events: &[Event], roster: &Roster) -> RosterResult<FairnessLedger> {
    if schedule.len() != events.len() {
        return Err(RosterError::ScheduleMismatch {
            schedule: schedule.len(),
            events: events.len(),
        });
    }

    let mut ledger = FairnessLedger::new(roster.len());
    for (event_id, assignment) in schedule.iter() {
        if assignment.is_filled() {
            let group = roster.indices_of(assignment.members())?;
            ledger.commit(&group, &events[event_id]);
        }
    }
    Ok(ledger)
}

pub fn summarize(schedule: &Schedule, events: &[Event], roster: &Roster) -> RosterResult<FairnessSummary> {
    let ledger = replay(schedule, events, roster)?;
    Ok(FairnessSummary::from_ledger(&ledger, roster))
}

/// Events left without a group
pub fn unfilled_events(schedule: &Schedule) -> Vec<EventId> {
    schedule
        .iter()
        .filter(|(_, a)| !a.is_filled())
        .map(|(id, _)| id)
        .collect()
}
