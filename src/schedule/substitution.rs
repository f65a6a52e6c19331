use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{RosterError, RosterResult};
use super::availability::AvailabilityBook;
use super::roster::{PersonIdx, Roster};
use super::types::{Assignment, EventId, Schedule};

/// One withdrawn person still sitting in a committed group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSubstitution {
    pub event: EventId,
    pub withdrawn: String,
    /// `None` while nobody eligible is left to step in
    pub replacement: Option<String>,
}

/// Applied substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub event: EventId,
    pub withdrawn: String,
    pub replacement: String,
}

/// Proposals keyed by (event, withdrawn person).
///
/// A proposal is written once and then reused, even if assignment counts
/// change later. It is only replaced when the proposed person can no longer
/// step in at all.
#[derive(Debug, Clone, Default)]
pub struct ProposalCache {
    proposals: HashMap<(EventId, String), String>,
}

impl ProposalCache {
    pub fn get(&self, event: EventId, withdrawn: &str) -> Option<&str> {
        self.proposals
            .get(&(event, withdrawn.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    fn insert(&mut self, event: EventId, withdrawn: &str, replacement: String) {
        self.proposals
            .entry((event, withdrawn.to_string()))
            .or_insert(replacement);
    }

    fn evict(&mut self, event: EventId, withdrawn: &str) {
        self.proposals.remove(&(event, withdrawn.to_string()));
    }
}

/// Repairs a committed schedule after people withdraw.
///
/// Lives across planning passes and evaluations so proposals stay stable.
/// Never touches the fairness ledger: a substitution is a repair, not a new
/// assignment decision.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionResolver {
    cache: ProposalCache,
}

impl SubstitutionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &ProposalCache {
        &self.cache
    }

    /// Walks every event and builds the proposal feed
    pub fn evaluate(
        &mut self,
        schedule: &Schedule,
        roster: &Roster,
        book: &AvailabilityBook,
    ) -> RosterResult<Vec<PendingSubstitution>> {
        let mut feed = Vec::new();
        for event in 0..schedule.len() {
            feed.extend(self.evaluate_event(event, schedule, roster, book)?);
        }
        Ok(feed)
    }

    /// Pending substitutions for one event, withdrawn people in roster order
    pub fn evaluate_event(
        &mut self,
        event: EventId,
        schedule: &Schedule,
        roster: &Roster,
        book: &AvailabilityBook,
    ) -> RosterResult<Vec<PendingSubstitution>> {
        let assignment = schedule.get(event).ok_or(RosterError::UnknownEvent(event))?;
        let mut withdrawn = roster.indices_of(assignment.members())?;
        withdrawn.retain(|&p| book.is_withdrawn(event, p));
        withdrawn.sort_unstable();

        let mut feed = Vec::with_capacity(withdrawn.len());
        for person in withdrawn {
            let name = roster.name(person).to_string();
            let replacement = self.propose(event, &name, schedule, roster, book)?;
            feed.push(PendingSubstitution {
                event,
                withdrawn: name,
                replacement,
            });
        }
        Ok(feed)
    }

    /// Cached proposal for (event, withdrawn), computing it if needed
    pub fn propose(
        &mut self,
        event: EventId,
        withdrawn: &str,
        schedule: &Schedule,
        roster: &Roster,
        book: &AvailabilityBook,
    ) -> RosterResult<Option<String>> {
        let assignment = schedule.get(event).ok_or(RosterError::UnknownEvent(event))?;
        let pool = candidate_pool(event, assignment, roster, book);

        if let Some(cached) = self.cache.get(event, withdrawn) {
            let still_valid = roster
                .index_of(cached)
                .map_or(false, |idx| pool.contains(&idx));
            if still_valid {
                return Ok(Some(cached.to_string()));
            }
            debug!(event, withdrawn, replacement = cached, "cached proposal can no longer step in");
            self.cache.evict(event, withdrawn);
        }

        match least_assigned(&pool, schedule, roster) {
            Some(idx) => {
                let replacement = roster.name(idx).to_string();
                debug!(event, withdrawn, replacement = %replacement, "new substitution proposal");
                self.cache.insert(event, withdrawn, replacement.clone());
                Ok(Some(replacement))
            }
            None => {
                warn!(event, withdrawn, "withdrawal blocked, no replacement available");
                Ok(None)
            }
        }
    }

    /// Applies the proposal for (event, withdrawn) to the schedule.
    ///
    /// The cache entry is kept after acceptance.
    pub fn accept(
        &mut self,
        event: EventId,
        withdrawn: &str,
        schedule: &mut Schedule,
        roster: &Roster,
        book: &AvailabilityBook,
    ) -> RosterResult<Substitution> {
        let withdrawn_idx = roster.require(withdrawn)?;
        let assignment = schedule.get(event).ok_or(RosterError::UnknownEvent(event))?;
        if !assignment.contains(withdrawn) || !book.is_withdrawn(event, withdrawn_idx) {
            return Err(RosterError::NoPendingSubstitution {
                event,
                person: withdrawn.to_string(),
            });
        }

        let replacement = self
            .propose(event, withdrawn, schedule, roster, book)?
            .ok_or_else(|| RosterError::NoCandidate {
                event,
                person: withdrawn.to_string(),
            })?;

        let assignment = schedule.get_mut(event).ok_or(RosterError::UnknownEvent(event))?;
        let mut members = roster.indices_of(assignment.members())?;
        members.retain(|&p| p != withdrawn_idx);
        members.push(roster.require(&replacement)?);
        *assignment = Assignment::Group(roster.names_in_order(&members));

        info!(event, withdrawn, replacement = %replacement, "substitution accepted");
        Ok(Substitution {
            event,
            withdrawn: withdrawn.to_string(),
            replacement,
        })
    }
}

/// Roster members who could step in: available, not withdrawn and not
/// already in the group. Roster order.
fn candidate_pool(
    event: EventId,
    assignment: &Assignment,
    roster: &Roster,
    book: &AvailabilityBook,
) -> Vec<PersonIdx> {
    book.eligible(event, roster)
        .into_iter()
        .filter(|&p| !assignment.contains(roster.name(p)))
        .collect()
}

/// First candidate with the lowest assignment count across the schedule
fn least_assigned(pool: &[PersonIdx], schedule: &Schedule, roster: &Roster) -> Option<PersonIdx> {
    let mut best: Option<(PersonIdx, usize)> = None;
    for &candidate in pool {
        let count = schedule.assignment_count(roster.name(candidate));
        if best.map_or(true, |(_, min)| count < min) {
            best = Some((candidate, count));
        }
    }
    best.map(|(idx, _)| idx)
}
