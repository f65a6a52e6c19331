use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::error::{RosterError, RosterResult};
use super::availability::AvailabilityBook;
use super::ledger::FairnessLedger;
use super::roster::{PersonIdx, Roster};
use super::scoring::{score_group, ScoreWeights};
use super::types::{Assignment, Event, Schedule};

/// Group sizes in order of preference. A smaller size is only tried when
/// too few people are eligible for the larger one.
const GROUP_SIZES: [usize; 2] = [3, 2];

/// Result of one full planning pass
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub schedule: Schedule,
    pub ledger: FairnessLedger,
}

/// Plans every event in the given order, starting from an empty ledger.
///
/// Events are never re-sorted: each commit changes the scores of every
/// later event.
pub fn plan_season(
    events: &[Event],
    roster: &Roster,
    book: &AvailabilityBook,
    weights: &ScoreWeights,
) -> RosterResult<PlanOutcome> {
    if book.event_count() != events.len() {
        return Err(RosterError::ScheduleMismatch {
            schedule: book.event_count(),
            events: events.len(),
        });
    }

    let mut ledger = FairnessLedger::new(roster.len());
    let mut assignments = Vec::with_capacity(events.len());

    for (event_id, event) in events.iter().enumerate() {
        let eligible = book.eligible(event_id, roster);

        match pick_group(&eligible, event, roster, &ledger, weights) {
            Some((group, score)) => {
                ledger.commit(&group, event);
                let names = roster.names_in_order(&group);
                debug!(event = event_id, opponent = %event.opponent, score, group = ?names, "committed group");
                assignments.push(Assignment::Group(names));
            }
            None => {
                warn!(event = event_id, opponent = %event.opponent, eligible = eligible.len(), "no one available");
                assignments.push(Assignment::NoOneAvailable);
            }
        }
    }

    let filled = assignments.iter().filter(|a| a.is_filled()).count();
    info!(events = events.len(), filled, "planning pass complete");

    Ok(PlanOutcome {
        schedule: Schedule::new(assignments),
        ledger,
    })
}

/// Picks the lowest-scoring group for one event.
///
/// Only the largest feasible size is enumerated. Ties keep the first group
/// in combination order, so roster order decides between equal scores.
pub fn pick_group(
    eligible: &[PersonIdx],
    event: &Event,
    roster: &Roster,
    ledger: &FairnessLedger,
    weights: &ScoreWeights,
) -> Option<(Vec<PersonIdx>, i64)> {
    let size = GROUP_SIZES.into_iter().find(|&size| eligible.len() >= size)?;

    let mut best: Option<(Vec<PersonIdx>, i64)> = None;
    for group in eligible.iter().copied().combinations(size) {
        let score = score_group(&group, event, roster, ledger, weights);
        if best.as_ref().map_or(true, |(_, best_score)| score < *best_score) {
            best = Some((group, score));
        }
    }
    best
}
