use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::ledger::FairnessLedger;
use super::roster::{PersonIdx, Roster};
use super::types::Event;

/// Weights of the group score. Lower scores are fairer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per earlier high-profile assignment, on high-profile events only
    pub high_profile: i64,
    /// Subtracted per member who prefers this high-profile opponent
    pub preference_bonus: i64,
    /// Per earlier assignment on the same day type
    pub day_type: i64,
    /// Per earlier commit of the exact same group
    pub repeat_group: i64,
    /// Added per (pair, other person) whose pair counts drift too far apart
    pub pair_drift_penalty: i64,
    /// Largest pair-count difference that is still tolerated
    pub pair_drift_tolerance: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            high_profile: 10,
            preference_bonus: 15,
            day_type: 3,
            repeat_group: 2,
            pair_drift_penalty: 50,
            pair_drift_tolerance: 3,
        }
    }
}

/// Scores a candidate group for an event against the current ledger.
///
/// `group` must be in roster order: the drift check compares each pair
/// (a, b) against pairings of the earlier member `a` only.
pub fn score_group(
    group: &[PersonIdx],
    event: &Event,
    roster: &Roster,
    ledger: &FairnessLedger,
    weights: &ScoreWeights,
) -> i64 {
    let mut score: i64 = group.iter().map(|&p| i64::from(ledger.total(p))).sum();

    if event.high_profile {
        let high_profile: i64 = group.iter().map(|&p| i64::from(ledger.high_profile(p))).sum();
        score += weights.high_profile * high_profile;
        for &p in group {
            if roster.person(p).prefers(&event.opponent) {
                score -= weights.preference_bonus;
            }
        }
    }

    let same_day: i64 = group
        .iter()
        .map(|&p| i64::from(ledger.day_type(p, event.day_type)))
        .sum();
    score += weights.day_type * same_day;

    score += weights.repeat_group * i64::from(ledger.group_count(group));

    score += pair_drift(group, roster, ledger, weights);

    score
}

/// Penalty for pairings that run too far ahead of, or behind, the other
/// pairings of the same person. Counted once per violating triple.
fn pair_drift(
    group: &[PersonIdx],
    roster: &Roster,
    ledger: &FairnessLedger,
    weights: &ScoreWeights,
) -> i64 {
    let mut penalty = 0;
    for (&a, &b) in group.iter().tuple_combinations() {
        let current = ledger.pair_count(a, b);
        for x in (0..roster.len()).filter(|&x| x != a && x != b) {
            if current.abs_diff(ledger.pair_count(a, x)) > weights.pair_drift_tolerance {
                penalty += weights.pair_drift_penalty;
            }
        }
    }
    penalty
}
