use chrono::{NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PlannerConfig;
use crate::error::{RosterError, RosterResult};
use crate::schedule::{AvailabilityBook, DayType, Event, Roster};

/// Matches are played every week, four per month, starting in August
const FIRST_MONTH: u32 = 8;
const MATCHES_PER_MONTH: usize = 4;
const KICK_OFF: (u32, u32) = (14, 30);

/// Builds the default season: one match per opponent in rotation order.
///
/// Match i falls on day 3 + 7*(i % 4) of month 8 + i / 4, day types cycle
/// Friday, Saturday, Sunday, and matches against a top opponent are
/// high-profile.
pub fn default_fixtures(config: &PlannerConfig) -> RosterResult<Vec<Event>> {
    let time = NaiveTime::from_hms_opt(KICK_OFF.0, KICK_OFF.1, 0)
        .ok_or_else(|| RosterError::InvalidConfig("invalid kick-off time".to_string()))?;

    config
        .opponents
        .iter()
        .enumerate()
        .map(|(i, opponent)| {
            let month = FIRST_MONTH + (i / MATCHES_PER_MONTH) as u32;
            let day = 3 + 7 * (i % MATCHES_PER_MONTH) as u32;
            let date = NaiveDate::from_ymd_opt(2025, month, day).ok_or_else(|| {
                RosterError::InvalidConfig(format!("too many opponents for one season: {}", config.opponents.len()))
            })?;

            Ok(Event {
                date,
                time,
                opponent: opponent.clone(),
                day_type: DayType::ALL[i % DayType::ALL.len()],
                high_profile: config.is_top_opponent(opponent),
            })
        })
        .collect()
}

/// Marks each (event, person) available with probability `rate`
pub fn sample_availability<R: Rng>(roster: &Roster, event_count: usize, rate: f64, rng: &mut R) -> RosterResult<AvailabilityBook> {
    let mut book = AvailabilityBook::new(event_count);
    for person in 0..roster.len() {
        for event in 0..event_count {
            if rng.gen::<f64>() < rate {
                book.set_available(event, person, true)?;
            }
        }
    }
    Ok(book)
}

/// Draws a random preferred opponent (or none) for everyone who has not
/// picked one yet
pub fn sample_preferences<R: Rng>(roster: &mut Roster, top_opponents: &[String], rng: &mut R) -> RosterResult<()> {
    let mut choices: Vec<Option<String>> = top_opponents.iter().cloned().map(Some).collect();
    choices.push(None);

    let undecided: Vec<String> = roster
        .people()
        .iter()
        .filter(|p| p.preferred_opponent.is_none())
        .map(|p| p.name.clone())
        .collect();

    for name in undecided {
        let choice = choices.choose(rng).cloned().flatten();
        roster.set_preference(&name, choice)?;
    }
    Ok(())
}
