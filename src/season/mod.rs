pub mod fixtures;

pub use fixtures::{default_fixtures, sample_availability, sample_preferences};

use rand::Rng;
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::{RosterError, RosterResult};
use crate::schedule::{
    plan_season, AvailabilityBook, Event, EventId, FairnessLedger, PendingSubstitution, Roster,
    Schedule, ScoreWeights, Substitution, SubstitutionResolver,
};
use crate::summary::{self, FairnessSummary};

/// Everything known about one season: who, when, who can come, and the
/// current schedule.
///
/// `plan` always runs a fresh pass from an empty ledger. The substitution
/// resolver outlives planning passes so its proposals stay stable.
#[derive(Debug, Clone)]
pub struct Season {
    roster: Roster,
    events: Vec<Event>,
    book: AvailabilityBook,
    weights: ScoreWeights,
    schedule: Option<Schedule>,
    ledger: Option<FairnessLedger>,
    resolver: SubstitutionResolver,
}

impl Season {
    pub fn new(roster: Roster, events: Vec<Event>, weights: ScoreWeights) -> Self {
        let book = AvailabilityBook::new(events.len());
        Season {
            roster,
            events,
            book,
            weights,
            schedule: None,
            ledger: None,
            resolver: SubstitutionResolver::new(),
        }
    }

    /// Default fixtures for the configured roster, nobody available yet
    pub fn from_config(config: &PlannerConfig) -> RosterResult<Self> {
        config.validate()?;
        let roster = config.build_roster()?;
        let events = default_fixtures(config)?;
        Ok(Season::new(roster, events, config.weights.clone()))
    }

    /// Default fixtures with randomly filled availability and preferences
    pub fn sample<R: Rng>(config: &PlannerConfig, rng: &mut R) -> RosterResult<Self> {
        let mut season = Season::from_config(config)?;
        season.book = sample_availability(&season.roster, season.events.len(), config.availability_rate, rng)?;
        sample_preferences(&mut season.roster, &config.top_opponents, rng)?;
        Ok(season)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn book(&self) -> &AvailabilityBook {
        &self.book
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Ledger of the most recent planning pass
    pub fn ledger(&self) -> Option<&FairnessLedger> {
        self.ledger.as_ref()
    }

    pub fn resolver(&self) -> &SubstitutionResolver {
        &self.resolver
    }

    pub fn set_available(&mut self, event: EventId, name: &str, available: bool) -> RosterResult<()> {
        let person = self.roster.require(name)?;
        self.book.set_available(event, person, available)
    }

    pub fn set_withdrawn(&mut self, event: EventId, name: &str, withdrawn: bool) -> RosterResult<()> {
        let person = self.roster.require(name)?;
        self.book.set_withdrawn(event, person, withdrawn)
    }

    pub fn set_preference(&mut self, name: &str, opponent: Option<String>) -> RosterResult<()> {
        self.roster.set_preference(name, opponent)
    }

    /// Runs a new planning pass and replaces the current schedule.
    ///
    /// On error the previous schedule and ledger stay as they were.
    pub fn plan(&mut self) -> RosterResult<&Schedule> {
        let outcome = plan_season(&self.events, &self.roster, &self.book, &self.weights)?;
        self.ledger = Some(outcome.ledger);
        Ok(&*self.schedule.insert(outcome.schedule))
    }

    /// Proposal feed for the current schedule; empty before the first plan
    pub fn proposals(&mut self) -> RosterResult<Vec<PendingSubstitution>> {
        match &self.schedule {
            Some(schedule) => self.resolver.evaluate(schedule, &self.roster, &self.book),
            None => Ok(Vec::new()),
        }
    }

    pub fn accept(&mut self, event: EventId, withdrawn: &str) -> RosterResult<Substitution> {
        let schedule = self.schedule.as_mut().ok_or_else(|| RosterError::NoPendingSubstitution {
            event,
            person: withdrawn.to_string(),
        })?;
        let substitution = self.resolver.accept(event, withdrawn, schedule, &self.roster, &self.book)?;
        info!(event, withdrawn, replacement = %substitution.replacement, "season schedule repaired");
        Ok(substitution)
    }

    /// Overview of the current schedule, counted from the table itself
    pub fn summary(&self) -> RosterResult<Option<FairnessSummary>> {
        self.schedule
            .as_ref()
            .map(|schedule| summary::summarize(schedule, &self.events, &self.roster))
            .transpose()
    }
}
