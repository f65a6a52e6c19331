pub mod types;
pub mod roster;
pub mod availability;
pub mod ledger;
pub mod scoring;
pub mod planner;
pub mod substitution;

pub use types::{Assignment, DayType, Event, EventId, Person, Schedule};
pub use roster::{PersonIdx, Roster};
pub use availability::AvailabilityBook;
pub use ledger::FairnessLedger;
pub use scoring::{score_group, ScoreWeights};
pub use planner::{pick_group, plan_season, PlanOutcome};
pub use substitution::{PendingSubstitution, ProposalCache, Substitution, SubstitutionResolver};
