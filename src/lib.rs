//! Fair match roster planning.
//!
//! Assigns a small roster to a season of matches, balancing workload,
//! high-profile exposure, day-of-week burden and pairings, and repairs the
//! published schedule when people withdraw.

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod schedule;
pub mod season;
pub mod summary;
pub mod web;

pub use config::PlannerConfig;
pub use error::{RosterError, RosterResult};
pub use season::Season;
