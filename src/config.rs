use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RosterError, RosterResult};
use crate::schedule::{Person, Roster, ScoreWeights};

/// Environment variable pointing at a JSON config file
pub const CONFIG_ENV: &str = "ROSTER_CONFIG";

const DEFAULT_ROSTER: [&str; 5] = ["Seppie", "Rob", "Reinout", "Laurens", "Tobias"];
const DEFAULT_TOP_OPPONENTS: [&str; 3] = ["Ajax", "PSV", "Feyenoord"];
const DEFAULT_OPPONENTS: [&str; 17] = [
    "Ajax", "PSV", "Feyenoord", "AZ", "Twente", "Heerenveen", "Sparta", "NEC",
    "Go Ahead Eagles", "Fortuna Sittard", "Utrecht", "PEC Zwolle", "RKC Waalwijk",
    "Heracles Almelo", "Volendam", "Vitesse", "Almere City",
];

/// Season and planner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub roster: Vec<Person>,
    /// Opponents whose matches count as high-profile
    pub top_opponents: Vec<String>,
    /// Opponent rotation for the default fixture list
    pub opponents: Vec<String>,
    pub weights: ScoreWeights,
    /// Chance that a person is marked available in sample data
    pub availability_rate: f64,
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            roster: DEFAULT_ROSTER.iter().map(|n| Person::new(*n)).collect(),
            top_opponents: DEFAULT_TOP_OPPONENTS.iter().map(|s| s.to_string()).collect(),
            opponents: DEFAULT_OPPONENTS.iter().map(|s| s.to_string()).collect(),
            weights: ScoreWeights::default(),
            availability_rate: 0.75,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Reads and validates a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: PlannerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(path = %path.as_ref().display(), people = config.roster.len(), "loaded planner config");
        Ok(config)
    }

    /// Loads the file named by `ROSTER_CONFIG`, or the built-in defaults
    pub fn from_env() -> RosterResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> RosterResult<()> {
        let mut names = HashSet::new();
        for person in &self.roster {
            if person.name.trim().is_empty() {
                return Err(RosterError::InvalidConfig("roster contains an empty name".to_string()));
            }
            if !names.insert(person.name.as_str()) {
                return Err(RosterError::DuplicatePerson(person.name.clone()));
            }
            if let Some(opponent) = &person.preferred_opponent {
                if !self.is_top_opponent(opponent) {
                    return Err(RosterError::InvalidConfig(format!(
                        "{} prefers {}, which is not a top opponent",
                        person.name, opponent
                    )));
                }
            }
        }

        if self.opponents.is_empty() {
            return Err(RosterError::InvalidConfig("opponent list is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.availability_rate) {
            return Err(RosterError::InvalidConfig(format!(
                "availability rate {} is outside [0, 1]",
                self.availability_rate
            )));
        }
        Ok(())
    }

    pub fn is_top_opponent(&self, opponent: &str) -> bool {
        self.top_opponents.iter().any(|t| t == opponent)
    }

    pub fn build_roster(&self) -> RosterResult<Roster> {
        Roster::new(self.roster.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = PlannerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.roster.len(), 5);
        assert!(config.is_top_opponent("PSV"));
        assert!(!config.is_top_opponent("NEC"));
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"roster": [{{"name": "A", "preferred_opponent": "Ajax"}}, {{"name": "B"}}],
                "weights": {{"pair_drift_penalty": 80}}}}"#
        )
        .unwrap();

        let config = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(config.roster[0], Person::with_preference("A", "Ajax"));
        assert_eq!(config.weights.pair_drift_penalty, 80);
        assert_eq!(config.weights.high_profile, 10);
        assert_eq!(config.availability_rate, 0.75);
    }

    #[test]
    fn rejects_preference_outside_top_opponents() {
        let mut config = PlannerConfig::default();
        config.roster[0].preferred_opponent = Some("NEC".to_string());
        assert!(matches!(config.validate(), Err(RosterError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PlannerConfig::load("/nonexistent/roster.json").unwrap_err();
        assert!(matches!(err, RosterError::ConfigIo(_)));
    }
}
