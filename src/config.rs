//! Run configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use u_roster::config::RosterConfig;
//!
//! let config = RosterConfig::from_json_str(r#"{"ga": {"max_generations": 50}}"#).unwrap();
//! assert_eq!(config.ga.max_generations, 50);
//! assert_eq!(config.ga.population_size, 200);
//! assert_eq!(config.acceptance_threshold, -99);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::ga::{FitnessWeights, GaConfig};
use crate::models::DEFAULT_TRAVEL_MINUTES;

/// Fitness below this fails the run.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: i64 = -99;

/// Configuration of a rostering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Search parameters.
    pub ga: GaConfig,
    /// Fitness weights and transfer buffer.
    pub fitness: FitnessWeights,
    /// Travel time (minutes) assumed for location pairs without an edge.
    pub default_travel_minutes: f64,
    /// Runs whose best fitness is below this fail with
    /// [`ScheduleError::SchedulingFailure`].
    pub acceptance_threshold: i64,
    /// Wall-clock limit for background jobs in milliseconds. `None` means
    /// no limit.
    pub timeout_ms: Option<u64>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            fitness: FitnessWeights::default(),
            default_travel_minutes: DEFAULT_TRAVEL_MINUTES,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            timeout_ms: None,
        }
    }
}

impl RosterConfig {
    /// Parses a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScheduleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_fitness(mut self, fitness: FitnessWeights) -> Self {
        self.fitness = fitness;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self
    }

    pub fn with_default_travel_minutes(mut self, minutes: f64) -> Self {
        self.default_travel_minutes = minutes;
        self
    }

    pub fn with_acceptance_threshold(mut self, threshold: i64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        // Sub-millisecond limits round up so only an explicit zero is rejected.
        self.timeout_ms = Some(if timeout.is_zero() { 0 } else { millis.max(1) });
        self
    }

    /// Job timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.ga.validate()?;
        if !self.default_travel_minutes.is_finite() || self.default_travel_minutes < 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "default_travel_minutes must be a non-negative number, got {}",
                self.default_travel_minutes
            )));
        }
        let buffer = self.fitness.handling_buffer_minutes;
        if !buffer.is_finite() || buffer < 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "handling_buffer_minutes must be a non-negative number, got {buffer}"
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ScheduleError::InvalidConfig(
                "timeout_ms must be at least 1".into(),
            ));
        }
        if self.fitness.balance_penalty < 0 || self.fitness.overlap_penalty < 0 {
            return Err(ScheduleError::InvalidConfig(
                "penalties must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RosterConfig::default();
        assert_eq!(c.default_travel_minutes, 30.0);
        assert_eq!(c.acceptance_threshold, -99);
        assert_eq!(c.fitness.overlap_penalty, 100);
        assert_eq!(c.fitness.balance_penalty, 1);
        assert_eq!(c.fitness.handling_buffer_minutes, 10.0);
        assert_eq!(c.timeout(), None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(RosterConfig::from_json_str("{}").unwrap(), RosterConfig::default());
    }

    #[test]
    fn test_nested_overrides() {
        let c = RosterConfig::from_json_str(
            r#"{
                "ga": {"population_size": 40, "mutation_type": "per_position"},
                "fitness": {"handling_buffer_minutes": 15},
                "timeout_ms": 5000
            }"#,
        )
        .unwrap();
        assert_eq!(c.ga.population_size, 40);
        assert_eq!(c.ga.max_generations, 1000);
        assert_eq!(c.fitness.handling_buffer_minutes, 15.0);
        assert_eq!(c.fitness.overlap_penalty, 100);
        assert_eq!(c.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(RosterConfig::from_json_str(r#"{"ga": {"mutation_probability": -0.1}}"#).is_err());
        assert!(RosterConfig::from_json_str(r#"{"default_travel_minutes": -5}"#).is_err());
        assert!(RosterConfig::from_json_str(r#"{"fitness": {"overlap_penalty": -1}}"#).is_err());
        assert!(RosterConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = RosterConfig::from_path("/nonexistent/u-roster.json").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig(_)));
    }

    #[test]
    fn test_builders() {
        let c = RosterConfig::default()
            .with_seed(3)
            .with_acceptance_threshold(-10)
            .with_default_travel_minutes(12.0)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(c.ga.seed, Some(3));
        assert_eq!(c.acceptance_threshold, -10);
        assert_eq!(c.default_travel_minutes, 12.0);
        assert_eq!(c.timeout_ms, Some(2000));
    }

    #[test]
    fn test_timeout_keeps_millisecond_resolution() {
        let c = RosterConfig::default().with_timeout(Duration::from_millis(900));
        assert_eq!(c.timeout(), Some(Duration::from_millis(900)));
        assert!(c.validate().is_ok());

        let c = RosterConfig::default().with_timeout(Duration::from_millis(1500));
        assert_eq!(c.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let c = RosterConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(c.validate(), Err(ScheduleError::InvalidConfig(_))));
        assert!(RosterConfig::from_json_str(r#"{"timeout_ms": 0}"#).is_err());
    }
}
