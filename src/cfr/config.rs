//! Configuration options for the CFR solver.
//!
//! Training runs for a fixed number of iterations; there is no convergence
//! check or early stopping.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the CFR solver.
///
/// # Example
/// ```
/// use poker_cfr::cfr::CfrConfig;
///
/// let config = CfrConfig::default().with_seed(42).with_iterations(1_000);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfrConfig {
    /// Number of sampled deals to train on.
    pub iterations: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, deal sampling is reproducible. If `None`, the RNG is seeded
    /// from the operating system.
    pub seed: Option<u64>,

    /// How many iterations between progress reports.
    pub report_interval: u64,
}

impl Default for CfrConfig {
    fn default() -> Self {
        Self {
            iterations: 50_000,
            seed: None,
            report_interval: 10_000,
        }
    }
}

impl CfrConfig {
    /// Create a new CfrConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the progress report interval.
    pub fn with_report_interval(mut self, interval: u64) -> Self {
        self.report_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.report_interval == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The iteration count must be a positive integer.
    #[error("iteration count must be positive")]
    ZeroIterations,

    /// The report interval must be a positive integer.
    #[error("report interval must be positive")]
    ZeroReportInterval,

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Statistics tracked during CFR training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfrStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Running average of the root utility for seat 0.
    pub game_value: f64,
}

impl CfrStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
