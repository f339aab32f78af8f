//! Configuration system for ChromaForge.
//!
//! Load solve configuration from TOML or YAML to pick a strategy, bound the
//! search and tune the heuristic optimizer without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use chromaforge_config::{ColoringConfig, StrategyKind, VertexOrder};
//! use std::time::Duration;
//!
//! let config = ColoringConfig::from_toml_str(r#"
//!     strategy = "backtracking"
//!
//!     [options]
//!     max_colors = 4
//!     order = "degree_descending"
//!     deadline_steps = 100000
//!     time_limit_ms = 2500
//!
//!     [optimizer]
//!     restarts = 8
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyKind::Backtracking);
//! assert_eq!(config.options.order, Some(VertexOrder::DegreeDescending));
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use chromaforge_config::ColoringConfig;
//!
//! let config = ColoringConfig::load("coloring.toml").unwrap_or_default();
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chromaforge_core::{Color, ColoringError};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Default number of local recoloring passes.
pub const DEFAULT_ITERATION_CAP: u32 = 100;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main coloring configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ColoringConfig {
    /// Base strategy used by `solve` and `optimize`.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Search options.
    #[serde(default)]
    pub options: SolveOptions,

    /// Heuristic optimizer settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl ColoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or
    /// describes an impossible configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Returns the wall-clock limit of the search, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.options.time_limit()
    }

    /// Rejects settings no search can honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options.validate()
    }
}

/// Coloring strategy selector.
///
/// Parsing a name that matches no strategy fails with
/// [`ColoringError::UnknownStrategy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Single pass, lowest available color, never backtracks.
    #[default]
    Greedy,

    /// Depth-first search over a color budget.
    Backtracking,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Greedy, StrategyKind::Backtracking];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::Backtracking => "backtracking",
        }
    }

    /// Vertex order used when the options leave it open.
    pub fn default_order(self) -> VertexOrder {
        match self {
            StrategyKind::Greedy => VertexOrder::InsertionOrder,
            StrategyKind::Backtracking => VertexOrder::DegreeDescending,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ColoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ColoringError::UnknownStrategy(s.to_string()))
    }
}

/// Order in which strategies visit vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexOrder {
    /// The graph's insertion order.
    #[default]
    InsertionOrder,

    /// Highest degree first, ties broken by identifier.
    DegreeDescending,
}

impl fmt::Display for VertexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexOrder::InsertionOrder => write!(f, "InsertionOrder"),
            VertexOrder::DegreeDescending => write!(f, "DegreeDescending"),
        }
    }
}

/// Options for a single solve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolveOptions {
    /// Color budget: every color of the result lies in `1..=max_colors`.
    /// Unbounded when `None`.
    pub max_colors: Option<Color>,

    /// Vertex order; each strategy has its own default when `None`.
    pub order: Option<VertexOrder>,

    /// Maximum number of local recoloring passes of the optimizer.
    pub iteration_cap: u32,

    /// Maximum number of search steps (vertex assignment attempts).
    pub deadline_steps: Option<u64>,

    /// Maximum wall-clock time of the search in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_colors: None,
            order: None,
            iteration_cap: DEFAULT_ITERATION_CAP,
            deadline_steps: None,
            time_limit_ms: None,
        }
    }
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_colors(mut self, max_colors: Color) -> Self {
        self.max_colors = Some(max_colors);
        self
    }

    pub fn with_order(mut self, order: VertexOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_iteration_cap(mut self, cap: u32) -> Self {
        self.iteration_cap = cap;
        self
    }

    pub fn with_deadline_steps(mut self, steps: u64) -> Self {
        self.deadline_steps = Some(steps);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis() as u64);
        self
    }

    /// Returns the order to use for a strategy.
    pub fn order_for(&self, strategy: StrategyKind) -> VertexOrder {
        self.order.unwrap_or_else(|| strategy.default_order())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_colors == Some(0) {
            return Err(ConfigError::Invalid(
                "max_colors must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Heuristic optimizer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Extra attempts with randomized tie-breaking after the base run.
    pub restarts: u32,

    /// Random seed for reproducible restarts.
    pub random_seed: Option<u64>,
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restarts(mut self, restarts: u32) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
