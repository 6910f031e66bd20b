//! Navigator configuration, loadable from TOML.
//!
//! ```toml
//! memory_width = 41
//! memory_height = 41
//! step_limit = 100000
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::simulation::error::ConfigError;
use crate::simulation::memory::{side_for_extent, MemoryGrid};
use crate::simulation::params::DEFAULT_MEMORY_SIDE;

/// Settings fixed for the lifetime of a navigator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigatorConfig {
    /// Memory grid width in cells
    pub memory_width: usize,
    /// Memory grid height in cells
    pub memory_height: usize,
    /// Abort after this many loop iterations; unbounded when absent
    pub step_limit: Option<u64>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            memory_width: DEFAULT_MEMORY_SIDE,
            memory_height: DEFAULT_MEMORY_SIDE,
            step_limit: None,
        }
    }
}

impl NavigatorConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Sizes memory for a maze of at most `width` x `height` cells.
    #[must_use]
    pub fn with_maze_extent(mut self, width: usize, height: usize) -> Self {
        self.memory_width = side_for_extent(width);
        self.memory_height = side_for_extent(height);
        self
    }

    #[must_use]
    pub fn with_memory(mut self, width: usize, height: usize) -> Self {
        self.memory_width = width;
        self.memory_height = height;
        self
    }

    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Checks the settings before any exploration starts.
    ///
    /// # Errors
    /// `MemoryTooSmall`, `MemoryTooLarge` or `ZeroStepLimit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        MemoryGrid::cell_count(self.memory_width, self.memory_height)?;
        if self.step_limit == Some(0) {
            return Err(ConfigError::ZeroStepLimit);
        }
        Ok(())
    }
}

/// A `WIDTHxHEIGHT` pair as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl FromStr for GridSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::BadSize(s.to_string());
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(bad)?;
        Ok(Self {
            width: w.trim().parse().map_err(|_| bad())?,
            height: h.trim().parse().map_err(|_| bad())?,
        })
    }
}
