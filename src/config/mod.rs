//! Pager configuration
//!
//! Read once from a JSON file and passed explicitly into the pagination
//! engine, the view builders and the CSV exporter. Every field is optional.
//!
//! ```json
//! {
//!   "memory_ceiling_bytes": 536870912,
//!   "memory_warning_ratio": 0.8,
//!   "auto_continue": true,
//!   "allow_csv_export": true,
//!   "max_nesting_depth": 8
//! }
//! ```

mod errors;

pub use errors::{ConfigError, ConfigErrorCode, ConfigResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::memory::MemoryThreshold;
use crate::observability::{log_event_with_fields, Event};

/// Runtime configuration for draining, rendering and exporting results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Process memory ceiling in bytes; 0 disables the memory guard
    #[serde(default = "default_memory_ceiling")]
    pub memory_ceiling_bytes: u64,

    /// Fraction of the ceiling at which pagination stops
    #[serde(default = "default_warning_ratio")]
    pub memory_warning_ratio: f64,

    /// Keep fetching pages until the result is done
    #[serde(default)]
    pub auto_continue: bool,

    /// Whether CSV export is permitted at all
    #[serde(default = "default_allow_csv_export")]
    pub allow_csv_export: bool,

    /// Deepest child result nesting rendered in the tabular view
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_memory_ceiling() -> u64 {
    536870912
} // 512MB
fn default_warning_ratio() -> f64 {
    0.8
}
fn default_allow_csv_export() -> bool {
    true
}
fn default_max_nesting_depth() -> usize {
    8
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            memory_ceiling_bytes: default_memory_ceiling(),
            memory_warning_ratio: default_warning_ratio(),
            auto_continue: false,
            allow_csv_export: default_allow_csv_export(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl PagerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", &path.display().to_string())],
        );

        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: PagerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.memory_warning_ratio > 0.0 && self.memory_warning_ratio <= 1.0) {
            return Err(ConfigError::invalid(format!(
                "memory_warning_ratio must be in (0, 1], got {}",
                self.memory_warning_ratio
            )));
        }

        if self.max_nesting_depth == 0 {
            return Err(ConfigError::invalid("max_nesting_depth must be > 0"));
        }

        Ok(())
    }

    /// Memory guard inputs derived from this configuration
    pub fn memory_threshold(&self) -> MemoryThreshold {
        MemoryThreshold::new(self.memory_ceiling_bytes, self.memory_warning_ratio)
    }

    /// Whether pagination drains every page without being asked
    pub fn auto_continue_enabled(&self) -> bool {
        self.auto_continue
    }

    /// Whether CSV export is permitted
    pub fn export_enabled(&self) -> bool {
        self.allow_csv_export
    }
}
