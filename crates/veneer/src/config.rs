//! Configuration for report generation.
//!
//! [`ReportConfig`] controls the report-wide policy knobs. It implements
//! [`serde::Deserialize`] so it can be loaded from an external TOML or JSON
//! source by the CLI.
//!
//! # Example
//!
//! ```
//! # use veneer::config::ReportConfig;
//! # use veneer_core::stability::TrimLevel;
//! let config = ReportConfig::default();
//! assert_eq!(config.trim_level(), TrimLevel::Public);
//! ```

use serde::Deserialize;

use veneer_core::stability::TrimLevel;

/// Report generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Minimum stability a declaration must have to appear in the report.
    #[serde(default = "default_trim_level")]
    trim_level: TrimLevel,
}

fn default_trim_level() -> TrimLevel {
    TrimLevel::Public
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            trim_level: default_trim_level(),
        }
    }
}

impl ReportConfig {
    /// Creates a new [`ReportConfig`] with the specified trim level.
    pub fn new(trim_level: TrimLevel) -> Self {
        Self { trim_level }
    }

    /// Returns the configured trim level.
    pub fn trim_level(&self) -> TrimLevel {
        self.trim_level
    }

    /// Replaces the trim level, e.g. from a command-line override.
    pub fn set_trim_level(&mut self, trim_level: TrimLevel) {
        self.trim_level = trim_level;
    }
}
