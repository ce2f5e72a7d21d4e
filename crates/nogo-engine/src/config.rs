//! Pipeline policy configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a cell with no depth value is treated by the draught filter.
///
/// `Hazard` matches the legacy service, which kept such cells as NoGo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDepthPolicy {
    /// Unknown depth is assumed navigable: never NoGo.
    #[default]
    Navigable,
    /// Unknown depth is treated as a hazard: always NoGo.
    Hazard,
}

impl FromStr for UnknownDepthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "navigable" => Ok(UnknownDepthPolicy::Navigable),
            "hazard" => Ok(UnknownDepthPolicy::Hazard),
            other => Err(format!("unknown depth policy '{}'", other)),
        }
    }
}

/// Configuration for the NoGo pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Apply tide correction to depths when tide data is available.
    pub tide_correction: bool,

    /// Treatment of cells without a depth value.
    pub unknown_depth: UnknownDepthPolicy,

    /// Depth rows corrected by one tide row.
    pub depth_rows_per_tide_row: usize,

    /// Depth cells corrected by one tide cell within a row.
    pub depth_cells_per_tide_cell: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tide_correction: false,
            unknown_depth: UnknownDepthPolicy::Navigable,
            depth_rows_per_tide_row: 5,
            depth_cells_per_tide_cell: 8,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides to this configuration.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("NOGO_TIDE_CORRECTION") {
            self.tide_correction = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("NOGO_UNKNOWN_DEPTH") {
            match val.parse() {
                Ok(policy) => self.unknown_depth = policy,
                Err(e) => tracing::warn!(error = %e, "Ignoring NOGO_UNKNOWN_DEPTH"),
            }
        }

        if let Ok(val) = std::env::var("NOGO_DEPTH_ROWS_PER_TIDE_ROW") {
            if let Ok(rows) = val.parse() {
                self.depth_rows_per_tide_row = rows;
            }
        }

        if let Ok(val) = std::env::var("NOGO_DEPTH_CELLS_PER_TIDE_CELL") {
            if let Ok(cells) = val.parse() {
                self.depth_cells_per_tide_cell = cells;
            }
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.depth_rows_per_tide_row == 0 {
            return Err("depth_rows_per_tide_row must be > 0".to_string());
        }

        if self.depth_cells_per_tide_cell == 0 {
            return Err("depth_cells_per_tide_cell must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert!(!config.tide_correction);
        assert_eq!(config.unknown_depth, UnknownDepthPolicy::Navigable);
        assert_eq!(config.depth_rows_per_tide_row, 5);
        assert_eq!(config.depth_cells_per_tide_cell, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ratios() {
        let config = PipelineConfig {
            depth_cells_per_tide_cell: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: PipelineConfig =
            serde_yaml::from_str("tide_correction: true\nunknown_depth: hazard\n").unwrap();
        assert!(config.tide_correction);
        assert_eq!(config.unknown_depth, UnknownDepthPolicy::Hazard);
        assert_eq!(config.depth_rows_per_tide_row, 5);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("HAZARD".parse::<UnknownDepthPolicy>(), Ok(UnknownDepthPolicy::Hazard));
        assert_eq!("navigable".parse::<UnknownDepthPolicy>(), Ok(UnknownDepthPolicy::Navigable));
        assert!("maybe".parse::<UnknownDepthPolicy>().is_err());
    }
}
