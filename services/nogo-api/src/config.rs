//! Service configuration loading.
//!
//! A single YAML file carries the pipeline policy and, optionally, a region
//! table that replaces the built-in one:
//!
//! ```yaml
//! pipeline:
//!   tide_correction: true
//!   unknown_depth: navigable
//! regions:
//!   - name: sydkattegat
//!     bounds: { south: 54.36294, west: 9.419409, north: 56.36316, east: 13.149009 }
//!     lat_offset: 0.000555
//!     lon_offset: 0.00055504
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use nogo_common::{Region, RegionTable};
use nogo_engine::PipelineConfig;
use serde::{Deserialize, Serialize};

/// NoGo service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Pipeline policy switches.
    pub pipeline: PipelineConfig,

    /// Region table override. The built-in table is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
}

impl ServiceConfig {
    /// Parse configuration from YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse NoGo service config")
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults. Environment overrides are applied
    /// to the pipeline section either way.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {:?}", path))?;
            let config = Self::from_yaml_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", path))?;
            tracing::info!(path = %path.display(), "Loaded NoGo service config");
            config
        } else {
            tracing::warn!(
                "NoGo config file {} does not exist, using defaults",
                path.display()
            );
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `NOGO_*` environment overrides to the pipeline section.
    pub fn with_env_overrides(mut self) -> Self {
        self.pipeline = self.pipeline.with_env_overrides();
        self
    }

    /// Build the active region table.
    pub fn region_table(&self) -> Result<RegionTable> {
        match &self.regions {
            Some(regions) => RegionTable::new(regions.clone()).context("Invalid region table"),
            None => Ok(RegionTable::builtin()),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.pipeline.validate()?;
        if let Some(regions) = &self.regions {
            RegionTable::new(regions.clone()).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nogo_common::RegionName;
    use nogo_engine::UnknownDepthPolicy;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::load(dir.path().join("nogo.yaml")).unwrap();
        assert!(config.regions.is_none());
        assert_eq!(config.region_table().unwrap().len(), 5);
    }

    #[test]
    fn test_load_pipeline_and_regions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
pipeline:
  depth_rows_per_tide_row: 4
regions:
  - name: humber
    bounds: {{ south: 53.53, west: -0.87, north: 53.742, east: 0.25 }}
    lat_offset: 0.0000434
    lon_offset: 0.0
    resolve_overlaps: false
"#
        )
        .unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.pipeline.depth_rows_per_tide_row, 4);
        assert_eq!(config.pipeline.depth_cells_per_tide_cell, 8);

        let table = config.region_table().unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(RegionName::Humber).is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_parsed_from_yaml() {
        let config = ServiceConfig::from_yaml_str("pipeline:\n  unknown_depth: hazard\n").unwrap();
        assert_eq!(config.pipeline.unknown_depth, UnknownDepthPolicy::Hazard);
        assert!(!config.pipeline.tide_correction);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ServiceConfig::from_yaml_str("pipeline:\n  depth_cells_per_tide_cell: 0\n")
            .unwrap();
        assert!(config.validate().is_err());

        let config = ServiceConfig::from_yaml_str("regions: []\n").unwrap();
        assert!(config.region_table().is_err());
        assert!(config.validate().is_err());

        assert!(ServiceConfig::from_yaml_str("pipeline: [1, 2]").is_err());
    }
}
