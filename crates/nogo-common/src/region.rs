//! Region table: the named maritime areas the service has grid data for.
//!
//! Classification is a single ordered scan over the table. Adding a region is
//! a data change (a new entry, or a YAML file replacing the built-in table).

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NogoError, NogoResult};
use crate::geo::{GeoPoint, LatLonRect};

/// The named maritime areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    Sydkattegat,
    Nordkattegat,
    SfBay,
    Humber,
    Bornholm,
}

impl RegionName {
    /// Stable identifier used in store keys, logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionName::Sydkattegat => "sydkattegat",
            RegionName::Nordkattegat => "nordkattegat",
            RegionName::SfBay => "sf_bay",
            RegionName::Humber => "humber",
            RegionName::Bornholm => "bornholm",
        }
    }

    pub fn all() -> &'static [RegionName] {
        &[
            RegionName::Sydkattegat,
            RegionName::Nordkattegat,
            RegionName::SfBay,
            RegionName::Humber,
            RegionName::Bornholm,
        ]
    }

    /// Parse a store key back into a name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.as_str() == key)
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the region table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: RegionName,
    /// Both request corners must fall strictly inside this rectangle.
    pub bounds: LatLonRect,
    /// Half the grid spacing in latitude, used as quadrilateral padding.
    pub lat_offset: f64,
    /// Half the grid spacing in longitude, used as quadrilateral padding.
    pub lon_offset: f64,
    /// Whether overlapping bridge polygons are de-duplicated for this region.
    #[serde(default = "default_resolve_overlaps")]
    pub resolve_overlaps: bool,
}

fn default_resolve_overlaps() -> bool {
    true
}

impl Region {
    pub fn new(
        name: RegionName,
        bounds: LatLonRect,
        lat_offset: f64,
        lon_offset: f64,
        resolve_overlaps: bool,
    ) -> Self {
        Self {
            name,
            bounds,
            lat_offset,
            lon_offset,
            resolve_overlaps,
        }
    }

    /// Check if a request box (given by its two corners) is served by this region.
    pub fn covers(&self, north_west: &GeoPoint, south_east: &GeoPoint) -> bool {
        self.bounds.contains_both(north_west, south_east)
    }
}

/// Ordered region table. Earlier entries win when rectangles overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    pub regions: Vec<Region>,
}

impl RegionTable {
    /// Build a table, rejecting malformed entries.
    pub fn new(regions: Vec<Region>) -> NogoResult<Self> {
        let table = Self { regions };
        table.validate()?;
        Ok(table)
    }

    /// The built-in table of the five served areas, in priority order.
    pub fn builtin() -> Self {
        Self {
            regions: vec![
                Region::new(
                    RegionName::Sydkattegat,
                    LatLonRect::new(54.36294, 9.419409, 56.36316, 13.149009),
                    0.00055500,
                    0.00055504,
                    true,
                ),
                Region::new(
                    RegionName::Nordkattegat,
                    LatLonRect::new(56.34096, 9.403869, 58.26237, 12.148899),
                    0.00055504,
                    0.00055504,
                    true,
                ),
                Region::new(
                    RegionName::SfBay,
                    LatLonRect::new(37.17, -123.21, 38.35, -121.32),
                    -0.00008,
                    0.000151883,
                    false,
                ),
                Region::new(
                    RegionName::Humber,
                    LatLonRect::new(53.53, -0.87, 53.742, 0.25),
                    0.0000434,
                    0.0,
                    false,
                ),
                Region::new(
                    RegionName::Bornholm,
                    LatLonRect::new(54.85, 14.55, 55.35, 15.25),
                    0.00055500,
                    0.00055504,
                    true,
                ),
            ],
        }
    }

    /// Parse a table from YAML.
    pub fn from_yaml_str(content: &str) -> NogoResult<Self> {
        let table: RegionTable = serde_yaml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> NogoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NogoError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Classify a request box. Returns the first region containing both corners.
    pub fn resolve(&self, north_west: &GeoPoint, south_east: &GeoPoint) -> Option<&Region> {
        self.regions
            .iter()
            .find(|region| region.covers(north_west, south_east))
    }

    pub fn get(&self, name: RegionName) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn validate(&self) -> NogoResult<()> {
        if self.regions.is_empty() {
            return Err(NogoError::InvalidRegionTable(
                "table has no regions".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.name) {
                return Err(NogoError::InvalidRegionTable(format!(
                    "duplicate region: {}",
                    region.name
                )));
            }
            if !region.bounds.is_well_formed() {
                return Err(NogoError::InvalidRegionTable(format!(
                    "malformed bounds for {}: {:?}",
                    region.name, region.bounds
                )));
            }
            if !region.lat_offset.is_finite() || !region.lon_offset.is_finite() {
                return Err(NogoError::InvalidRegionTable(format!(
                    "non-finite offsets for {}",
                    region.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_five_valid_regions() {
        let table = RegionTable::builtin();
        assert_eq!(table.len(), 5);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_resolve_sydkattegat() {
        let table = RegionTable::builtin();
        let region = table
            .resolve(&GeoPoint::new(55.17, 11.668), &GeoPoint::new(55.07, 11.868))
            .unwrap();
        assert_eq!(region.name, RegionName::Sydkattegat);
        assert_eq!(region.lat_offset, 0.00055500);
    }

    #[test]
    fn test_resolve_requires_both_corners() {
        let table = RegionTable::builtin();
        // NW corner in Sydkattegat, SE corner outside every region
        let result = table.resolve(&GeoPoint::new(55.0, 11.0), &GeoPoint::new(50.0, 11.5));
        assert!(result.is_none());
    }

    #[test]
    fn test_region_name_keys_round_trip() {
        for name in RegionName::all() {
            assert_eq!(RegionName::from_key(name.as_str()), Some(*name));
        }
        assert_eq!(RegionName::from_key("atlantis"), None);
    }
}
