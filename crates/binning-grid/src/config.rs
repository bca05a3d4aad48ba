//! Configuration for building a planetary grid.

use serde::{Deserialize, Serialize};

use mosaic_common::{CrsSpec, GridError, GridResult, TileSize};

/// Which grid engine to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    /// Tiled integerized sinusoidal grid.
    Isin,
    /// Regular raster in an EPSG coordinate reference system.
    Crs,
}

impl Default for GridKind {
    fn default() -> Self {
        Self::Isin
    }
}

impl GridKind {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "isin" | "sinusoidal" => Some(Self::Isin),
            "crs" => Some(Self::Crs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isin => "isin",
            Self::Crs => "crs",
        }
    }
}

impl std::fmt::Display for GridKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of a planetary grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid engine.
    pub kind: GridKind,

    /// Global number of rows. For ISIN one of 21600, 43200, 86400; for a CRS
    /// grid it determines the pixel size unless `pixel_size` is given.
    pub num_rows: i32,

    /// CRS identifier, e.g. `EPSG:4326`, `EPSG:4326,0.7` or `EPSG:3995,POLYGON((...))`.
    pub crs: String,

    /// Pixel height in CRS units. Selects the pixel-size constructor of the CRS grid.
    pub pixel_size: Option<f64>,

    /// Edge length of the square tiles used for data slicing.
    pub tile_size: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            kind: GridKind::Isin,
            num_rows: 21600,
            crs: "EPSG:4326".to_string(),
            pixel_size: None,
            tile_size: 512,
        }
    }
}

impl GridConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_KIND") {
            if let Some(kind) = GridKind::parse(&val) {
                config.kind = kind;
            }
        }

        if let Ok(val) = std::env::var("GRID_NUM_ROWS") {
            if let Ok(rows) = val.parse() {
                config.num_rows = rows;
            }
        }

        if let Ok(val) = std::env::var("GRID_CRS") {
            config.crs = val;
        }

        if let Ok(val) = std::env::var("GRID_PIXEL_SIZE") {
            if let Ok(size) = val.parse() {
                config.pixel_size = Some(size);
            }
        }

        if let Ok(val) = std::env::var("GRID_TILE_SIZE") {
            if let Ok(size) = val.parse() {
                config.tile_size = size;
            }
        }

        config
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> GridResult<Self> {
        serde_json::from_str(json).map_err(|e| GridError::Config(format!("invalid grid config: {}", e)))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_rows <= 0 {
            return Err("num_rows must be > 0".to_string());
        }

        if self.tile_size <= 0 {
            return Err("tile_size must be > 0".to_string());
        }

        if let Some(size) = self.pixel_size {
            if !size.is_finite() || size <= 0.0 {
                return Err("pixel_size must be a positive number".to_string());
            }
        }

        if self.kind == GridKind::Crs {
            CrsSpec::parse(&self.crs).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    pub fn crs_spec(&self) -> GridResult<CrsSpec> {
        CrsSpec::parse(&self.crs)
    }

    pub fn tile_size(&self) -> TileSize {
        TileSize::square(self.tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.kind, GridKind::Isin);
        assert_eq!(config.tile_size(), TileSize::new(512, 512));
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = GridConfig::default();
        config.num_rows = 0;
        assert!(config.validate().is_err());

        let mut config = GridConfig::default();
        config.pixel_size = Some(-1.0);
        assert!(config.validate().is_err());

        let mut config = GridConfig::default();
        config.kind = GridKind::Crs;
        config.crs = "WGS84".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = GridConfig::from_json(r#"{"kind": "crs", "crs": "EPSG:32636", "pixel_size": 60.0}"#)
            .unwrap();
        assert_eq!(config.kind, GridKind::Crs);
        assert_eq!(config.pixel_size, Some(60.0));
        assert_eq!(config.tile_size, 512);

        assert!(GridConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(GridKind::parse("ISIN"), Some(GridKind::Isin));
        assert_eq!(GridKind::parse("crs"), Some(GridKind::Crs));
        assert_eq!(GridKind::parse("hex"), None);
        assert_eq!(GridKind::Crs.to_string(), "crs");
    }
}
