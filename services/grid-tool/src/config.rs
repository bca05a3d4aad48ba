//! Grid configuration loading for the CLI.

use anyhow::{anyhow, bail, Context, Result};

use binning_grid::{GridConfig, GridKind};

/// Command line values overriding the file or environment configuration.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub kind: Option<String>,
    pub num_rows: Option<i32>,
    pub crs: Option<String>,
    pub pixel_size: Option<f64>,
    pub tile_size: Option<i32>,
}

/// Read the config file when given, otherwise the environment, then apply overrides.
pub fn load(path: Option<&str>, overrides: &Overrides) -> Result<GridConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read grid config {}", path))?;
            GridConfig::from_json(&json)?
        }
        None => GridConfig::from_env(),
    };

    if let Some(kind) = &overrides.kind {
        config.kind = GridKind::parse(kind).ok_or_else(|| anyhow!("unknown grid kind '{}'", kind))?;
    }
    if let Some(num_rows) = overrides.num_rows {
        config.num_rows = num_rows;
    }
    if let Some(crs) = &overrides.crs {
        config.crs = crs.clone();
    }
    if overrides.pixel_size.is_some() {
        config.pixel_size = overrides.pixel_size;
    }
    if let Some(tile_size) = overrides.tile_size {
        config.tile_size = tile_size;
    }

    if let Err(e) = config.validate() {
        bail!("invalid grid configuration: {}", e);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"kind": "crs", "crs": "EPSG:3413", "pixel_size": 25000.0}}"#).unwrap();

        let overrides = Overrides {
            tile_size: Some(64),
            ..Default::default()
        };
        let config = load(file.path().to_str(), &overrides).unwrap();
        assert_eq!(config.kind, GridKind::Crs);
        assert_eq!(config.crs, "EPSG:3413");
        assert_eq!(config.pixel_size, Some(25000.0));
        assert_eq!(config.tile_size, 64);
        assert_eq!(config.num_rows, 21600);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"kind": "crs", "crs": "EPSG:4326"}}"#).unwrap();

        let overrides = Overrides {
            tile_size: Some(0),
            ..Default::default()
        };
        assert!(load(file.path().to_str(), &overrides).is_err());

        let overrides = Overrides {
            kind: Some("hexagon".to_string()),
            ..Default::default()
        };
        assert!(load(file.path().to_str(), &overrides).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load(path.to_str(), &Overrides::default()).is_err());
    }
}
