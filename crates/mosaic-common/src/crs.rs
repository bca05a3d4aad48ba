//! CRS identifier strings accepted by the arbitrary-CRS grid.
//!
//! Accepted forms:
//! - `EPSG:<code>`
//! - `EPSG:<code>,<ratio>` where ratio is pixel height over pixel width
//! - `EPSG:<code>,POLYGON((...))` restricting the grid to a target area

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, GridResult};

/// A parsed CRS identifier with its optional modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsSpec {
    /// EPSG code of the grid CRS
    pub epsg: u32,
    /// Ratio of pixel size Y to pixel size X (1.0 for square pixels)
    pub ratio: f64,
    /// Target polygon in WKT, coordinates in the grid CRS
    pub polygon_wkt: Option<String>,
}

impl CrsSpec {
    /// A plain `EPSG:<code>` identifier with square pixels.
    pub fn epsg(code: u32) -> Self {
        Self {
            epsg: code,
            ratio: 1.0,
            polygon_wkt: None,
        }
    }

    pub fn parse(s: &str) -> GridResult<Self> {
        let trimmed = s.trim();
        let (code_part, modifier) = match trimmed.split_once(',') {
            Some((code, rest)) => (code.trim(), Some(rest.trim())),
            None => (trimmed, None),
        };

        let code_str = code_part
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("EPSG:"))
            .map(|_| &code_part[5..])
            .ok_or_else(|| {
                GridError::invalid_parameter("crs", format!("expected 'EPSG:<code>', got '{}'", s))
            })?;

        let epsg: u32 = code_str.trim().parse().map_err(|_| {
            GridError::invalid_parameter("crs", format!("invalid EPSG code '{}'", code_str))
        })?;

        let mut spec = Self::epsg(epsg);
        match modifier {
            None => {}
            Some(m) if m.starts_with("POLYGON") => {
                spec.polygon_wkt = Some(m.to_string());
            }
            Some(m) => {
                let ratio: f64 = m.parse().map_err(|_| {
                    GridError::invalid_parameter(
                        "crs",
                        format!("expected a pixel ratio or POLYGON after the code, got '{}'", m),
                    )
                })?;
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(GridError::invalid_parameter(
                        "crs",
                        format!("pixel ratio must be positive, got {}", ratio),
                    ));
                }
                spec.ratio = ratio;
            }
        }
        Ok(spec)
    }
}

impl FromStr for CrsSpec {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CrsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)?;
        if let Some(wkt) = &self.polygon_wkt {
            write!(f, ",{}", wkt)
        } else if self.ratio != 1.0 {
            write!(f, ",{}", self.ratio)
        } else {
            Ok(())
        }
    }
}
