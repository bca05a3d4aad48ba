//! Common types shared by the mosaicking grid crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod position;
pub mod wkt;

pub use bbox::{BoundingBox, PixelRect, TileSize};
pub use crs::CrsSpec;
pub use error::{GridError, GridResult};
pub use position::{GeoPos, PixelPos};
