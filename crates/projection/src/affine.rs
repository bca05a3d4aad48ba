//! 2-D affine transforms between raster pixels and CRS coordinates.

use nalgebra::{Matrix3, Vector3};

use crate::error::ProjectionError;

/// Affine map `(x, y) ↦ (a·x + b·y + c, d·x + e·y + f)` stored as a 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl AffineTransform {
    pub fn new(
        scale_x: f64,
        shear_x: f64,
        translate_x: f64,
        shear_y: f64,
        scale_y: f64,
        translate_y: f64,
    ) -> Self {
        Self {
            matrix: Matrix3::new(
                scale_x, shear_x, translate_x,
                shear_y, scale_y, translate_y,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// North-up raster: pixel (0, 0) is the corner at (easting, northing),
    /// rows run southward.
    pub fn north_up(easting: f64, northing: f64, pixel_size_x: f64, pixel_size_y: f64) -> Self {
        Self::new(pixel_size_x, 0.0, easting, 0.0, -pixel_size_y, northing)
    }

    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let v = self.matrix * Vector3::new(x, y, 1.0);
        (v.x, v.y)
    }

    pub fn inverse(&self) -> Result<AffineTransform, ProjectionError> {
        self.matrix
            .try_inverse()
            .map(|matrix| AffineTransform { matrix })
            .ok_or_else(|| ProjectionError::NotInvertible(format!("{:?}", self.matrix)))
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.matrix[(0, 0)], self.matrix[(1, 1)])
    }
}
