//! Errors raised while building or evaluating projections.

use mosaic_common::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid projection parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Coordinate out of range: {0}")]
    OutOfRange(String),

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Transform is not invertible: {0}")]
    NotInvertible(String),
}

impl ProjectionError {
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}

impl From<ProjectionError> for GridError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::InvalidParameter { param, message } => {
                GridError::InvalidParameter { param, message }
            }
            ProjectionError::OutOfRange(msg) | ProjectionError::NotInvertible(msg) => {
                GridError::TransformFailure(msg)
            }
            ProjectionError::UnsupportedCrs(code) => {
                GridError::invalid_parameter("crs", format!("unsupported CRS {}", code))
            }
        }
    }
}
