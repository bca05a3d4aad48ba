//! Error types for grid construction and grid operations.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Primary error type for mosaicking grids.
///
/// Lookups never fail; they return sentinels. Only construction and the
/// heavy operations (reprojection, slice planning) produce these.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Transform failed: {0}")]
    TransformFailure(String),

    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an OutOfBounds error.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// The name of the offending parameter, if this is a parameter error.
    pub fn param(&self) -> Option<&str> {
        match self {
            GridError::InvalidParameter { param, .. } => Some(param),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = GridError::invalid_parameter("dzone", "must be even");
        assert_eq!(
            err.to_string(),
            "Invalid parameter value for 'dzone': must be even"
        );
        assert_eq!(err.param(), Some("dzone"));
    }

    #[test]
    fn test_param_absent_for_other_variants() {
        assert!(GridError::TransformFailure("singular".into()).param().is_none());
        assert!(GridError::Config("x".into()).param().is_none());
    }
}
