//! Error types for hydraulic calculations.

use rl_core::error::RlError;
use thiserror::Error;

/// Errors that can occur during hydraulic calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown friction correlation: {name}")]
    UnknownCorrelation { name: String },
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<HydraulicsError> for RlError {
    fn from(e: HydraulicsError) -> Self {
        match e {
            HydraulicsError::NonPhysical { what } => RlError::InvalidArg { what },
            HydraulicsError::InvalidArg { what } => RlError::InvalidArg { what },
            HydraulicsError::UnknownCorrelation { .. } => RlError::InvalidArg {
                what: "friction correlation",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HydraulicsError::NonPhysical { what: "diameter" };
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn error_conversion() {
        let err = HydraulicsError::InvalidArg { what: "test" };
        let rl_err: RlError = err.into();
        assert!(matches!(rl_err, RlError::InvalidArg { .. }));
    }
}
