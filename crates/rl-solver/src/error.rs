//! Error types for solver operations.

use rl_core::error::RlError;
use rl_hydraulics::HydraulicsError;
use rl_topology::TopologyError;
use thiserror::Error;

/// Errors that can occur while solving or querying the system.
///
/// Numeric domain problems (zero flow, zero diameter) are not errors; they
/// produce a degenerate all-zero result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Hydraulics error: {0}")]
    Hydraulics(#[from] HydraulicsError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for RlError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Topology(err) => err.into(),
            SolverError::Hydraulics(err) => err.into(),
            SolverError::InvalidArg { what } => RlError::Invariant { what },
        }
    }
}
