//! Error types for the rl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rl-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rl_project::ProjectError> for AppError {
    fn from(err: rl_project::ProjectError) -> Self {
        match err {
            rl_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<rl_project::ValidationError> for AppError {
    fn from(err: rl_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rl_solver::SolverError> for AppError {
    fn from(err: rl_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<rl_topology::TopologyError> for AppError {
    fn from(err: rl_topology::TopologyError) -> Self {
        AppError::Topology(err.to_string())
    }
}
