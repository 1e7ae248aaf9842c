//! Shared application service layer for ridgeline.
//!
//! This crate sits between the CLI and the backend crates, centralizing
//! scenario handling, solve execution with memoisation, tabular queries,
//! reference comparison and export.

pub mod compare;
pub mod compile;
pub mod error;
pub mod export;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use compare::{ComparisonEntry, ComparisonReport, DEFAULT_TOLERANCE, compare_with_reference};
pub use compile::{ScenarioRuntime, compile_scenario, fluid_parameters, solver_config};
pub use error::{AppError, AppResult};
pub use project_service::{
    ScenarioSummary, load_scenario, save_scenario, summarize, validate_scenario,
};
pub use query::{LossBreakdown, LossRow, SegmentRow, loss_breakdown, segment_row, segment_table};
pub use run_service::{RunOptions, RunService, ScenarioRun, solve_scenario};
