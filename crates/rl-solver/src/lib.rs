//! Steady-state system solver for the eight-segment pipeline.
//!
//! Every segment carries the same flow through the same pipe, so the flow
//! state and friction factors are computed once and each segment's role
//! strategy turns its station losses into pump head or throttled head.
//!
//! # Example
//!
//! ```
//! use rl_solver::{FluidParameters, solve_system};
//!
//! let result = solve_system(&FluidParameters::reference());
//! let s1 = result.get(1).unwrap();
//! assert!((s1.total_head_m - 102.35).abs() < 1.0);
//! assert!(result.get(9).is_err());
//! ```

pub mod cache;
pub mod error;
pub mod params;
pub mod piezometric;
pub mod result;
pub mod role;
pub mod solve;
pub mod sweep;

pub use cache::SolveCache;
pub use error::{SolverError, SolverResult};
pub use params::{FluidParameters, ParamKey, RangeWarning};
pub use piezometric::{
    DEFAULT_SUB_POINTS, PiezometricEvent, PiezometricPoint, PiezometricProfile,
    piezometric_profile, piezometric_profile_with,
};
pub use result::{AggregateResult, SegmentResult, SystemTotals};
pub use role::{RoleStrategy, StationHeads, StationLosses, strategy};
pub use solve::{SolverConfig, solve_system, solve_system_with};
pub use sweep::{SweepPoint, sweep_flow, sweep_flow_with};
