//! rl-hydraulics: pipe-flow formulas for incompressible liquids.
//!
//! Provides:
//! - Physical property functions (area, velocity, kinetic head, Reynolds)
//! - Darcy friction factor correlations (Colebrook–White, Haaland, Swamee–Jain)
//! - Head loss and hydraulic power formulas
//!
//! All functions are pure and operate on SI values.
//!
//! # Example
//!
//! ```
//! use rl_hydraulics::{FlowState, FrictionComparison, darcy_head_loss};
//!
//! let state = FlowState::compute(0.025, 0.1541, 998.0, 0.0010).unwrap();
//! let f = FrictionComparison::compute(state.reynolds, 0.000046 / 0.1541);
//! let hf = darcy_head_loss(f.colebrook, 186.48, 0.1541, state.kinetic_head);
//!
//! assert!(f.haaland_deviation().abs() < 0.02);
//! assert!(hf > 1.9 && hf < 2.0);
//! ```

pub mod common;
pub mod error;
pub mod friction;
pub mod losses;
pub mod properties;

// Re-exports
pub use error::{HydraulicsError, HydraulicsResult};
pub use friction::{
    ColebrookConfig, ColebrookSolution, FrictionComparison, FrictionCorrelation, colebrook,
    colebrook_residual, colebrook_with, haaland, laminar, relative_roughness, swamee_jain,
};
pub use losses::{darcy_head_loss, hydraulic_power, hydraulic_power_kw, minor_head_loss};
pub use properties::{
    FlowRegime, FlowState, area, checked_area, kinetic_head, kinetic_head_with, reynolds,
    velocity,
};
