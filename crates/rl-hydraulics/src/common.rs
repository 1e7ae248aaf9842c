//! Common utilities for hydraulic calculations.

use crate::error::{HydraulicsError, HydraulicsResult};
use rl_core::numeric::ensure_finite;

/// Reynolds number below which the friction factor is 64/Re.
pub const LAMINAR_RE_LIMIT: f64 = 2300.0;

/// Reynolds number above which flow is fully turbulent.
pub const TURBULENT_RE_LIMIT: f64 = 4000.0;

/// Ensure a value is finite, returning HydraulicsError if not.
pub fn check_finite(value: f64, what: &'static str) -> HydraulicsResult<()> {
    ensure_finite(value, what).map_err(|_| HydraulicsError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> HydraulicsResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(HydraulicsError::NonPhysical { what });
    }
    Ok(())
}
