//! Elementary flow properties: continuity, kinetic head and Reynolds number.
//!
//! All functions take SI values as plain `f64` and perform no validation;
//! callers are expected to reject non-positive diameters and viscosities
//! upstream (see [`checked_area`] and [`FlowState::compute`]).

use crate::common::{LAMINAR_RE_LIMIT, TURBULENT_RE_LIMIT, check_finite, check_positive};
use crate::error::HydraulicsResult;
use rl_core::units::constants::G_MPS2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Cross-sectional area of a circular pipe, `π·D²/4` (m²).
#[inline]
pub fn area(diameter: f64) -> f64 {
    PI * diameter * diameter / 4.0
}

/// Area with the `D > 0` precondition enforced.
pub fn checked_area(diameter: f64) -> HydraulicsResult<f64> {
    check_positive(diameter, "pipe diameter")?;
    Ok(area(diameter))
}

/// Mean velocity from continuity, `Q/A` (m/s).
#[inline]
pub fn velocity(flow: f64, area: f64) -> f64 {
    flow / area
}

/// Kinetic (velocity) head `v²/(2g)` with g = 9.81 m/s².
#[inline]
pub fn kinetic_head(velocity: f64) -> f64 {
    kinetic_head_with(velocity, G_MPS2)
}

/// Kinetic head with an explicit gravitational acceleration.
#[inline]
pub fn kinetic_head_with(velocity: f64, g: f64) -> f64 {
    velocity * velocity / (2.0 * g)
}

/// Reynolds number `ρ·v·D/μ`.
#[inline]
pub fn reynolds(density: f64, velocity: f64, diameter: f64, viscosity: f64) -> f64 {
    density * velocity * diameter / viscosity
}

/// Flow regime classification by Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    /// Re ≤ 2300
    Laminar,
    /// 2300 < Re ≤ 4000
    Transitional,
    /// Re > 4000
    Turbulent,
}

impl FlowRegime {
    pub fn classify(reynolds: f64) -> Self {
        if reynolds > TURBULENT_RE_LIMIT {
            FlowRegime::Turbulent
        } else if reynolds > LAMINAR_RE_LIMIT {
            FlowRegime::Transitional
        } else {
            FlowRegime::Laminar
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowRegime::Laminar => "laminar",
            FlowRegime::Transitional => "transitional",
            FlowRegime::Turbulent => "turbulent",
        }
    }
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Flow quantities shared by every section of a uniform pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    /// Cross-sectional area (m²)
    pub area: f64,
    /// Mean velocity (m/s)
    pub velocity: f64,
    /// Kinetic head (m)
    pub kinetic_head: f64,
    /// Reynolds number (-)
    pub reynolds: f64,
    pub regime: FlowRegime,
}

impl FlowState {
    /// Compute the flow state for a volumetric flow through a circular pipe.
    ///
    /// # Errors
    /// Returns `NonPhysical` if the diameter, density or viscosity is not
    /// strictly positive, or if the flow rate is not finite.
    pub fn compute(
        flow: f64,
        diameter: f64,
        density: f64,
        viscosity: f64,
    ) -> HydraulicsResult<Self> {
        check_finite(flow, "flow rate")?;
        check_positive(density, "density")?;
        check_positive(viscosity, "viscosity")?;

        let area = checked_area(diameter)?;
        let velocity = velocity(flow, area);
        let reynolds = reynolds(density, velocity, diameter, viscosity);

        check_finite(reynolds, "Reynolds number")?;

        Ok(Self {
            area,
            velocity,
            kinetic_head: kinetic_head(velocity),
            reynolds,
            regime: FlowRegime::classify(reynolds),
        })
    }

    /// All-zero state used when the inputs are outside the physical domain.
    pub fn stagnant() -> Self {
        Self {
            area: 0.0,
            velocity: 0.0,
            kinetic_head: 0.0,
            reynolds: 0.0,
            regime: FlowRegime::Laminar,
        }
    }
}
