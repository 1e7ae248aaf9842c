//! Darcy friction factor correlations.
//!
//! Three independent correlations are provided over the same inputs
//! (Reynolds number and relative roughness ε/D):
//!
//! - [`colebrook`]: implicit Colebrook–White equation, solved iteratively
//! - [`haaland`]: explicit Haaland approximation
//! - [`swamee_jain`]: explicit Swamee–Jain approximation
//!
//! Each one branches to the laminar closed form `f = 64/Re` below
//! Re = 2300, so the turbulent formulas are never evaluated outside their
//! range of validity. A non-positive or non-finite Reynolds number yields
//! `f = 0` (stagnant pipe).

use crate::common::{LAMINAR_RE_LIMIT, check_positive};
use crate::error::{HydraulicsError, HydraulicsResult};
use rl_core::numeric::relative_deviation;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Iteration settings for the Colebrook–White solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColebrookConfig {
    /// Maximum fixed-point iterations
    pub max_iterations: usize,
    /// Relative change in f below which the iteration stops
    pub rel_tol: f64,
}

impl Default for ColebrookConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            rel_tol: 1e-8,
        }
    }
}

/// Outcome of a Colebrook–White solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColebrookSolution {
    pub friction_factor: f64,
    /// Fixed-point iterations performed (0 for the laminar closed form)
    pub iterations: usize,
    pub converged: bool,
}

#[inline]
fn is_flowing(reynolds: f64) -> bool {
    reynolds.is_finite() && reynolds > 0.0
}

/// Laminar Hagen–Poiseuille friction factor, `64/Re`.
#[inline]
pub fn laminar(reynolds: f64) -> f64 {
    if !is_flowing(reynolds) {
        return 0.0;
    }
    64.0 / reynolds
}

/// Colebrook–White friction factor with default iteration settings.
pub fn colebrook(reynolds: f64, relative_roughness: f64) -> f64 {
    colebrook_with(reynolds, relative_roughness, &ColebrookConfig::default()).friction_factor
}

/// Colebrook–White friction factor:
///
/// ```text
/// 1/√f = −2·log10( (ε/D)/3.7 + 2.51/(Re·√f) )
/// ```
///
/// Solved by fixed-point substitution on `x = 1/√f`, starting from the
/// Swamee–Jain estimate. If the iteration cap is reached the last iterate is
/// returned with `converged = false`; this is an approximation, not an error.
pub fn colebrook_with(
    reynolds: f64,
    relative_roughness: f64,
    config: &ColebrookConfig,
) -> ColebrookSolution {
    if !is_flowing(reynolds) {
        return ColebrookSolution {
            friction_factor: 0.0,
            iterations: 0,
            converged: true,
        };
    }
    if reynolds < LAMINAR_RE_LIMIT {
        return ColebrookSolution {
            friction_factor: laminar(reynolds),
            iterations: 0,
            converged: true,
        };
    }

    let rough_term = relative_roughness.max(0.0) / 3.7;
    let mut f = swamee_jain(reynolds, relative_roughness);

    for iter in 1..=config.max_iterations {
        let x = -2.0 * (rough_term + 2.51 / (reynolds * f.sqrt())).log10();
        let f_next = 1.0 / (x * x);

        if (f_next - f).abs() <= config.rel_tol * f_next {
            return ColebrookSolution {
                friction_factor: f_next,
                iterations: iter,
                converged: true,
            };
        }
        f = f_next;
    }

    tracing::warn!(
        reynolds,
        relative_roughness,
        max_iterations = config.max_iterations,
        friction_factor = f,
        "Colebrook iteration hit its cap; returning last iterate"
    );

    ColebrookSolution {
        friction_factor: f,
        iterations: config.max_iterations,
        converged: false,
    }
}

/// Residual of the Colebrook–White equation in `1/√f` form.
///
/// Zero for an exact solution; used to check iterates.
pub fn colebrook_residual(friction_factor: f64, reynolds: f64, relative_roughness: f64) -> f64 {
    let inv_sqrt = 1.0 / friction_factor.sqrt();
    let rhs = -2.0
        * (relative_roughness.max(0.0) / 3.7 + 2.51 / (reynolds * friction_factor.sqrt())).log10();
    inv_sqrt - rhs
}

/// Haaland explicit friction factor:
///
/// ```text
/// 1/√f = −1.8·log10( ((ε/D)/3.7)^1.11 + 6.9/Re )
/// ```
pub fn haaland(reynolds: f64, relative_roughness: f64) -> f64 {
    if !is_flowing(reynolds) {
        return 0.0;
    }
    if reynolds < LAMINAR_RE_LIMIT {
        return laminar(reynolds);
    }
    let x = -1.8 * ((relative_roughness.max(0.0) / 3.7).powf(1.11) + 6.9 / reynolds).log10();
    1.0 / (x * x)
}

/// Swamee–Jain explicit friction factor:
///
/// ```text
/// f = 0.25 / [ log10( (ε/D)/3.7 + 5.74/Re^0.9 ) ]²
/// ```
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    if !is_flowing(reynolds) {
        return 0.0;
    }
    if reynolds < LAMINAR_RE_LIMIT {
        return laminar(reynolds);
    }
    let log_term = (relative_roughness.max(0.0) / 3.7 + 5.74 / reynolds.powf(0.9)).log10();
    0.25 / (log_term * log_term)
}

/// Friction factor correlation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrictionCorrelation {
    #[default]
    Colebrook,
    Haaland,
    SwameeJain,
}

impl FrictionCorrelation {
    pub const ALL: [FrictionCorrelation; 3] = [
        FrictionCorrelation::Colebrook,
        FrictionCorrelation::Haaland,
        FrictionCorrelation::SwameeJain,
    ];

    pub fn friction_factor(self, reynolds: f64, relative_roughness: f64) -> f64 {
        match self {
            FrictionCorrelation::Colebrook => colebrook(reynolds, relative_roughness),
            FrictionCorrelation::Haaland => haaland(reynolds, relative_roughness),
            FrictionCorrelation::SwameeJain => swamee_jain(reynolds, relative_roughness),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FrictionCorrelation::Colebrook => "colebrook",
            FrictionCorrelation::Haaland => "haaland",
            FrictionCorrelation::SwameeJain => "swamee_jain",
        }
    }
}

impl std::fmt::Display for FrictionCorrelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrictionCorrelation {
    type Err = HydraulicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "colebrook" | "colebrook_white" => Ok(FrictionCorrelation::Colebrook),
            "haaland" => Ok(FrictionCorrelation::Haaland),
            "swamee_jain" | "swameejain" => Ok(FrictionCorrelation::SwameeJain),
            _ => Err(HydraulicsError::UnknownCorrelation {
                name: s.to_string(),
            }),
        }
    }
}

/// Side-by-side friction factors from all three correlations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionComparison {
    pub colebrook: f64,
    pub haaland: f64,
    pub swamee_jain: f64,
}

impl FrictionComparison {
    pub fn compute(reynolds: f64, relative_roughness: f64) -> Self {
        Self::with_colebrook(
            colebrook(reynolds, relative_roughness),
            reynolds,
            relative_roughness,
        )
    }

    /// Build a comparison around an already solved Colebrook factor.
    pub fn with_colebrook(colebrook: f64, reynolds: f64, relative_roughness: f64) -> Self {
        Self {
            colebrook,
            haaland: haaland(reynolds, relative_roughness),
            swamee_jain: swamee_jain(reynolds, relative_roughness),
        }
    }

    pub fn get(&self, correlation: FrictionCorrelation) -> f64 {
        match correlation {
            FrictionCorrelation::Colebrook => self.colebrook,
            FrictionCorrelation::Haaland => self.haaland,
            FrictionCorrelation::SwameeJain => self.swamee_jain,
        }
    }

    /// Relative deviation of Haaland from Colebrook.
    pub fn haaland_deviation(&self) -> f64 {
        relative_deviation(self.haaland, self.colebrook)
    }

    /// Relative deviation of Swamee–Jain from Colebrook.
    pub fn swamee_jain_deviation(&self) -> f64 {
        relative_deviation(self.swamee_jain, self.colebrook)
    }

    /// Largest absolute relative deviation of the explicit correlations.
    pub fn max_abs_deviation(&self) -> f64 {
        self.haaland_deviation()
            .abs()
            .max(self.swamee_jain_deviation().abs())
    }
}

/// Relative roughness ε/D with the `D > 0` precondition enforced.
pub fn relative_roughness(roughness: f64, diameter: f64) -> HydraulicsResult<f64> {
    check_positive(diameter, "pipe diameter")?;
    if !roughness.is_finite() || roughness < 0.0 {
        return Err(HydraulicsError::NonPhysical {
            what: "roughness must be non-negative",
        });
    }
    Ok(roughness / diameter)
}
