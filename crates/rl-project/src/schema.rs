//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fluid: FluidDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
}

impl Scenario {
    /// The reference design point.
    pub fn reference() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: "Reference design".to_string(),
            description: Some("Water at 20 °C, 6\" commercial steel, 25 L/s".to_string()),
            fluid: FluidDef::default(),
            solver: SolverDef::default(),
            sweep: None,
        }
    }
}

/// Fluid and pipe inputs, SI units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub flow_m3s: f64,
    pub diameter_m: f64,
    pub roughness_m: f64,
    pub density_kgm3: f64,
    pub viscosity_pas: f64,
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            flow_m3s: 0.025,
            diameter_m: 0.1541,
            roughness_m: 0.000046,
            density_kgm3: 998.0,
            viscosity_pas: 0.0010,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub colebrook_rel_tol: f64,
    pub colebrook_max_iterations: usize,
    pub cache_capacity: usize,
    /// Piezometric sub-points per station
    pub profile_sub_points: usize,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            colebrook_rel_tol: 1e-8,
            colebrook_max_iterations: 50,
            cache_capacity: 64,
            profile_sub_points: 5,
        }
    }
}

/// Flow-rate sweep for power curves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub start_m3s: f64,
    pub end_m3s: f64,
    pub points: usize,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            start_m3s: 0.005,
            end_m3s: 0.100,
            points: 20,
        }
    }
}
