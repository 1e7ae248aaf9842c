//! Fluid and pipe parameters shared by every segment.

use rl_core::numeric::is_positive_finite;
use rl_core::units::{Density, DynVisc, Length, VolumeRate};
use serde::{Deserialize, Serialize};
use uom::si::dynamic_viscosity::pascal_second;
use uom::si::length::meter;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::volume_rate::cubic_meter_per_second;

/// System-wide inputs of one solve. The pipe is uniform, so diameter,
/// roughness and flow are the same in every segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidParameters {
    /// Volumetric flow rate Q (m³/s)
    pub flow_m3s: f64,
    /// Inner pipe diameter D (m)
    pub diameter_m: f64,
    /// Absolute wall roughness ε (m)
    pub roughness_m: f64,
    /// Density ρ (kg/m³)
    pub density_kgm3: f64,
    /// Dynamic viscosity μ (Pa·s)
    pub viscosity_pas: f64,
}

/// Inclusive slider ranges of the reference scenario.
pub mod reference_ranges {
    pub const FLOW_M3S: (f64, f64) = (0.005, 0.100);
    pub const DIAMETER_M: (f64, f64) = (0.05, 0.30);
    pub const ROUGHNESS_M: (f64, f64) = (1e-5, 1e-3);
    pub const DENSITY_KGM3: (f64, f64) = (900.0, 1100.0);
    pub const VISCOSITY_PAS: (f64, f64) = (5e-4, 2e-3);
}

/// An input outside its reference range. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    pub parameter: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} is outside the reference range [{}, {}]",
            self.parameter, self.value, self.min, self.max
        )
    }
}

/// Exact-bits key of a parameter set, used for memoisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamKey([u64; 5]);

impl FluidParameters {
    pub fn new(
        flow_m3s: f64,
        diameter_m: f64,
        roughness_m: f64,
        density_kgm3: f64,
        viscosity_pas: f64,
    ) -> Self {
        Self {
            flow_m3s,
            diameter_m,
            roughness_m,
            density_kgm3,
            viscosity_pas,
        }
    }

    /// Water at ~20 °C in a 6" commercial steel pipe at 25 L/s.
    pub fn reference() -> Self {
        Self::new(0.025, 0.1541, 0.000046, 998.0, 0.0010)
    }

    pub fn from_quantities(
        flow: VolumeRate,
        diameter: Length,
        roughness: Length,
        density: Density,
        viscosity: DynVisc,
    ) -> Self {
        Self::new(
            flow.get::<cubic_meter_per_second>(),
            diameter.get::<meter>(),
            roughness.get::<meter>(),
            density.get::<kilogram_per_cubic_meter>(),
            viscosity.get::<pascal_second>(),
        )
    }

    pub fn with_flow(self, flow_m3s: f64) -> Self {
        Self { flow_m3s, ..self }
    }

    pub fn with_diameter(self, diameter_m: f64) -> Self {
        Self { diameter_m, ..self }
    }

    pub fn with_roughness(self, roughness_m: f64) -> Self {
        Self {
            roughness_m,
            ..self
        }
    }

    /// ε/D; zero when the diameter is not positive.
    pub fn relative_roughness(&self) -> f64 {
        if self.diameter_m > 0.0 {
            self.roughness_m / self.diameter_m
        } else {
            0.0
        }
    }

    /// True when the inputs lie outside the physical domain and the solve
    /// must short-circuit to an all-zero result.
    pub fn is_degenerate(&self) -> bool {
        !(is_positive_finite(self.flow_m3s)
            && is_positive_finite(self.diameter_m)
            && is_positive_finite(self.density_kgm3)
            && is_positive_finite(self.viscosity_pas)
            && self.roughness_m.is_finite()
            && self.roughness_m >= 0.0)
    }

    /// Inputs outside the reference slider ranges.
    pub fn check_reference_ranges(&self) -> Vec<RangeWarning> {
        use reference_ranges::*;

        [
            ("flow_m3s", self.flow_m3s, FLOW_M3S),
            ("diameter_m", self.diameter_m, DIAMETER_M),
            ("roughness_m", self.roughness_m, ROUGHNESS_M),
            ("density_kgm3", self.density_kgm3, DENSITY_KGM3),
            ("viscosity_pas", self.viscosity_pas, VISCOSITY_PAS),
        ]
        .into_iter()
        .filter(|(_, value, (min, max))| !(*min..=*max).contains(value))
        .map(|(parameter, value, (min, max))| RangeWarning {
            parameter,
            value,
            min,
            max,
        })
        .collect()
    }

    pub fn key(&self) -> ParamKey {
        ParamKey([
            self.flow_m3s.to_bits(),
            self.diameter_m.to_bits(),
            self.roughness_m.to_bits(),
            self.density_kgm3.to_bits(),
            self.viscosity_pas.to_bits(),
        ])
    }
}

impl Default for FluidParameters {
    fn default() -> Self {
        Self::reference()
    }
}
