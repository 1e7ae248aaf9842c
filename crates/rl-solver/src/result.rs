//! Solver output types.

use rl_core::units::convert::kw_to_hp;
use rl_hydraulics::{FlowRegime, FrictionComparison};
use rl_topology::{SegmentDefinition, SegmentId, SegmentKind, SegmentRole};
use serde::Serialize;

use crate::error::SolverResult;
use crate::params::FluidParameters;

/// Hydraulic state of one segment. All heads are per station unless the
/// field name says `total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentResult {
    pub segment: SegmentId,
    pub role: SegmentRole,
    pub kind: SegmentKind,
    pub is_descending: bool,
    pub is_pump: bool,
    pub stations: u32,
    pub length_per_station_m: f64,
    pub area_m2: f64,
    pub velocity_mps: f64,
    pub kinetic_head_m: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub friction: FrictionComparison,
    pub colebrook_iterations: usize,
    pub colebrook_converged: bool,
    /// Darcy loss with the Colebrook factor (m)
    pub friction_loss_m: f64,
    /// Darcy loss with the Haaland factor (m)
    pub friction_loss_haaland_m: f64,
    pub minor_loss_m: f64,
    pub elevation_per_station_m: f64,
    pub head_per_station_m: f64,
    pub head_added_per_station_m: f64,
    /// Per-station head × station count (m)
    pub total_head_m: f64,
    /// Surplus head dissipated per throttling station (m)
    pub throttled_head_m: f64,
    pub hydraulic_power_kw: f64,
    pub shaft_power_hp: f64,
}

impl SegmentResult {
    /// All-zero result that still carries the catalog-derived fields.
    pub fn degenerate(def: &SegmentDefinition) -> Self {
        Self {
            segment: def.id,
            role: def.role,
            kind: def.kind(),
            is_descending: def.is_descending(),
            is_pump: def.is_pump(),
            stations: def.stations,
            length_per_station_m: def.length_per_station(),
            area_m2: 0.0,
            velocity_mps: 0.0,
            kinetic_head_m: 0.0,
            reynolds: 0.0,
            regime: FlowRegime::Laminar,
            friction: FrictionComparison {
                colebrook: 0.0,
                haaland: 0.0,
                swamee_jain: 0.0,
            },
            colebrook_iterations: 0,
            colebrook_converged: true,
            friction_loss_m: 0.0,
            friction_loss_haaland_m: 0.0,
            minor_loss_m: 0.0,
            elevation_per_station_m: def.elevation_per_station(),
            head_per_station_m: 0.0,
            head_added_per_station_m: 0.0,
            total_head_m: 0.0,
            throttled_head_m: 0.0,
            hydraulic_power_kw: 0.0,
            shaft_power_hp: 0.0,
        }
    }

    pub fn station_count(&self) -> f64 {
        f64::from(self.stations.max(1))
    }

    /// True when every computed figure is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.area_m2,
            self.velocity_mps,
            self.kinetic_head_m,
            self.reynolds,
            self.friction.colebrook,
            self.friction.haaland,
            self.friction.swamee_jain,
            self.friction_loss_m,
            self.friction_loss_haaland_m,
            self.minor_loss_m,
            self.head_per_station_m,
            self.head_added_per_station_m,
            self.total_head_m,
            self.throttled_head_m,
            self.hydraulic_power_kw,
            self.shaft_power_hp,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Friction plus fitting losses of one station (m).
    pub fn losses_per_station_m(&self) -> f64 {
        self.friction_loss_m + self.minor_loss_m
    }
}

/// Whole-system sums. Every figure is summed over segments in index order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SystemTotals {
    pub hydraulic_power_kw: f64,
    pub shaft_power_hp: f64,
    pub pipe_length_m: f64,
    pub distance_m: f64,
    /// Head added by all pump stations (m)
    pub head_added_m: f64,
    pub friction_loss_m: f64,
    pub minor_loss_m: f64,
    /// Head dissipated by all throttling stations (m)
    pub throttled_head_m: f64,
    pub pump_stations: u32,
    pub throttling_stations: u32,
}

impl SystemTotals {
    pub(crate) fn sum(segments: &[SegmentResult], defs: &[SegmentDefinition]) -> Self {
        let mut totals = Self::default();
        for (seg, def) in segments.iter().zip(defs) {
            let n = seg.station_count();
            totals.hydraulic_power_kw += seg.hydraulic_power_kw;
            totals.pipe_length_m += def.pipe_length_m;
            totals.distance_m += def.distance_m;
            totals.head_added_m += seg.head_added_per_station_m * n;
            totals.friction_loss_m += seg.friction_loss_m * n;
            totals.minor_loss_m += seg.minor_loss_m * n;
            totals.throttled_head_m += seg.throttled_head_m * n;
            if seg.is_pump {
                totals.pump_stations += seg.stations;
            } else {
                totals.throttling_stations += seg.stations;
            }
        }
        totals.shaft_power_hp = kw_to_hp(totals.hydraulic_power_kw);
        totals
    }

    pub fn is_finite(&self) -> bool {
        [
            self.hydraulic_power_kw,
            self.shaft_power_hp,
            self.head_added_m,
            self.friction_loss_m,
            self.minor_loss_m,
            self.throttled_head_m,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Result of one system solve: segments 1..=8 in order plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub params: FluidParameters,
    /// True when the inputs were outside the physical domain
    pub degenerate: bool,
    pub segments: Vec<SegmentResult>,
    pub totals: SystemTotals,
}

impl AggregateResult {
    /// Result for a raw 1-based segment index.
    ///
    /// # Errors
    /// `SegmentOutOfRange` for indices outside `1..=8`.
    pub fn get(&self, index: usize) -> SolverResult<&SegmentResult> {
        let id = SegmentId::new(index)?;
        Ok(self.segment(id))
    }

    pub fn segment(&self, id: SegmentId) -> &SegmentResult {
        &self.segments[id.get() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentResult> {
        self.segments.iter()
    }

    pub fn pumps(&self) -> impl Iterator<Item = &SegmentResult> {
        self.segments.iter().filter(|s| s.is_pump)
    }
}

impl<'a> IntoIterator for &'a AggregateResult {
    type Item = &'a SegmentResult;
    type IntoIter = std::slice::Iter<'a, SegmentResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
