//! High-level solver interface.

use rl_core::units::convert::kw_to_hp;
use rl_hydraulics::{
    ColebrookConfig, FlowState, FrictionComparison, colebrook_with, darcy_head_loss,
    hydraulic_power_kw, minor_head_loss,
};
use rl_topology::{SegmentDefinition, catalog};

use crate::params::FluidParameters;
use crate::result::{AggregateResult, SegmentResult, SystemTotals};
use crate::role::{StationLosses, strategy};

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolverConfig {
    pub colebrook: ColebrookConfig,
}

/// Solve every segment of the catalog with the default configuration.
pub fn solve_system(params: &FluidParameters) -> AggregateResult {
    solve_system_with(params, &SolverConfig::default())
}

/// Solve every segment of the catalog.
///
/// This function:
/// 1. Short-circuits degenerate inputs to an all-zero result
/// 2. Computes the flow state and friction factors shared by all segments
/// 3. Applies each segment's role strategy to its station losses
/// 4. Sums the totals in segment order
pub fn solve_system_with(params: &FluidParameters, config: &SolverConfig) -> AggregateResult {
    let defs = catalog();

    let state = if params.is_degenerate() {
        None
    } else {
        match FlowState::compute(
            params.flow_m3s,
            params.diameter_m,
            params.density_kgm3,
            params.viscosity_pas,
        ) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(error = %err, "flow state rejected; using degenerate result");
                None
            }
        }
    };

    let Some(state) = state else {
        tracing::debug!(?params, "degenerate inputs");
        return degenerate_result(params, defs);
    };

    let rr = params.relative_roughness();
    let solution = colebrook_with(state.reynolds, rr, &config.colebrook);
    let friction = FrictionComparison::with_colebrook(solution.friction_factor, state.reynolds, rr);

    tracing::debug!(
        reynolds = state.reynolds,
        regime = %state.regime,
        f_colebrook = friction.colebrook,
        iterations = solution.iterations,
        "flow state"
    );

    let segments: Vec<SegmentResult> = defs
        .iter()
        .map(|def| {
            let mut seg = solve_segment(def, params, &state, friction);
            seg.colebrook_iterations = solution.iterations;
            seg.colebrook_converged = solution.converged;
            seg
        })
        .collect();
    let totals = SystemTotals::sum(&segments, defs);

    // Positive inputs at the edges of f64 (subnormal or huge flows) can
    // overflow the loss terms.
    if !(totals.is_finite() && segments.iter().all(SegmentResult::is_finite)) {
        tracing::warn!(?params, "non-finite heads; using degenerate result");
        return degenerate_result(params, defs);
    }

    tracing::debug!(
        total_power_kw = totals.hydraulic_power_kw,
        head_added_m = totals.head_added_m,
        "system solved"
    );

    AggregateResult {
        params: *params,
        degenerate: false,
        segments,
        totals,
    }
}

fn degenerate_result(params: &FluidParameters, defs: &[SegmentDefinition]) -> AggregateResult {
    let segments: Vec<SegmentResult> = defs.iter().map(SegmentResult::degenerate).collect();
    let totals = SystemTotals::sum(&segments, defs);
    AggregateResult {
        params: *params,
        degenerate: true,
        segments,
        totals,
    }
}

fn solve_segment(
    def: &SegmentDefinition,
    params: &FluidParameters,
    state: &FlowState,
    friction: FrictionComparison,
) -> SegmentResult {
    let d = params.diameter_m;
    let hv = state.kinetic_head;
    let length = def.length_per_station();

    let losses = StationLosses {
        friction_m: darcy_head_loss(friction.colebrook, length, d, hv),
        minor_m: minor_head_loss(def.k_total_per_station(), hv),
    };
    let heads = strategy(def.role).station_heads(def, losses);
    let total_head = heads.head_m * def.station_count();

    let power_kw = if def.is_pump() {
        hydraulic_power_kw(params.density_kgm3, params.flow_m3s, total_head)
    } else {
        0.0
    };

    tracing::debug!(
        segment = %def.id,
        head_per_station_m = heads.head_m,
        power_kw,
        "segment solved"
    );

    SegmentResult {
        area_m2: state.area,
        velocity_mps: state.velocity,
        kinetic_head_m: hv,
        reynolds: state.reynolds,
        regime: state.regime,
        friction,
        friction_loss_m: losses.friction_m,
        friction_loss_haaland_m: darcy_head_loss(friction.haaland, length, d, hv),
        minor_loss_m: losses.minor_m,
        elevation_per_station_m: heads.elevation_m,
        head_per_station_m: heads.head_m,
        head_added_per_station_m: heads.head_added_m,
        total_head_m: total_head,
        throttled_head_m: heads.throttled_m,
        hydraulic_power_kw: power_kw,
        shaft_power_hp: kw_to_hp(power_kw),
        ..SegmentResult::degenerate(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_segment_one() {
        let result = solve_system(&FluidParameters::reference());
        let s1 = result.get(1).unwrap();
        assert_relative_eq!(s1.total_head_m, 102.35, max_relative = 0.01);
        assert_relative_eq!(s1.hydraulic_power_kw, 25.05, max_relative = 0.01);
        assert_relative_eq!(s1.shaft_power_hp, 33.59, max_relative = 0.01);
    }

    #[test]
    fn shared_flow_state() {
        let result = solve_system(&FluidParameters::reference());
        let v = result.segments[0].velocity_mps;
        assert!(result.iter().all(|s| s.velocity_mps == v));
        assert_relative_eq!(v, 1.34043, max_relative = 1e-4);
    }

    #[test]
    fn valves_draw_no_power() {
        let result = solve_system(&FluidParameters::reference());
        for seg in result.iter().filter(|s| s.is_descending) {
            assert_eq!(seg.hydraulic_power_kw, 0.0);
            assert_eq!(seg.head_added_per_station_m, 0.0);
            assert!(seg.throttled_head_m > 0.0);
        }
    }

    #[test]
    fn total_head_is_per_station_times_count() {
        let result = solve_system(&FluidParameters::reference());
        for seg in &result {
            assert_eq!(
                seg.total_head_m,
                seg.head_per_station_m * f64::from(seg.stations)
            );
        }
    }

    #[test]
    fn degenerate_keeps_catalog_fields() {
        let result = solve_system(&FluidParameters::reference().with_diameter(0.0));
        assert!(result.degenerate);
        let s2 = result.get(2).unwrap();
        assert_eq!(s2.stations, 2);
        assert!(s2.is_pump);
        assert_relative_eq!(s2.length_per_station_m, 130.70);
        assert_eq!(s2.total_head_m, 0.0);
        assert_eq!(result.totals.hydraulic_power_kw, 0.0);
    }
}
