//! Integration tests for the system solver.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rl_solver::{
    FluidParameters, PiezometricEvent, SolveCache, SolverError, piezometric_profile, solve_system,
};
use rl_topology::TopologyError;

#[test]
fn reference_scenario_heads() {
    let result = solve_system(&FluidParameters::reference());

    // Per-station heads of the reference design (m).
    let expected = [102.35, 101.65, 101.58, 2.89, 1.43, 1.33, 1.38, 120.56];
    for (seg, head) in result.iter().zip(expected) {
        assert_relative_eq!(seg.head_per_station_m, head, max_relative = 0.01);
    }

    let s1 = result.get(1).unwrap();
    assert_relative_eq!(s1.hydraulic_power_kw, 25.05, max_relative = 0.05);
    assert_relative_eq!(s1.friction.colebrook, 0.017649, max_relative = 1e-3);
    assert_relative_eq!(s1.friction.haaland, 0.017438, max_relative = 0.02);
    assert_relative_eq!(s1.reynolds, 206_147.48, max_relative = 1e-4);
    assert_relative_eq!(s1.area_m2, 0.018_650_7, max_relative = 1e-4);
    assert!(s1.colebrook_converged);

    assert_relative_eq!(result.totals.hydraulic_power_kw, 154.75, max_relative = 0.01);
}

#[test]
fn total_power_is_exact_sum() {
    let result = solve_system(&FluidParameters::reference());
    let mut sum = 0.0;
    for seg in &result {
        sum += seg.hydraulic_power_kw;
    }
    assert_eq!(result.totals.hydraulic_power_kw, sum);
}

#[test]
fn totals_cover_the_catalog() {
    let result = solve_system(&FluidParameters::reference());
    let summary = rl_topology::summary();
    assert_eq!(result.totals.pump_stations, summary.pump_stations);
    assert_eq!(result.totals.throttling_stations, summary.throttling_stations);
    assert_relative_eq!(result.totals.distance_m, summary.total_distance_m);
    assert_relative_eq!(result.totals.pipe_length_m, summary.total_pipe_length_m);
}

#[test]
fn zero_flow_is_all_zero() {
    let result = solve_system(&FluidParameters::reference().with_flow(0.0));
    assert!(result.degenerate);
    for seg in &result {
        assert_eq!(seg.velocity_mps, 0.0);
        assert_eq!(seg.reynolds, 0.0);
        assert_eq!(seg.friction.colebrook, 0.0);
        assert_eq!(seg.friction_loss_m, 0.0);
        assert_eq!(seg.minor_loss_m, 0.0);
        assert_eq!(seg.hydraulic_power_kw, 0.0);
        assert!(seg.stations >= 1);
    }
    assert_eq!(result.totals.hydraulic_power_kw, 0.0);
}

#[test]
fn nan_inputs_never_leak() {
    let params = FluidParameters {
        viscosity_pas: f64::NAN,
        ..FluidParameters::reference()
    };
    let result = solve_system(&params);
    assert!(result.degenerate);
    assert!(result.iter().all(|s| s.total_head_m == 0.0));
}

#[test]
fn extreme_positive_flows_stay_finite() {
    for q in [5e-324, 1e-310, 1e200] {
        let result = solve_system(&FluidParameters::reference().with_flow(q));
        assert!(result.degenerate, "q = {q}");
        for seg in &result {
            assert!(seg.is_finite(), "q = {q}, segment {}", seg.segment);
            assert_eq!(seg.total_head_m, 0.0);
        }
        assert_eq!(result.totals.hydraulic_power_kw, 0.0);
        assert_eq!(result.totals.shaft_power_hp, 0.0);
    }
}

#[test]
fn out_of_range_index_fails_loudly() {
    let result = solve_system(&FluidParameters::reference());
    for index in [0, 9, 100] {
        assert_eq!(
            result.get(index).unwrap_err(),
            SolverError::Topology(TopologyError::SegmentOutOfRange { index })
        );
    }
}

#[test]
fn results_serialize_to_json() {
    let result = solve_system(&FluidParameters::reference());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["degenerate"], false);
    assert_eq!(json["segments"].as_array().unwrap().len(), 8);
    assert_eq!(json["segments"][0]["segment"], 1);
    assert_eq!(json["params"]["flow_m3s"], 0.025);

    let profile = serde_json::to_value(piezometric_profile(&result)).unwrap();
    let events = profile["events"].as_array().unwrap();
    assert_eq!(events[0]["type"], "pump");
    assert!(events.iter().any(|e| e["type"] == "break_tank"));
}

#[test]
fn cache_returns_identical_results() {
    let mut cache = SolveCache::new(8);
    let params = FluidParameters::reference();
    let cached = cache.get_or_solve(&params);
    assert_eq!(*cached, solve_system(&params));
    cache.get_or_solve(&params);
    assert_eq!(cache.hits(), 1);
}

#[test]
fn pumps_raise_egl_by_station_head() {
    let result = solve_system(&FluidParameters::reference());
    let profile = piezometric_profile(&result);
    assert_eq!(profile.pumps().count(), 7);

    for event in profile.pumps() {
        if let PiezometricEvent::Pump {
            segment,
            egl_before_m,
            egl_after_m,
            head_m,
            ..
        } = *event
        {
            assert_relative_eq!(egl_after_m - egl_before_m, head_m, epsilon = 1e-9);
            assert_eq!(head_m, result.segment(segment).head_added_per_station_m);
        }
    }
}

#[test]
fn break_tanks_reset_egl() {
    let result = solve_system(&FluidParameters::reference());
    let profile = piezometric_profile(&result);
    let hv = profile.kinetic_head_m;

    let mut tanks = 0;
    for event in &profile.events {
        if let PiezometricEvent::BreakTank {
            distance_m,
            egl_after_m,
            dissipated_m,
            ..
        } = *event
        {
            tanks += 1;
            let vertex = profile
                .points
                .iter()
                .rev()
                .find(|p| p.distance_m == distance_m)
                .unwrap();
            assert_relative_eq!(egl_after_m, vertex.elevation_m + hv, epsilon = 1e-9);
            assert!(dissipated_m > 0.0);
        }
    }
    assert_eq!(tanks, 4);
}

#[test]
fn pump_segments_end_on_terrain_energy() {
    // A pumped station delivers exactly its elevation gain plus losses, so the
    // EGL returns to terrain level at the end of segment 1.
    let result = solve_system(&FluidParameters::reference());
    let profile = piezometric_profile(&result);
    let end = profile
        .points
        .iter()
        .filter(|p| p.segment.is_some_and(|s| s.get() == 1))
        .last()
        .unwrap();
    assert_relative_eq!(end.egl_m, end.elevation_m, epsilon = 1e-9);
    assert!(profile.min_pressure_head().is_some());
}

proptest! {
    #[test]
    fn increasing_flow_never_decreases_losses(
        q in 0.005f64..0.1,
        dq in 1e-4f64..0.05,
    ) {
        let base = FluidParameters::reference();
        let lo = solve_system(&base.with_flow(q));
        let hi = solve_system(&base.with_flow(q + dq));
        for (a, b) in lo.iter().zip(hi.iter()) {
            prop_assert!(b.reynolds >= a.reynolds);
            prop_assert!(b.friction_loss_m >= a.friction_loss_m);
        }
        prop_assert!(hi.totals.hydraulic_power_kw >= lo.totals.hydraulic_power_kw);
    }

    #[test]
    fn rougher_pipe_needs_more_power(
        eps in 1e-5f64..1e-3,
        deps in 1e-6f64..1e-3,
    ) {
        let base = FluidParameters::reference();
        let smooth = solve_system(&base.with_roughness(eps));
        let rough = solve_system(&base.with_roughness(eps + deps));
        prop_assert!(rough.totals.hydraulic_power_kw >= smooth.totals.hydraulic_power_kw);
    }

    #[test]
    fn results_are_finite_in_reference_ranges(
        q in 0.005f64..0.1,
        d in 0.05f64..0.3,
        rho in 900.0f64..1100.0,
        mu in 5e-4f64..2e-3,
    ) {
        let params = FluidParameters::new(q, d, 4.6e-5, rho, mu);
        let result = solve_system(&params);
        prop_assert!(!result.degenerate);
        for seg in &result {
            prop_assert!(seg.total_head_m.is_finite());
            prop_assert!(seg.throttled_head_m >= 0.0);
        }
        prop_assert!(result.totals.hydraulic_power_kw.is_finite());
    }
}
