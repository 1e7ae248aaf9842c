//! Smoke tests for the rl-app service layer.

use std::path::PathBuf;

use approx::assert_relative_eq;
use rl_app::{
    DEFAULT_TOLERANCE, RunService, compare_with_reference, export, load_scenario, loss_breakdown,
    save_scenario, segment_table, solve_scenario,
};
use rl_project::{ReferenceDataset, Scenario};

fn scenario_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path.push("scenarios");
    path.push(name);
    path
}

#[test]
fn reference_scenario_end_to_end() {
    let scenario = load_scenario(&scenario_path("01_reference.yaml")).unwrap();
    let run = solve_scenario(&scenario).unwrap();

    assert!(run.warnings.is_empty());
    assert!(!run.result.degenerate);

    let table = segment_table(&run.result);
    assert_relative_eq!(table[0].total_head_m, 102.35, max_relative = 0.01);
    assert_relative_eq!(table[0].power_kw, 25.05, max_relative = 0.05);

    let breakdown = loss_breakdown(&run.result);
    assert_eq!(breakdown.rows.len(), 8);

    let min = run.profile.min_pressure_head().unwrap();
    assert!(min.pressure_head_m.is_finite());
}

#[test]
fn power_curve_scenario_runs_sweep() {
    let scenario = load_scenario(&scenario_path("03_power_curve.yaml")).unwrap();
    let run = solve_scenario(&scenario).unwrap();
    let sweep = run.sweep.unwrap();
    assert_eq!(sweep.len(), 20);
    assert!(sweep.windows(2).all(|w| w[1].total_power_kw > w[0].total_power_kw));

    let mut csv = Vec::new();
    export::write_sweep_csv(&mut csv, &sweep).unwrap();
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 21);
}

#[test]
fn comparison_against_builtin_dataset() {
    let dataset = ReferenceDataset::builtin().unwrap();
    let mut service = RunService::for_scenario(&Scenario::reference());
    let run = service.run(&Scenario::reference()).unwrap();

    let report = compare_with_reference(&run.result, &dataset, DEFAULT_TOLERANCE).unwrap();
    assert!(report.kind_mismatches.is_empty());
    assert!(
        report
            .entries
            .iter()
            .filter(|e| e.quantity == "head_per_station_m")
            .all(|e| e.within_tolerance)
    );
}

#[test]
fn save_and_reload_scenario() {
    let path = std::env::temp_dir().join("rl_app_saved_scenario.json");
    let scenario = Scenario::reference();
    save_scenario(&path, &scenario).unwrap();
    assert_eq!(load_scenario(&path).unwrap(), scenario);
}
