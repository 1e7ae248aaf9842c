use std::path::Path;

#[test]
fn scenarios_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios");
    let scenarios = [
        "01_reference.yaml",
        "02_peak_demand.yaml",
        "03_power_curve.yaml",
    ];

    for name in scenarios {
        let path = root.join(name);
        let scenario =
            rl_project::load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        rl_project::validate_scenario(&scenario)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}

#[test]
fn reference_file_matches_builtin_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/01_reference.yaml");
    let scenario = rl_project::load_yaml(&path).unwrap();
    assert_eq!(scenario.fluid, rl_project::FluidDef::default());
    assert_eq!(scenario.solver, rl_project::SolverDef::default());
    assert!(scenario.sweep.is_none());
}

#[test]
fn partial_solver_section_keeps_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/02_peak_demand.yaml");
    let scenario = rl_project::load_yaml(&path).unwrap();
    assert_eq!(scenario.solver.profile_sub_points, 10);
    assert_eq!(scenario.solver.colebrook_max_iterations, 50);
}
