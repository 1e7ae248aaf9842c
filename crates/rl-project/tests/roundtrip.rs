use rl_project::schema::*;
use rl_project::{ProjectError, load_json, load_yaml, save_json, save_yaml, validate_scenario};

#[test]
fn roundtrip_yaml_reference() {
    let scenario = Scenario::reference();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("rl_project_roundtrip_reference.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_with_sweep() {
    let scenario = Scenario {
        name: "Sweep".to_string(),
        description: None,
        sweep: Some(SweepDef::default()),
        solver: SolverDef {
            profile_sub_points: 8,
            ..SolverDef::default()
        },
        ..Scenario::reference()
    };

    let path = std::env::temp_dir().join("rl_project_roundtrip_sweep.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn save_rejects_invalid_scenario() {
    let mut scenario = Scenario::reference();
    scenario.fluid.diameter_m = -0.1;

    let path = std::env::temp_dir().join("rl_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &scenario),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn minimal_v0_file_is_migrated() {
    let path = std::env::temp_dir().join("rl_project_minimal_v0.yaml");
    std::fs::write(&path, "version: 0\nname: Draft\n").unwrap();

    let scenario = load_yaml(&path).unwrap();
    assert_eq!(scenario.version, rl_project::LATEST_VERSION);
    assert_eq!(scenario.fluid, FluidDef::default());
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("rl_project_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(ProjectError::Io(_))));
}
