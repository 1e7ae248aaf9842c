//! Scenario loading, saving, validation, and introspection.

use std::path::Path;

use rl_project::Scenario;

use crate::error::{AppError, AppResult};

/// One-line description of a scenario for listings.
#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub name: String,
    pub flow_lps: f64,
    pub diameter_mm: f64,
    pub has_sweep: bool,
}

/// Load a scenario file (YAML, or JSON by extension).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }
    let scenario = rl_project::load(path)?;
    tracing::debug!(path = %path.display(), name = %scenario.name, "scenario loaded");
    Ok(scenario)
}

/// Save a scenario, choosing the format from the extension.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        rl_project::save_json(path, scenario)?;
    } else {
        rl_project::save_yaml(path, scenario)?;
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    rl_project::validate_scenario(scenario)?;
    Ok(())
}

pub fn summarize(scenario: &Scenario) -> ScenarioSummary {
    ScenarioSummary {
        name: scenario.name.clone(),
        flow_lps: rl_core::units::convert::m3ps_to_lps(scenario.fluid.flow_m3s),
        diameter_mm: scenario.fluid.diameter_m * 1000.0,
        has_sweep: scenario.sweep.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("rl_app_missing_scenario.yaml");
        match load_scenario(&path) {
            Err(AppError::ScenarioFileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn summary_units() {
        let summary = summarize(&Scenario::reference());
        assert_relative_eq!(summary.flow_lps, 25.0, max_relative = 1e-12);
        assert_relative_eq!(summary.diameter_mm, 154.1, max_relative = 1e-12);
        assert!(!summary.has_sweep);
    }
}
