//! Translation of scenario definitions into solver inputs.

use rl_hydraulics::ColebrookConfig;
use rl_project::{FluidDef, Scenario, SolverDef, SweepDef};
use rl_solver::{FluidParameters, RangeWarning, SolverConfig};

/// Everything a run needs, resolved from a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRuntime {
    pub name: String,
    pub params: FluidParameters,
    pub config: SolverConfig,
    pub cache_capacity: usize,
    pub profile_sub_points: usize,
    pub sweep: Option<SweepDef>,
    /// Inputs outside the reference slider ranges
    pub warnings: Vec<RangeWarning>,
}

pub fn fluid_parameters(fluid: &FluidDef) -> FluidParameters {
    FluidParameters::new(
        fluid.flow_m3s,
        fluid.diameter_m,
        fluid.roughness_m,
        fluid.density_kgm3,
        fluid.viscosity_pas,
    )
}

pub fn solver_config(solver: &SolverDef) -> SolverConfig {
    SolverConfig {
        colebrook: ColebrookConfig {
            max_iterations: solver.colebrook_max_iterations,
            rel_tol: solver.colebrook_rel_tol,
        },
    }
}

/// Resolve a scenario. Out-of-range inputs are logged, never rejected.
pub fn compile_scenario(scenario: &Scenario) -> ScenarioRuntime {
    let params = fluid_parameters(&scenario.fluid);
    let warnings = params.check_reference_ranges();
    for warning in &warnings {
        tracing::warn!(scenario = %scenario.name, "{warning}");
    }

    ScenarioRuntime {
        name: scenario.name.clone(),
        params,
        config: solver_config(&scenario.solver),
        cache_capacity: scenario.solver.cache_capacity,
        profile_sub_points: scenario.solver.profile_sub_points,
        sweep: scenario.sweep,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenario_compiles_to_reference_params() {
        let runtime = compile_scenario(&Scenario::reference());
        assert_eq!(runtime.params, FluidParameters::reference());
        assert_eq!(runtime.config, SolverConfig::default());
        assert!(runtime.warnings.is_empty());
        assert_eq!(runtime.profile_sub_points, 5);
    }

    #[test]
    fn out_of_range_inputs_warn() {
        let mut scenario = Scenario::reference();
        scenario.fluid.density_kgm3 = 1200.0;
        let runtime = compile_scenario(&scenario);
        assert_eq!(runtime.warnings.len(), 1);
        assert_eq!(runtime.warnings[0].parameter, "density_kgm3");
    }
}
