//! Run execution and caching service.

use std::sync::Arc;
use std::time::Instant;

use rl_project::Scenario;
use rl_solver::{
    AggregateResult, PiezometricProfile, RangeWarning, SolveCache, SolverConfig, SweepPoint,
    piezometric_profile_with, solve_system_with, sweep_flow_with,
};

use crate::compile::{ScenarioRuntime, compile_scenario};
use crate::error::AppResult;

/// Options for running scenarios.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    /// Run the scenario's sweep when it defines one
    pub include_sweep: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            include_sweep: true,
        }
    }
}

/// Everything produced by one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub name: String,
    pub result: Arc<AggregateResult>,
    pub profile: PiezometricProfile,
    pub sweep: Option<Vec<SweepPoint>>,
    pub warnings: Vec<RangeWarning>,
    pub loaded_from_cache: bool,
    pub solve_time_s: f64,
}

/// Runs scenarios, memoising solves across calls.
#[derive(Debug)]
pub struct RunService {
    cache: SolveCache,
    options: RunOptions,
}

impl RunService {
    pub fn new(cache_capacity: usize, options: RunOptions) -> Self {
        Self {
            cache: SolveCache::new(cache_capacity),
            options,
        }
    }

    pub fn for_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.solver.cache_capacity, RunOptions::default())
    }

    pub fn cache(&self) -> &SolveCache {
        &self.cache
    }

    pub fn run(&mut self, scenario: &Scenario) -> AppResult<ScenarioRun> {
        rl_project::validate_scenario(scenario)?;
        let runtime = compile_scenario(scenario);
        self.run_compiled(runtime)
    }

    pub fn run_compiled(&mut self, runtime: ScenarioRuntime) -> AppResult<ScenarioRun> {
        let started = Instant::now();

        // The cache solves with the default configuration only.
        let cacheable = self.options.use_cache && runtime.config == SolverConfig::default();
        let (result, loaded_from_cache) = if cacheable {
            let hit = self.cache.contains(&runtime.params);
            (self.cache.get_or_solve(&runtime.params), hit)
        } else {
            (Arc::new(solve_system_with(&runtime.params, &runtime.config)), false)
        };

        let profile = piezometric_profile_with(&result, runtime.profile_sub_points);

        let sweep = match (self.options.include_sweep, runtime.sweep) {
            (true, Some(sweep)) => Some(sweep_flow_with(
                &runtime.params,
                sweep.start_m3s,
                sweep.end_m3s,
                sweep.points,
                &runtime.config,
            )?),
            _ => None,
        };

        let solve_time_s = started.elapsed().as_secs_f64();
        tracing::info!(
            scenario = %runtime.name,
            total_power_kw = result.totals.hydraulic_power_kw,
            loaded_from_cache,
            solve_time_s,
            "scenario solved"
        );

        Ok(ScenarioRun {
            name: runtime.name,
            result,
            profile,
            sweep,
            warnings: runtime.warnings,
            loaded_from_cache,
            solve_time_s,
        })
    }
}

/// One-shot run of a scenario without a persistent cache.
pub fn solve_scenario(scenario: &Scenario) -> AppResult<ScenarioRun> {
    let options = RunOptions {
        use_cache: false,
        ..RunOptions::default()
    };
    RunService::new(1, options).run(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_project::SweepDef;

    #[test]
    fn repeated_runs_hit_the_cache() {
        let scenario = Scenario::reference();
        let mut service = RunService::for_scenario(&scenario);

        let first = service.run(&scenario).unwrap();
        let second = service.run(&scenario).unwrap();

        assert!(!first.loaded_from_cache);
        assert!(second.loaded_from_cache);
        assert!(Arc::ptr_eq(&first.result, &second.result));
        assert_eq!(service.cache().hits(), 1);
    }

    #[test]
    fn custom_tolerance_bypasses_cache() {
        let mut scenario = Scenario::reference();
        scenario.solver.colebrook_rel_tol = 1e-12;
        let mut service = RunService::for_scenario(&scenario);
        service.run(&scenario).unwrap();
        let again = service.run(&scenario).unwrap();
        assert!(!again.loaded_from_cache);
        assert!(service.cache().is_empty());
    }

    #[test]
    fn sweep_is_included_when_defined() {
        let scenario = Scenario {
            sweep: Some(SweepDef {
                start_m3s: 0.01,
                end_m3s: 0.05,
                points: 5,
            }),
            ..Scenario::reference()
        };
        let run = solve_scenario(&scenario).unwrap();
        assert_eq!(run.sweep.map(|s| s.len()), Some(5));
    }

    #[test]
    fn invalid_scenario_is_rejected() {
        let mut scenario = Scenario::reference();
        scenario.fluid.flow_m3s = -1.0;
        assert!(solve_scenario(&scenario).is_err());
    }
}
