//! Flow-rate sweeps for power curves.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{SolverError, SolverResult};
use crate::params::FluidParameters;
use crate::solve::{SolverConfig, solve_system_with};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub flow_m3s: f64,
    pub total_power_kw: f64,
    pub total_power_hp: f64,
    /// Head added by all pump stations (m)
    pub total_head_m: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
}

pub fn sweep_flow(
    base: &FluidParameters,
    start: f64,
    end: f64,
    points: usize,
) -> SolverResult<Vec<SweepPoint>> {
    sweep_flow_with(base, start, end, points, &SolverConfig::default())
}

/// Solve at `points` evenly spaced flow rates from `start` to `end`
/// inclusive. Solves run in parallel; output follows input order.
pub fn sweep_flow_with(
    base: &FluidParameters,
    start: f64,
    end: f64,
    points: usize,
    config: &SolverConfig,
) -> SolverResult<Vec<SweepPoint>> {
    if points < 2 {
        return Err(SolverError::InvalidArg {
            what: format!("sweep needs at least 2 points, got {points}"),
        });
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(SolverError::InvalidArg {
            what: "sweep bounds must be finite".into(),
        });
    }
    if start == end {
        return Err(SolverError::InvalidArg {
            what: format!("sweep range is empty (start = end = {start})"),
        });
    }

    let step = (end - start) / (points - 1) as f64;
    tracing::debug!(start, end, points, "flow sweep");

    let rows = (0..points)
        .into_par_iter()
        .map(|i| {
            let q = if i == points - 1 {
                end
            } else {
                start + step * i as f64
            };
            let result = solve_system_with(&base.with_flow(q), config);
            let first = result.segments.first();
            SweepPoint {
                flow_m3s: q,
                total_power_kw: result.totals.hydraulic_power_kw,
                total_power_hp: result.totals.shaft_power_hp,
                total_head_m: result.totals.head_added_m,
                reynolds: first.map_or(0.0, |s| s.reynolds),
                friction_factor: first.map_or(0.0, |s| s.friction.colebrook),
            }
        })
        .collect();

    Ok(rows)
}
