//! Tabular views over a solve result.

use rl_solver::AggregateResult;
use rl_topology::definition;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// One row of the segment summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub segment: usize,
    pub role: &'static str,
    pub kind: &'static str,
    pub stations: u32,
    pub pipe_length_m: f64,
    pub elevation_change_m: f64,
    pub velocity_mps: f64,
    pub reynolds: f64,
    pub regime: &'static str,
    pub f_colebrook: f64,
    pub f_haaland: f64,
    pub f_swamee_jain: f64,
    pub head_per_station_m: f64,
    pub total_head_m: f64,
    pub throttled_head_m: f64,
    pub power_kw: f64,
    pub power_hp: f64,
}

pub fn segment_table(result: &AggregateResult) -> Vec<SegmentRow> {
    result
        .iter()
        .map(|seg| {
            let def = definition(seg.segment);
            SegmentRow {
                segment: seg.segment.get(),
                role: seg.role.label(),
                kind: seg.kind.label(),
                stations: seg.stations,
                pipe_length_m: def.pipe_length_m,
                elevation_change_m: def.elevation_change_m,
                velocity_mps: seg.velocity_mps,
                reynolds: seg.reynolds,
                regime: seg.regime.label(),
                f_colebrook: seg.friction.colebrook,
                f_haaland: seg.friction.haaland,
                f_swamee_jain: seg.friction.swamee_jain,
                head_per_station_m: seg.head_per_station_m,
                total_head_m: seg.total_head_m,
                throttled_head_m: seg.throttled_head_m,
                power_kw: seg.hydraulic_power_kw,
                power_hp: seg.shaft_power_hp,
            }
        })
        .collect()
}

/// Where the head of a segment goes, summed over its stations (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LossRow {
    pub segment: usize,
    pub elevation_m: f64,
    pub friction_m: f64,
    pub friction_haaland_m: f64,
    pub minor_m: f64,
    pub throttled_m: f64,
}

impl LossRow {
    pub fn losses_m(&self) -> f64 {
        self.friction_m + self.minor_m
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossBreakdown {
    pub rows: Vec<LossRow>,
    pub totals: LossRow,
}

impl LossBreakdown {
    /// Share of friction in all losses, 0 when nothing flows.
    pub fn friction_share(&self) -> f64 {
        let losses = self.totals.losses_m();
        if losses > 0.0 {
            self.totals.friction_m / losses
        } else {
            0.0
        }
    }
}

pub fn loss_breakdown(result: &AggregateResult) -> LossBreakdown {
    let rows: Vec<LossRow> = result
        .iter()
        .map(|seg| {
            let n = seg.station_count();
            LossRow {
                segment: seg.segment.get(),
                elevation_m: seg.elevation_per_station_m * n,
                friction_m: seg.friction_loss_m * n,
                friction_haaland_m: seg.friction_loss_haaland_m * n,
                minor_m: seg.minor_loss_m * n,
                throttled_m: seg.throttled_head_m * n,
            }
        })
        .collect();

    let mut totals = LossRow::default();
    for row in &rows {
        totals.elevation_m += row.elevation_m;
        totals.friction_m += row.friction_m;
        totals.friction_haaland_m += row.friction_haaland_m;
        totals.minor_m += row.minor_m;
        totals.throttled_m += row.throttled_m;
    }

    LossBreakdown { rows, totals }
}

/// Look up one row by 1-based segment number.
pub fn segment_row(result: &AggregateResult, index: usize) -> AppResult<SegmentRow> {
    result.get(index)?;
    segment_table(result)
        .into_iter()
        .find(|row| row.segment == index)
        .ok_or_else(|| AppError::InvalidInput(format!("segment {index} missing from result")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rl_solver::{FluidParameters, solve_system};

    #[test]
    fn table_has_eight_rows() {
        let result = solve_system(&FluidParameters::reference());
        let table = segment_table(&result);
        assert_eq!(table.len(), 8);
        assert_eq!(table[0].kind, "pump");
        assert_eq!(table[4].kind, "throttling_valve");
        assert_eq!(table[7].pipe_length_m, 1911.52);
    }

    #[test]
    fn breakdown_elevation_matches_route() {
        let result = solve_system(&FluidParameters::reference());
        let breakdown = loss_breakdown(&result);
        // River at 0 m, plant at 150 m.
        assert_relative_eq!(breakdown.totals.elevation_m, 150.0, epsilon = 1e-9);
        assert_relative_eq!(
            breakdown.totals.friction_m,
            result.totals.friction_loss_m,
            max_relative = 1e-12
        );
        assert!(breakdown.friction_share() > 0.5);
    }

    #[test]
    fn segment_row_rejects_bad_index() {
        let result = solve_system(&FluidParameters::reference());
        assert!(segment_row(&result, 0).is_err());
        assert_eq!(segment_row(&result, 3).unwrap().stations, 2);
    }
}
