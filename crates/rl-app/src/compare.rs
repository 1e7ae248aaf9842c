//! Solver output versus a historical reference dataset.

use rl_core::numeric::relative_deviation;
use rl_project::{ReferenceDataset, ReferenceKind};
use rl_solver::AggregateResult;
use rl_topology::SegmentKind;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Relative tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Below this a reference figure is treated as zero and compared absolutely.
const ZERO_REFERENCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// 1-based segment, `None` for system-wide quantities
    pub segment: Option<usize>,
    pub quantity: &'static str,
    pub computed: f64,
    pub reference: f64,
    /// (computed − reference) / reference; absolute difference for zero references
    pub deviation: f64,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub dataset: String,
    pub tolerance: f64,
    pub entries: Vec<ComparisonEntry>,
    /// Segments whose equipment kind disagrees with the reference
    pub kind_mismatches: Vec<usize>,
}

impl ComparisonReport {
    pub fn passed(&self) -> bool {
        self.kind_mismatches.is_empty() && self.entries.iter().all(|e| e.within_tolerance)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter().filter(|e| !e.within_tolerance)
    }

    pub fn max_abs_deviation(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.deviation.abs())
            .fold(0.0, f64::max)
    }
}

struct Builder {
    tolerance: f64,
    entries: Vec<ComparisonEntry>,
}

impl Builder {
    fn push(
        &mut self,
        segment: Option<usize>,
        quantity: &'static str,
        computed: f64,
        reference: f64,
    ) {
        let deviation = if reference.abs() < ZERO_REFERENCE {
            computed - reference
        } else {
            relative_deviation(computed, reference)
        };
        self.entries.push(ComparisonEntry {
            segment,
            quantity,
            computed,
            reference,
            deviation,
            within_tolerance: deviation.abs() <= self.tolerance,
        });
    }
}

/// Compare per-station head, total head, power and friction factors.
///
/// # Errors
/// `InvalidInput` for a non-positive or non-finite tolerance.
pub fn compare_with_reference(
    result: &AggregateResult,
    dataset: &ReferenceDataset,
    tolerance: f64,
) -> AppResult<ComparisonReport> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "tolerance must be positive, got {tolerance}"
        )));
    }

    let mut builder = Builder {
        tolerance,
        entries: Vec::new(),
    };
    let mut kind_mismatches = Vec::new();

    for reference in &dataset.segments {
        let index = usize::from(reference.segment);
        let seg = result
            .get(index)
            .map_err(|e| AppError::Reference(e.to_string()))?;

        let expected_kind = match reference.kind {
            ReferenceKind::Pump => SegmentKind::Pump,
            ReferenceKind::ThrottlingValve => SegmentKind::ThrottlingValve,
        };
        if seg.kind != expected_kind {
            kind_mismatches.push(index);
        }

        let at = Some(index);
        builder.push(
            at,
            "head_per_station_m",
            seg.head_per_station_m,
            reference.head_per_station_m,
        );
        builder.push(at, "total_head_m", seg.total_head_m, reference.total_head_m);
        builder.push(at, "power_kw", seg.hydraulic_power_kw, reference.power_kw);
        builder.push(at, "power_hp", seg.shaft_power_hp, reference.power_hp);
        if let Some(f) = reference.colebrook_f {
            builder.push(at, "f_colebrook", seg.friction.colebrook, f);
        }
        if let Some(f) = reference.haaland_f {
            builder.push(at, "f_haaland", seg.friction.haaland, f);
        }
    }

    if let (Some(flow), Some(first)) = (dataset.flow, result.segments.first()) {
        builder.push(None, "velocity_mps", first.velocity_mps, flow.velocity_mps);
        builder.push(None, "reynolds", first.reynolds, flow.reynolds);
        builder.push(None, "kinetic_head_m", first.kinetic_head_m, flow.kinetic_head_m);
    }
    if let Some(totals) = dataset.totals {
        builder.push(
            None,
            "pump_stations",
            f64::from(result.totals.pump_stations),
            f64::from(totals.pump_stations),
        );
    }

    let report = ComparisonReport {
        dataset: dataset.name.clone(),
        tolerance,
        entries: builder.entries,
        kind_mismatches,
    };
    tracing::debug!(
        dataset = %report.dataset,
        failures = report.failures().count(),
        max_abs_deviation = report.max_abs_deviation(),
        "reference comparison"
    );
    Ok(report)
}
