//! Scenario and reference-dataset validation.

use std::collections::HashSet;

use rl_core::numeric::is_positive_finite;

use crate::reference::{REFERENCE_SEGMENTS, ReferenceDataset};
use crate::schema::{FluidDef, Scenario, SolverDef, SweepDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    validate_fluid(&scenario.fluid)?;
    validate_solver(&scenario.solver)?;
    if let Some(sweep) = &scenario.sweep {
        validate_sweep(sweep)?;
    }
    Ok(())
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    let positive = [
        ("fluid.flow_m3s", fluid.flow_m3s),
        ("fluid.diameter_m", fluid.diameter_m),
        ("fluid.density_kgm3", fluid.density_kgm3),
        ("fluid.viscosity_pas", fluid.viscosity_pas),
    ];
    for (field, value) in positive {
        if !is_positive_finite(value) {
            return Err(invalid(field, value, "must be positive and finite"));
        }
    }

    if !fluid.roughness_m.is_finite() || fluid.roughness_m < 0.0 {
        return Err(invalid(
            "fluid.roughness_m",
            fluid.roughness_m,
            "must be non-negative and finite",
        ));
    }
    if fluid.roughness_m >= fluid.diameter_m {
        return Err(invalid(
            "fluid.roughness_m",
            fluid.roughness_m,
            "must be smaller than the diameter",
        ));
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if !(solver.colebrook_rel_tol > 0.0 && solver.colebrook_rel_tol < 1.0) {
        return Err(invalid(
            "solver.colebrook_rel_tol",
            solver.colebrook_rel_tol,
            "must lie in (0, 1)",
        ));
    }
    if solver.colebrook_max_iterations == 0 {
        return Err(invalid("solver.colebrook_max_iterations", 0, "must be at least 1"));
    }
    if solver.cache_capacity == 0 {
        return Err(invalid("solver.cache_capacity", 0, "must be at least 1"));
    }
    if solver.profile_sub_points == 0 {
        return Err(invalid("solver.profile_sub_points", 0, "must be at least 1"));
    }
    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    if sweep.points < 2 {
        return Err(invalid("sweep.points", sweep.points, "must be at least 2"));
    }
    for (field, value) in [
        ("sweep.start_m3s", sweep.start_m3s),
        ("sweep.end_m3s", sweep.end_m3s),
    ] {
        if !is_positive_finite(value) {
            return Err(invalid(field, value, "must be positive and finite"));
        }
    }
    if sweep.start_m3s == sweep.end_m3s {
        return Err(invalid("sweep.end_m3s", sweep.end_m3s, "must differ from start"));
    }
    Ok(())
}

pub fn validate_reference(dataset: &ReferenceDataset) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for seg in &dataset.segments {
        if !(1..=REFERENCE_SEGMENTS).contains(&seg.segment) {
            return Err(invalid(
                "segments.segment",
                seg.segment,
                "must lie in 1..=8",
            ));
        }
        if !seen.insert(seg.segment) {
            return Err(ValidationError::DuplicateId {
                id: seg.segment.to_string(),
                context: format!("reference dataset '{}' segments", dataset.name),
            });
        }
        if seg.stations == 0 {
            return Err(invalid("segments.stations", 0, "must be at least 1"));
        }
        let values = [seg.head_per_station_m, seg.total_head_m, seg.power_kw, seg.power_hp];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid(
                "segments",
                seg.segment,
                "heads and powers must be non-negative and finite",
            ));
        }
    }

    for index in 1..=REFERENCE_SEGMENTS {
        if !seen.contains(&index) {
            return Err(ValidationError::MissingReference {
                id: index.to_string(),
                context: format!("reference dataset '{}' segments", dataset.name),
            });
        }
    }
    Ok(())
}
