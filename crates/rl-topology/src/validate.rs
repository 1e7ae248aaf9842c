//! Catalog invariant checks.

use crate::error::{TopologyError, TopologyResult};
use crate::segment::{SegmentDefinition, SegmentRole};

/// Allowed mismatch between the listed slope and atan(|Δz|/distance).
const SLOPE_TOL_DEG: f64 = 0.05;

/// Allowed shortfall of pipe length versus the straight line (rounding).
const LENGTH_TOL_M: f64 = 1e-6;

/// Validate a catalog: ordering, geometry, and role/elevation consistency.
pub fn validate_catalog(segments: &[SegmentDefinition]) -> TopologyResult<()> {
    for (position, def) in segments.iter().enumerate() {
        if def.id.get() != position + 1 {
            return Err(TopologyError::OutOfOrder {
                position,
                found: def.id,
            });
        }
        validate_segment(def)?;
    }
    Ok(())
}

/// Validate a single segment definition.
pub fn validate_segment(def: &SegmentDefinition) -> TopologyResult<()> {
    let invalid = |what: String| TopologyError::InvalidSegment { id: def.id, what };

    let finite = [
        def.distance_m,
        def.elevation_change_m,
        def.slope_deg,
        def.pipe_length_m,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return Err(invalid("geometry contains non-finite values".into()));
    }

    if def.distance_m <= 0.0 {
        return Err(invalid(format!(
            "distance must be positive, got {}",
            def.distance_m
        )));
    }

    // Pipe follows the terrain, so it can never be shorter than the chord.
    if def.pipe_length_m + LENGTH_TOL_M < def.straight_line_length() {
        return Err(invalid(format!(
            "pipe length {} m is shorter than straight line {:.3} m",
            def.pipe_length_m,
            def.straight_line_length()
        )));
    }

    let slope = def.computed_slope_deg();
    if (def.slope_deg - slope).abs() > SLOPE_TOL_DEG {
        return Err(invalid(format!(
            "slope {}° does not match geometry ({slope:.2}°)",
            def.slope_deg
        )));
    }

    if def.stations == 0 {
        return Err(invalid("at least one station is required".into()));
    }

    for fitting in def.fittings {
        if !fitting.k.is_finite() || fitting.k < 0.0 {
            return Err(invalid(format!(
                "fitting '{}' has invalid K {}",
                fitting.name, fitting.k
            )));
        }
    }

    let dz = def.elevation_change_m;
    let consistent = match def.role {
        SegmentRole::AscendingPumped => dz > 0.0,
        SegmentRole::FlatPumped => dz == 0.0,
        SegmentRole::DescendingThrottled => dz < 0.0,
    };
    if !consistent {
        return Err(invalid(format!(
            "role '{}' contradicts elevation change {dz} m",
            def.role.label()
        )));
    }

    if def.pressure_break_tank && !def.is_descending() {
        return Err(invalid(
            "pressure-break tanks are only valid on descending segments".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, definition};
    use crate::segment::SegmentId;

    #[test]
    fn builtin_catalog_is_valid() {
        validate_catalog(catalog()).unwrap();
    }

    #[test]
    fn rejects_short_pipe() {
        let mut def = *definition(SegmentId::new(1).unwrap());
        def.pipe_length_m = def.distance_m;
        let err = validate_segment(&def).unwrap_err();
        assert!(err.to_string().contains("shorter"));
    }

    #[test]
    fn rejects_role_mismatch() {
        let mut def = *definition(SegmentId::new(5).unwrap());
        def.role = SegmentRole::AscendingPumped;
        def.pressure_break_tank = false;
        assert!(validate_segment(&def).is_err());
    }

    #[test]
    fn rejects_tank_on_ascent() {
        let mut def = *definition(SegmentId::new(2).unwrap());
        def.pressure_break_tank = true;
        assert!(validate_segment(&def).is_err());
    }

    #[test]
    fn rejects_reordered_catalog() {
        let mut segments = *catalog();
        segments.swap(0, 1);
        assert!(matches!(
            validate_catalog(&segments),
            Err(TopologyError::OutOfOrder { position: 0, .. })
        ));
    }
}
