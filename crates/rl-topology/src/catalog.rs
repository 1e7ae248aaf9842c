//! The fixed eight-segment catalog of the river → ridge → plant pipeline.
//!
//! Segments 1–3 lift water from the river intake (0 m) to the ridge (500 m),
//! segment 4 crosses the ridge, segments 5–7 descend by gravity through
//! throttling valves, and segment 8 is the buried pumped run to the plant.
//! Fittings are listed per station.

use crate::error::TopologyResult;
use crate::segment::{Fitting, SegmentDefinition, SegmentId, SegmentRole};

const CHECK_VALVE: Fitting = Fitting {
    name: "swing check valve",
    count: 1,
    k: 2.0,
};

const ELBOW_90: Fitting = Fitting {
    name: "90° standard elbow",
    count: 1,
    k: 0.75,
};

const GATE_VALVE: Fitting = Fitting {
    name: "gate valve (open)",
    count: 1,
    k: 0.15,
};

const BUTTERFLY_VALVE: Fitting = Fitting {
    name: "butterfly throttling valve",
    count: 1,
    k: 0.6,
};

const INTAKE_FITTINGS: &[Fitting] = &[
    Fitting {
        name: "intake entrance",
        count: 1,
        k: 0.5,
    },
    CHECK_VALVE,
    Fitting {
        count: 2,
        ..GATE_VALVE
    },
    Fitting {
        count: 2,
        ..ELBOW_90
    },
];

const LIFT_STATION_FITTINGS: &[Fitting] = &[
    CHECK_VALVE,
    Fitting {
        count: 2,
        ..GATE_VALVE
    },
    ELBOW_90,
];

const RIDGE_FITTINGS: &[Fitting] = &[
    CHECK_VALVE,
    GATE_VALVE,
    Fitting {
        count: 2,
        ..ELBOW_90
    },
];

const DESCENT_FITTINGS: &[Fitting] = &[GATE_VALVE, ELBOW_90, BUTTERFLY_VALVE];

const PLANT_FITTINGS: &[Fitting] = &[
    CHECK_VALVE,
    Fitting {
        count: 2,
        ..GATE_VALVE
    },
    Fitting {
        count: 3,
        ..ELBOW_90
    },
    Fitting {
        name: "discharge into plant tank",
        count: 1,
        k: 1.0,
    },
];

static CATALOG: [SegmentDefinition; SegmentId::COUNT] = [
    SegmentDefinition {
        id: SegmentId::from_const(1),
        distance_m: 157.40,
        elevation_change_m: 100.0,
        slope_deg: 32.43,
        pipe_length_m: 186.48,
        role: SegmentRole::AscendingPumped,
        stations: 1,
        fittings: INTAKE_FITTINGS,
        note: Some("River intake pump; suction from the river bank at elevation 0 m."),
        pressure_break_tank: false,
    },
    SegmentDefinition {
        id: SegmentId::from_const(2),
        distance_m: 168.30,
        elevation_change_m: 200.0,
        slope_deg: 49.92,
        pipe_length_m: 261.40,
        role: SegmentRole::AscendingPumped,
        stations: 2,
        fittings: LIFT_STATION_FITTINGS,
        note: None,
        pressure_break_tank: false,
    },
    SegmentDefinition {
        id: SegmentId::from_const(3),
        distance_m: 146.70,
        elevation_change_m: 200.0,
        slope_deg: 53.74,
        pipe_length_m: 248.04,
        role: SegmentRole::AscendingPumped,
        stations: 2,
        fittings: LIFT_STATION_FITTINGS,
        note: Some("Last lift; delivers to the summit at 500 m."),
        pressure_break_tank: false,
    },
    SegmentDefinition {
        id: SegmentId::from_const(4),
        distance_m: 243.70,
        elevation_change_m: 0.0,
        slope_deg: 0.0,
        pipe_length_m: 243.70,
        role: SegmentRole::FlatPumped,
        stations: 1,
        fittings: RIDGE_FITTINGS,
        note: Some("Summit crossing; the booster only covers friction and fittings."),
        pressure_break_tank: false,
    },
    SegmentDefinition {
        id: SegmentId::from_const(5),
        distance_m: 195.60,
        elevation_change_m: -150.0,
        slope_deg: 37.48,
        pipe_length_m: 246.50,
        role: SegmentRole::DescendingThrottled,
        stations: 2,
        fittings: DESCENT_FITTINGS,
        note: None,
        pressure_break_tank: true,
    },
    SegmentDefinition {
        id: SegmentId::from_const(6),
        distance_m: 108.20,
        elevation_change_m: -200.0,
        slope_deg: 61.59,
        pipe_length_m: 227.40,
        role: SegmentRole::DescendingThrottled,
        stations: 2,
        fittings: DESCENT_FITTINGS,
        note: Some("Steepest descent; each station discharges into a break tank."),
        pressure_break_tank: true,
    },
    SegmentDefinition {
        id: SegmentId::from_const(7),
        distance_m: 63.60,
        elevation_change_m: -100.0,
        slope_deg: 57.54,
        pipe_length_m: 118.52,
        role: SegmentRole::DescendingThrottled,
        stations: 1,
        fittings: DESCENT_FITTINGS,
        note: Some("Gravity feed straight into the suction of the segment 8 pump."),
        pressure_break_tank: false,
    },
    SegmentDefinition {
        id: SegmentId::from_const(8),
        distance_m: 1850.00,
        elevation_change_m: 100.0,
        slope_deg: 3.09,
        pipe_length_m: 1911.52,
        role: SegmentRole::AscendingPumped,
        stations: 1,
        fittings: PLANT_FITTINGS,
        note: Some("Buried run to the industrial plant; pipe length includes underground routing."),
        pressure_break_tank: false,
    },
];

/// The full catalog, segment 1 first.
pub fn catalog() -> &'static [SegmentDefinition; SegmentId::COUNT] {
    &CATALOG
}

/// Catalog entry for a typed segment id.
pub fn definition(id: SegmentId) -> &'static SegmentDefinition {
    &CATALOG[id.get() - 1]
}

/// Catalog entry for a raw 1-based index.
///
/// # Errors
/// `SegmentOutOfRange` for indices outside `1..=8`.
pub fn segment(index: usize) -> TopologyResult<&'static SegmentDefinition> {
    let id = SegmentId::new(index)?;
    Ok(definition(id))
}

/// Whole-pipeline figures derived from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CatalogSummary {
    pub total_distance_m: f64,
    pub total_pipe_length_m: f64,
    pub max_elevation_m: f64,
    pub final_elevation_m: f64,
    pub pump_stations: u32,
    pub throttling_stations: u32,
    pub break_tanks: u32,
}

pub fn summary() -> CatalogSummary {
    let mut elevation = 0.0_f64;
    let mut max_elevation = 0.0_f64;
    let mut out = CatalogSummary {
        total_distance_m: 0.0,
        total_pipe_length_m: 0.0,
        max_elevation_m: 0.0,
        final_elevation_m: 0.0,
        pump_stations: 0,
        throttling_stations: 0,
        break_tanks: 0,
    };

    for def in catalog() {
        out.total_distance_m += def.distance_m;
        out.total_pipe_length_m += def.pipe_length_m;
        elevation += def.elevation_change_m;
        max_elevation = max_elevation.max(elevation);
        if def.is_pump() {
            out.pump_stations += def.stations;
        } else {
            out.throttling_stations += def.stations;
            if def.pressure_break_tank {
                out.break_tanks += def.stations;
            }
        }
    }

    out.max_elevation_m = max_elevation;
    out.final_elevation_m = elevation;
    out
}
