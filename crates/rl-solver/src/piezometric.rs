//! Energy and hydraulic grade lines along the pipeline.
//!
//! The walk starts at the river surface with EGL = 0, adds the station head
//! at every pump, applies fitting losses at the first sub-point of a station
//! and friction linearly across its sub-points.

use rl_topology::{SegmentId, catalog};
use serde::Serialize;

use crate::result::AggregateResult;

/// Sub-points per station.
pub const DEFAULT_SUB_POINTS: usize = 5;

/// Below this a break tank has nothing to dissipate and no vertex is emitted.
const TANK_VERTEX_MIN_M: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiezometricPoint {
    pub distance_m: f64,
    /// Terrain elevation (m)
    pub elevation_m: f64,
    /// Energy grade line (m)
    pub egl_m: f64,
    /// Hydraulic grade line, EGL minus kinetic head (m)
    pub hgl_m: f64,
    /// HGL minus terrain (m of water column)
    pub pressure_head_m: f64,
    /// `None` for the intake
    pub segment: Option<SegmentId>,
    pub station: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PiezometricEvent {
    /// Pump at the start of a station.
    Pump {
        segment: SegmentId,
        station: u32,
        distance_m: f64,
        egl_before_m: f64,
        egl_after_m: f64,
        head_m: f64,
    },
    /// Break tank at the end of a descending station; EGL drops to
    /// elevation plus kinetic head.
    BreakTank {
        segment: SegmentId,
        station: u32,
        distance_m: f64,
        egl_before_m: f64,
        egl_after_m: f64,
        dissipated_m: f64,
    },
    /// Descent without a tank, feeding the next segment under gravity.
    GravityFeed {
        segment: SegmentId,
        station: u32,
        distance_m: f64,
        egl_m: f64,
        pressure_head_m: f64,
    },
}

impl PiezometricEvent {
    pub fn segment(&self) -> SegmentId {
        match *self {
            PiezometricEvent::Pump { segment, .. }
            | PiezometricEvent::BreakTank { segment, .. }
            | PiezometricEvent::GravityFeed { segment, .. } => segment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PiezometricProfile {
    pub kinetic_head_m: f64,
    pub points: Vec<PiezometricPoint>,
    pub events: Vec<PiezometricEvent>,
}

impl PiezometricProfile {
    /// Lowest pressure head along the line and where it occurs.
    pub fn min_pressure_head(&self) -> Option<&PiezometricPoint> {
        self.points
            .iter()
            .skip(1)
            .min_by(|a, b| a.pressure_head_m.total_cmp(&b.pressure_head_m))
    }

    pub fn pumps(&self) -> impl Iterator<Item = &PiezometricEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, PiezometricEvent::Pump { .. }))
    }

    pub fn final_egl_m(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.egl_m)
    }
}

pub fn piezometric_profile(result: &AggregateResult) -> PiezometricProfile {
    piezometric_profile_with(result, DEFAULT_SUB_POINTS)
}

/// Profile with `sub_points` vertices per station (at least one).
pub fn piezometric_profile_with(result: &AggregateResult, sub_points: usize) -> PiezometricProfile {
    let sub_points = sub_points.max(1);
    let hv = result.segments.first().map_or(0.0, |s| s.kinetic_head_m);

    let mut points = vec![PiezometricPoint {
        distance_m: 0.0,
        elevation_m: 0.0,
        egl_m: 0.0,
        hgl_m: 0.0,
        pressure_head_m: 0.0,
        segment: None,
        station: 0,
    }];
    let mut events = Vec::new();

    let mut distance = 0.0;
    let mut elevation = 0.0;
    let mut egl = 0.0;

    for (seg, def) in result.segments.iter().zip(catalog()) {
        let n = def.stations.max(1);
        let dx = def.distance_per_station();
        let dz = def.elevation_per_station();
        let hf_step = seg.friction_loss_m / sub_points as f64;

        for station in 1..=n {
            let start = distance;

            if seg.is_pump {
                let before = egl;
                egl += seg.head_added_per_station_m;
                events.push(PiezometricEvent::Pump {
                    segment: def.id,
                    station,
                    distance_m: start,
                    egl_before_m: before,
                    egl_after_m: egl,
                    head_m: seg.head_added_per_station_m,
                });
            }

            for j in 1..=sub_points {
                let frac = j as f64 / sub_points as f64;
                let z = elevation + dz * frac;
                egl -= hf_step;
                if j == 1 {
                    egl -= seg.minor_loss_m;
                }
                points.push(PiezometricPoint {
                    distance_m: start + dx * frac,
                    elevation_m: z,
                    egl_m: egl,
                    hgl_m: egl - hv,
                    pressure_head_m: egl - hv - z,
                    segment: Some(def.id),
                    station,
                });
            }

            distance = start + dx;
            elevation += dz;

            if !seg.is_descending {
                continue;
            }

            if def.pressure_break_tank {
                let before = egl;
                egl = elevation + hv;
                let dissipated = before - egl;
                events.push(PiezometricEvent::BreakTank {
                    segment: def.id,
                    station,
                    distance_m: distance,
                    egl_before_m: before,
                    egl_after_m: egl,
                    dissipated_m: dissipated,
                });
                if dissipated.abs() > TANK_VERTEX_MIN_M {
                    points.push(PiezometricPoint {
                        distance_m: distance,
                        elevation_m: elevation,
                        egl_m: egl,
                        hgl_m: egl - hv,
                        pressure_head_m: egl - hv - elevation,
                        segment: Some(def.id),
                        station,
                    });
                }
            } else {
                events.push(PiezometricEvent::GravityFeed {
                    segment: def.id,
                    station,
                    distance_m: distance,
                    egl_m: egl,
                    pressure_head_m: egl - hv - elevation,
                });
            }
        }
    }

    PiezometricProfile {
        kinetic_head_m: hv,
        points,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FluidParameters;
    use crate::solve::solve_system;

    #[test]
    fn point_count() {
        let result = solve_system(&FluidParameters::reference());
        let profile = piezometric_profile_with(&result, 4);
        let stations: usize = catalog().iter().map(|d| d.stations as usize).sum();
        let tanks = profile
            .events
            .iter()
            .filter(|e| matches!(e, PiezometricEvent::BreakTank { .. }))
            .count();
        assert_eq!(tanks, 4);
        // Every tank at the reference flow dissipates well above the threshold.
        assert_eq!(profile.points.len(), 1 + stations * 4 + tanks);
    }

    #[test]
    fn one_gravity_feed() {
        let result = solve_system(&FluidParameters::reference());
        let profile = piezometric_profile(&result);
        let feeds: Vec<_> = profile
            .events
            .iter()
            .filter(|e| matches!(e, PiezometricEvent::GravityFeed { .. }))
            .collect();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].segment().get(), 7);
    }

    #[test]
    fn degenerate_profile_follows_terrain_at_zero_egl() {
        let result = solve_system(&FluidParameters::reference().with_flow(0.0));
        let profile = piezometric_profile(&result);
        assert_eq!(profile.kinetic_head_m, 0.0);
        assert!(profile.pumps().all(|e| matches!(
            e,
            PiezometricEvent::Pump { head_m, .. } if *head_m == 0.0
        )));
    }
}
