//! Cumulative distance/elevation polylines for terrain plots.

use serde::Serialize;

use crate::catalog::catalog;
use crate::segment::{SegmentDefinition, SegmentId};

/// A vertex of the terrain polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Cumulative horizontal distance from the intake (m)
    pub distance_m: f64,
    /// Elevation relative to the intake (m)
    pub elevation_m: f64,
    /// Segment ending at this vertex; `None` for the intake
    pub segment: Option<SegmentId>,
}

/// A vertex at a station boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationPoint {
    pub segment: SegmentId,
    /// 1-based station within the segment
    pub station: u32,
    pub distance_m: f64,
    pub elevation_m: f64,
}

/// Polyline with one vertex per segment end, starting at the intake (0, 0).
pub fn cumulative_profile() -> Vec<ProfilePoint> {
    profile_of(catalog())
}

/// Polyline for an arbitrary ordered slice of segments.
pub fn profile_of(segments: &[SegmentDefinition]) -> Vec<ProfilePoint> {
    let mut points = Vec::with_capacity(segments.len() + 1);
    points.push(ProfilePoint {
        distance_m: 0.0,
        elevation_m: 0.0,
        segment: None,
    });

    let mut distance = 0.0;
    let mut elevation = 0.0;
    for def in segments {
        distance += def.distance_m;
        elevation += def.elevation_change_m;
        points.push(ProfilePoint {
            distance_m: distance,
            elevation_m: elevation,
            segment: Some(def.id),
        });
    }
    points
}

/// Polyline with a vertex at the end of every station.
///
/// Stations split their segment evenly in distance and elevation.
pub fn station_profile() -> Vec<StationPoint> {
    let mut points = Vec::new();
    let mut distance = 0.0;
    let mut elevation = 0.0;

    for def in catalog() {
        let dx = def.distance_per_station();
        let dz = def.elevation_per_station();
        for station in 1..=def.stations.max(1) {
            distance += dx;
            elevation += dz;
            points.push(StationPoint {
                segment: def.id,
                station,
                distance_m: distance,
                elevation_m: elevation,
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_starts_at_intake() {
        let p = cumulative_profile();
        assert_eq!(p.len(), SegmentId::COUNT + 1);
        assert_eq!(p[0].distance_m, 0.0);
        assert_eq!(p[0].elevation_m, 0.0);
        assert!(p[0].segment.is_none());
    }

    #[test]
    fn profile_summit_elevation() {
        let p = cumulative_profile();
        assert_eq!(p[3].elevation_m, 500.0);
        assert_eq!(p[4].elevation_m, 500.0);
    }

    #[test]
    fn station_profile_counts() {
        let total: u32 = catalog().iter().map(|d| d.stations).sum();
        assert_eq!(station_profile().len(), total as usize);
    }
}
