//! Segment descriptors: identity, role, geometry and fittings.

use serde::Serialize;
use std::fmt;

use crate::error::{TopologyError, TopologyResult};

/// 1-based segment number, always within `1..=SegmentId::COUNT`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SegmentId(u8);

impl SegmentId {
    /// Number of segments in the pipeline.
    pub const COUNT: usize = 8;

    /// Checked constructor; fails loudly for indices outside the catalog.
    pub fn new(index: usize) -> TopologyResult<Self> {
        if (1..=Self::COUNT).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(TopologyError::SegmentOutOfRange { index })
        }
    }

    pub(crate) const fn from_const(index: u8) -> Self {
        Self(index)
    }

    /// The 1-based segment number.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// All segment ids in pipeline order.
    pub fn all() -> impl Iterator<Item = SegmentId> {
        (1..=Self::COUNT as u8).map(SegmentId)
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equipment installed at each station of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Pump,
    ThrottlingValve,
}

impl SegmentKind {
    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Pump => "pump",
            SegmentKind::ThrottlingValve => "throttling_valve",
        }
    }
}

/// Hydraulic role of a segment; selects how the solver treats elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRole {
    /// Uphill run; every station pumps its share of the lift plus losses.
    AscendingPumped,
    /// Level run; pumps only overcome friction and fittings.
    FlatPumped,
    /// Downhill run; gravity drives the flow, surplus head is throttled.
    DescendingThrottled,
}

impl SegmentRole {
    pub fn kind(self) -> SegmentKind {
        match self {
            SegmentRole::AscendingPumped | SegmentRole::FlatPumped => SegmentKind::Pump,
            SegmentRole::DescendingThrottled => SegmentKind::ThrottlingValve,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SegmentRole::AscendingPumped => "ascending (pumped)",
            SegmentRole::FlatPumped => "flat (pumped)",
            SegmentRole::DescendingThrottled => "descending (throttled)",
        }
    }
}

/// A fitting type installed at every station of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fitting {
    pub name: &'static str,
    /// Units per station
    pub count: u32,
    /// Loss coefficient K per unit
    pub k: f64,
}

impl Fitting {
    /// Combined loss coefficient `K·count`.
    pub fn k_total(&self) -> f64 {
        self.k * f64::from(self.count)
    }
}

/// Static description of one pipeline segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentDefinition {
    pub id: SegmentId,
    /// Horizontal distance covered (m)
    pub distance_m: f64,
    /// Signed elevation change, positive uphill (m)
    pub elevation_change_m: f64,
    /// Slope magnitude (degrees)
    pub slope_deg: f64,
    /// Installed pipe length along the route (m)
    pub pipe_length_m: f64,
    pub role: SegmentRole,
    /// Pumping or throttling stations along the segment
    pub stations: u32,
    /// Fittings per station
    pub fittings: &'static [Fitting],
    pub note: Option<&'static str>,
    /// Descending stations end in a pressure-break tank
    pub pressure_break_tank: bool,
}

impl SegmentDefinition {
    pub fn kind(&self) -> SegmentKind {
        self.role.kind()
    }

    pub fn is_descending(&self) -> bool {
        matches!(self.role, SegmentRole::DescendingThrottled)
    }

    pub fn is_pump(&self) -> bool {
        self.kind() == SegmentKind::Pump
    }

    /// Station count as a float divisor (never below 1).
    pub fn station_count(&self) -> f64 {
        f64::from(self.stations.max(1))
    }

    /// Sum of `K·count` over the fittings of one station.
    pub fn k_total_per_station(&self) -> f64 {
        self.fittings.iter().map(Fitting::k_total).sum()
    }

    pub fn length_per_station(&self) -> f64 {
        self.pipe_length_m / self.station_count()
    }

    pub fn distance_per_station(&self) -> f64 {
        self.distance_m / self.station_count()
    }

    pub fn elevation_per_station(&self) -> f64 {
        self.elevation_change_m / self.station_count()
    }

    /// Length of the straight line between the segment end points.
    pub fn straight_line_length(&self) -> f64 {
        self.distance_m.hypot(self.elevation_change_m)
    }

    /// Slope implied by distance and elevation change (degrees).
    pub fn computed_slope_deg(&self) -> f64 {
        self.elevation_change_m
            .abs()
            .atan2(self.distance_m)
            .to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_id_bounds() {
        assert!(SegmentId::new(0).is_err());
        assert!(SegmentId::new(9).is_err());
        assert_eq!(SegmentId::new(1).unwrap().get(), 1);
        assert_eq!(SegmentId::new(8).unwrap().get(), 8);
    }

    #[test]
    fn segment_id_all_in_order() {
        let ids: Vec<usize> = SegmentId::all().map(SegmentId::get).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn out_of_range_error_message() {
        let err = SegmentId::new(12).unwrap_err();
        assert_eq!(err, TopologyError::SegmentOutOfRange { index: 12 });
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn role_selects_kind() {
        assert_eq!(SegmentRole::AscendingPumped.kind(), SegmentKind::Pump);
        assert_eq!(SegmentRole::FlatPumped.kind(), SegmentKind::Pump);
        assert_eq!(
            SegmentRole::DescendingThrottled.kind(),
            SegmentKind::ThrottlingValve
        );
    }

    #[test]
    fn fitting_k_total() {
        let f = Fitting {
            name: "elbow",
            count: 3,
            k: 0.75,
        };
        assert!((f.k_total() - 2.25).abs() < 1e-12);
    }
}
