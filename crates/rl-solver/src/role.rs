//! Per-role head strategies.
//!
//! Every segment shares the same loss computation; the role only decides how
//! elevation turns into pump head or throttled head. Heads are per station.

use rl_topology::{SegmentDefinition, SegmentRole};

/// Losses of one station.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationLosses {
    /// Darcy friction loss (m)
    pub friction_m: f64,
    /// Fitting losses (m)
    pub minor_m: f64,
}

impl StationLosses {
    pub fn total(&self) -> f64 {
        self.friction_m + self.minor_m
    }
}

/// Head balance of one station.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationHeads {
    /// Signed elevation change of the station (m)
    pub elevation_m: f64,
    /// Head requirement of the station (m)
    pub head_m: f64,
    /// Head supplied by the station pump (m); zero for valves
    pub head_added_m: f64,
    /// Surplus head dissipated by the valve or break tank (m)
    pub throttled_m: f64,
}

/// Turns station losses into a head balance for one role.
pub trait RoleStrategy: Send + Sync {
    fn station_heads(&self, def: &SegmentDefinition, losses: StationLosses) -> StationHeads;
}

/// Uphill: the pump lifts its share of Δz and covers the losses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AscendingPumped;

/// Level: the pump covers the losses only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatPumped;

/// Downhill: gravity drives the flow; the valve burns what the losses don't.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingThrottled;

impl RoleStrategy for AscendingPumped {
    fn station_heads(&self, def: &SegmentDefinition, losses: StationLosses) -> StationHeads {
        let elevation = def.elevation_per_station();
        let head = elevation + losses.total();
        StationHeads {
            elevation_m: elevation,
            head_m: head,
            head_added_m: head,
            throttled_m: 0.0,
        }
    }
}

impl RoleStrategy for FlatPumped {
    fn station_heads(&self, _def: &SegmentDefinition, losses: StationLosses) -> StationHeads {
        let head = losses.total();
        StationHeads {
            elevation_m: 0.0,
            head_m: head,
            head_added_m: head,
            throttled_m: 0.0,
        }
    }
}

impl RoleStrategy for DescendingThrottled {
    fn station_heads(&self, def: &SegmentDefinition, losses: StationLosses) -> StationHeads {
        let elevation = def.elevation_per_station();
        StationHeads {
            elevation_m: elevation,
            head_m: losses.total(),
            head_added_m: 0.0,
            throttled_m: (elevation.abs() - losses.total()).max(0.0),
        }
    }
}

/// Strategy for a role.
pub fn strategy(role: SegmentRole) -> &'static dyn RoleStrategy {
    match role {
        SegmentRole::AscendingPumped => &AscendingPumped,
        SegmentRole::FlatPumped => &FlatPumped,
        SegmentRole::DescendingThrottled => &DescendingThrottled,
    }
}
