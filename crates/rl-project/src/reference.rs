//! Historical reference figures for comparison runs.
//!
//! The solver never reads this data; it only feeds comparison reports.

use serde::{Deserialize, Serialize};

use crate::ProjectResult;
use crate::schema::FluidDef;
use crate::validate::validate_reference;

/// Segments expected in a complete dataset.
pub const REFERENCE_SEGMENTS: u8 = 8;

const DESIGN_REPORT_YAML: &str = include_str!("../data/design_report.yaml");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDataset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Inputs the figures were computed for
    pub fluid: FluidDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<ReferenceFlow>,
    pub segments: Vec<ReferenceSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<ReferenceTotals>,
}

/// Flow state shared by every segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceFlow {
    pub area_m2: f64,
    pub velocity_mps: f64,
    pub kinetic_head_m: f64,
    pub reynolds: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Pump,
    ThrottlingValve,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceSegment {
    /// 1-based segment number
    pub segment: u8,
    pub kind: ReferenceKind,
    pub stations: u32,
    pub elevation_per_station_m: f64,
    pub head_per_station_m: f64,
    pub total_head_m: f64,
    pub power_kw: f64,
    pub power_hp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_length_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colebrook_f: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haaland_f: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceTotals {
    pub total_distance_m: f64,
    pub pump_stations: u32,
    /// Storage and break tanks along the route
    pub tanks: u32,
}

impl ReferenceDataset {
    /// The dataset of the pipeline design report, embedded at build time.
    pub fn builtin() -> ProjectResult<Self> {
        Self::from_yaml_str(DESIGN_REPORT_YAML)
    }

    pub fn from_yaml_str(content: &str) -> ProjectResult<Self> {
        let dataset: Self = serde_yaml::from_str(content)?;
        validate_reference(&dataset)?;
        Ok(dataset)
    }

    pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn segment(&self, index: u8) -> Option<&ReferenceSegment> {
        self.segments.iter().find(|s| s.segment == index)
    }

    /// Sum of the listed segment powers (kW).
    pub fn total_power_kw(&self) -> f64 {
        let mut segments: Vec<&ReferenceSegment> = self.segments.iter().collect();
        segments.sort_by_key(|s| s.segment);
        segments.iter().map(|s| s.power_kw).sum()
    }
}
