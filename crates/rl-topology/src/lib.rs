//! rl-topology: the static segment model of the pipeline.
//!
//! Provides:
//! - Segment descriptors (id, role, geometry, fittings)
//! - The read-only eight-segment catalog and checked accessors
//! - Cumulative distance/elevation polylines for terrain plots
//! - Catalog invariant validation
//!
//! # Example
//!
//! ```
//! use rl_topology::{catalog, cumulative_profile, segment};
//!
//! assert_eq!(catalog().len(), 8);
//! assert!(segment(9).is_err());
//!
//! let summit = cumulative_profile()
//!     .iter()
//!     .map(|p| p.elevation_m)
//!     .fold(f64::MIN, f64::max);
//! assert_eq!(summit, 500.0);
//! ```

pub mod catalog;
pub mod error;
pub mod profile;
pub mod segment;
pub mod validate;

// Re-exports for ergonomics
pub use catalog::{CatalogSummary, catalog, definition, segment, summary};
pub use error::{TopologyError, TopologyResult};
pub use profile::{ProfilePoint, StationPoint, cumulative_profile, profile_of, station_profile};
pub use segment::{Fitting, SegmentDefinition, SegmentId, SegmentKind, SegmentRole};
pub use validate::{validate_catalog, validate_segment};
