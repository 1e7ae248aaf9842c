//! rl-core: stable foundation for ridgeline.
//!
//! Contains:
//! - units (uom SI types, constructors and unit conversions)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RlError, RlResult};
pub use numeric::*;
pub use units::*;
