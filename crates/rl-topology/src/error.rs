//! Topology error types.

use rl_core::RlError;
use thiserror::Error;

use crate::segment::SegmentId;

/// Catalog lookup and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// A segment index outside 1..=8 was requested.
    #[error("Segment index {index} is outside the catalog (valid: 1..={max})", max = SegmentId::COUNT)]
    SegmentOutOfRange { index: usize },

    /// A catalog entry violates a geometric or functional invariant.
    #[error("Segment {id}: {what}")]
    InvalidSegment { id: SegmentId, what: String },

    /// The catalog does not list the segments 1..=8 in order.
    #[error("Catalog order broken at position {position}: found segment {found}")]
    OutOfOrder { position: usize, found: SegmentId },
}

pub type TopologyResult<T> = Result<T, TopologyError>;

impl From<TopologyError> for RlError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::SegmentOutOfRange { index } => RlError::OutOfRange {
                what: "segment index",
                index,
                min: 1,
                max: SegmentId::COUNT,
            },
            other => RlError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
