use thiserror::Error;

use crate::core::models::bases::{BaseType, Bracket};
use crate::core::models::ids::{BaseLocation, LoopId, SegmentId};

/// Contract violations raised by ordering operations.
///
/// Each variant means an invariant was already broken by the caller; the
/// operation that reports it leaves the ordering unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("No segment is associated with loop {loop_id:?}")]
    LoopNotFound { loop_id: LoopId },

    #[error("Split markers must each be referenced by exactly one segment (found {found})")]
    SplitMarkers { found: usize },

    #[error("Segment {segment} is already associated with loop {existing:?}")]
    LoopAlreadyAssociated {
        segment: SegmentId,
        existing: LoopId,
    },

    #[error("Segment {segment} has no associated loop")]
    MissingLoop { segment: SegmentId },

    #[error("Loop {loop_id:?} is not present in the registry")]
    StaleLoop { loop_id: LoopId },

    #[error("Base location {location:?} does not belong to this ordering")]
    LocationNotFound { location: BaseLocation },

    #[error("Expected '{expected}' at {location:?} but found '{found}'")]
    BasePairMismatch {
        location: BaseLocation,
        expected: Bracket,
        found: Bracket,
    },

    #[error("Both ends of a base pair resolve to the same base {location:?}")]
    SameBase { location: BaseLocation },

    #[error("Free base index {index} of type {base} exceeds the complex's free bases")]
    FreeBaseOutOfRange { base: BaseType, index: usize },
}
