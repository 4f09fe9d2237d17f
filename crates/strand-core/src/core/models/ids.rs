use slotmap::new_key_type;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

new_key_type! {
    pub struct LoopId;
}

static NEXT_SEGMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle for a strand segment.
///
/// Unlike loop keys, segment handles are unique across every ordering in the
/// process, so a segment keeps its handle when it moves between orderings
/// through a join or a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u64);

impl SegmentId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SEGMENT_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seg#{}", self.0)
    }
}

/// Identity of a single base: the segment that owns it and its offset
/// within that segment's buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseLocation {
    pub segment: SegmentId,
    pub offset: usize,
}

impl BaseLocation {
    pub fn new(segment: SegmentId, offset: usize) -> Self {
        Self { segment, offset }
    }
}
