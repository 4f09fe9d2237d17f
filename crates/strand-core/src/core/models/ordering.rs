use super::bases::{Bracket, ExteriorBaseCounts};
use super::ids::{BaseLocation, SegmentId};
use super::segment::Segment;
use std::cell::OnceCell;
use std::collections::HashMap;

/// Separator between strands in the printable views.
pub const STRAND_SEPARATOR: char = '+';
/// Separator between strands in the flat coordinate space.
pub const FLAT_SEPARATOR: char = '_';

/// The `_`-joined flat form of an ordering, used to generate loops.
///
/// At separator positions the structure holds `.` and the code sequence
/// holds `_`, so every string has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSequence {
    pub sequence: String,
    pub structure: String,
    pub code_sequence: Vec<u8>,
}

impl FlatSequence {
    pub fn len(&self) -> usize {
        self.structure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }
}

/// Lazily built views; every cell is dropped by [`Ordering::invalidate_caches`].
#[derive(Debug, Default)]
struct ViewCache {
    sequence: OnceCell<String>,
    structure: OnceCell<String>,
    strand_names: OnceCell<String>,
    flat: OnceCell<FlatSequence>,
}

/// The canonical order of the strands of one complex.
///
/// Segments live in an arena keyed by [`SegmentId`] and are chained through
/// their `prev`/`next` handles. The chain is acyclic: the head has no
/// predecessor and the tail has no successor.
#[derive(Debug, Default)]
pub struct Ordering {
    pub(crate) segments: HashMap<SegmentId, Segment>,
    pub(crate) head: Option<SegmentId>,
    pub(crate) tail: Option<SegmentId>,
    pub(crate) count: usize,
    pub(crate) exterior_bases: ExteriorBaseCounts,
    cache: ViewCache,
}

impl Ordering {
    /// Creates an ordering with no strands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an already linked run of segments.
    ///
    /// `head` and `tail` must be the ends of the run stored in `segments`,
    /// and `count` its length.
    pub(crate) fn from_chain(
        segments: HashMap<SegmentId, Segment>,
        head: Option<SegmentId>,
        tail: Option<SegmentId>,
        count: usize,
    ) -> Self {
        debug_assert_eq!(segments.len(), count);
        Self {
            segments,
            head,
            tail,
            count,
            ..Self::default()
        }
    }

    /// Appends a segment after the current tail.
    pub(crate) fn push_segment(&mut self, mut segment: Segment) -> SegmentId {
        let id = SegmentId::next();
        segment.prev = self.tail;
        segment.next = None;
        match self.tail {
            Some(tail) => {
                if let Some(last) = self.segments.get_mut(&tail) {
                    last.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.segments.insert(id, segment);
        self.count += 1;
        self.invalidate_caches();
        id
    }

    pub fn strand_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    pub fn tail(&self) -> Option<SegmentId> {
        self.tail
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    pub(crate) fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    /// Iterates the segments in chain order, head first.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            ordering: self,
            cursor: self.head,
        }
    }

    /// Segment handles in chain order.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.segments().map(|(id, _)| id).collect()
    }

    /// Zero-based chain position of a segment.
    pub fn position_of(&self, id: SegmentId) -> Option<usize> {
        self.segments().position(|(current, _)| current == id)
    }

    /// Total number of bases across all strands.
    pub fn total_bases(&self) -> usize {
        self.segments().map(|(_, s)| s.size()).sum()
    }

    /// Length of the flat coordinate space, separators included.
    pub fn flat_len(&self) -> usize {
        self.total_bases() + self.count.saturating_sub(1)
    }

    pub fn code_at(&self, location: BaseLocation) -> Option<u8> {
        self.segment(location.segment)?
            .code_sequence()
            .get(location.offset)
            .copied()
    }

    pub fn bracket_at(&self, location: BaseLocation) -> Option<Bracket> {
        self.segment(location.segment)?
            .structure()
            .get(location.offset)
            .copied()
    }

    /// The `+`-joined printable sequence.
    pub fn sequence(&self) -> &str {
        self.cache.sequence.get_or_init(|| {
            self.join_views(STRAND_SEPARATOR, |s, out| out.push_str(s.sequence()))
        })
    }

    /// The `+`-joined dot-bracket structure.
    pub fn structure(&self) -> &str {
        self.cache.structure.get_or_init(|| {
            self.join_views(STRAND_SEPARATOR, |s, out| {
                out.extend(s.structure().iter().map(|b| b.as_char()))
            })
        })
    }

    /// Strand identities as `uid:tag` entries separated by commas.
    pub fn strand_names(&self) -> &str {
        self.cache.strand_names.get_or_init(|| {
            self.segments()
                .map(|(_, s)| format!("{}:{}", s.uid, s.tag))
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    /// The flat sequence, structure and code sequence in one pass.
    pub fn flat_sequence(&self) -> &FlatSequence {
        self.cache.flat.get_or_init(|| {
            let capacity = self.flat_len();
            let mut flat = FlatSequence {
                sequence: String::with_capacity(capacity),
                structure: String::with_capacity(capacity),
                code_sequence: Vec::with_capacity(capacity),
            };
            for (index, (_, segment)) in self.segments().enumerate() {
                if index > 0 {
                    flat.sequence.push(FLAT_SEPARATOR);
                    flat.structure.push(Bracket::Unpaired.as_char());
                    flat.code_sequence.push(FLAT_SEPARATOR as u8);
                }
                flat.sequence.push_str(segment.sequence());
                flat.structure
                    .extend(segment.structure().iter().map(|b| b.as_char()));
                flat.code_sequence.extend_from_slice(segment.code_sequence());
            }
            flat
        })
    }

    pub(crate) fn invalidate_caches(&mut self) {
        self.cache = ViewCache::default();
    }

    fn join_views(&self, separator: char, mut write: impl FnMut(&Segment, &mut String)) -> String {
        let mut out = String::with_capacity(self.flat_len());
        for (index, (_, segment)) in self.segments().enumerate() {
            if index > 0 {
                out.push(separator);
            }
            write(segment, &mut out);
        }
        out
    }
}

/// Chain-order iterator over the segments of an [`Ordering`].
pub struct Segments<'a> {
    ordering: &'a Ordering,
    cursor: Option<SegmentId>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (SegmentId, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let segment = self.ordering.segments.get(&id)?;
        self.cursor = segment.next;
        Some((id, segment))
    }
}
