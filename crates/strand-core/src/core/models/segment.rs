use super::bases::Bracket;
use super::ids::{LoopId, SegmentId};

/// Tag given to strands constructed without an identity list.
pub const DEFAULT_TAG: &str = "default";
/// Numeric id given to strands constructed without an identity list.
pub const DEFAULT_UID: i64 = -1;

/// One strand of a complex: its printable sequence, coded sequence and
/// dot-bracket structure, all of the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub uid: i64,                          // Numeric strand id, or DEFAULT_UID
    pub tag: String,                       // Display name of the strand
    sequence: String,                      // Printable sequence
    code_sequence: Vec<u8>,                // One nucleotide code per base
    pub(crate) structure: Vec<Bracket>,    // Mutable pairing annotation
    pub(crate) prev: Option<SegmentId>,    // Previous segment in chain order
    pub(crate) next: Option<SegmentId>,    // Next segment in chain order
    pub(crate) open_loop: Option<LoopId>,  // Exterior loop adjacent to this strand
}

impl Segment {
    pub(crate) fn new(
        uid: i64,
        tag: &str,
        sequence: &str,
        code_sequence: &[u8],
        structure: Vec<Bracket>,
    ) -> Self {
        debug_assert_eq!(sequence.len(), structure.len());
        debug_assert_eq!(code_sequence.len(), structure.len());
        Self {
            uid,
            tag: tag.to_string(),
            sequence: sequence.to_string(),
            code_sequence: code_sequence.to_vec(),
            structure,
            prev: None,
            next: None,
            open_loop: None,
        }
    }

    pub fn size(&self) -> usize {
        self.structure.len()
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn code_sequence(&self) -> &[u8] {
        &self.code_sequence
    }

    pub fn structure(&self) -> &[Bracket] {
        &self.structure
    }

    pub fn structure_string(&self) -> String {
        self.structure.iter().map(|b| b.as_char()).collect()
    }

    pub fn open_loop(&self) -> Option<LoopId> {
        self.open_loop
    }

    pub fn prev(&self) -> Option<SegmentId> {
        self.prev
    }

    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }

    /// True when every base of the strand is paired.
    pub fn is_fully_paired(&self) -> bool {
        !self.structure.contains(&Bracket::Unpaired)
    }

    /// Running bracket balance never drops below zero.
    pub fn is_locally_well_formed(&self) -> bool {
        let mut balance: isize = 0;
        for bracket in &self.structure {
            match bracket {
                Bracket::Open => balance += 1,
                Bracket::Close => {
                    balance -= 1;
                    if balance < 0 {
                        return false;
                    }
                }
                Bracket::Unpaired => {}
            }
        }
        true
    }
}
