use super::error::OrderingError;
use crate::core::loops::registry::LoopRegistry;
use crate::core::models::bases::BaseType;
use crate::core::models::ids::{BaseLocation, LoopId, SegmentId};
use crate::core::models::ordering::Ordering;
use tracing::{debug, warn};

/// Where a flat index lands.
enum FlatPosition {
    Base(BaseLocation),
    Separator,
    OutOfBounds,
}

impl Ordering {
    fn locate_flat(&self, index: usize) -> FlatPosition {
        let mut start = 0;
        for (id, segment) in self.segments() {
            if index < start + segment.size() {
                return FlatPosition::Base(BaseLocation::new(id, index - start));
            }
            if index == start + segment.size() && segment.next().is_some() {
                return FlatPosition::Separator;
            }
            start += segment.size() + 1;
        }
        FlatPosition::OutOfBounds
    }

    /// Maps an index of the flat coordinate space to the base it names.
    ///
    /// Indices on a strand separator or past the end are logged and yield
    /// `None`.
    pub fn convert_index(&self, index: usize) -> Option<BaseLocation> {
        match self.locate_flat(index) {
            FlatPosition::Base(location) => Some(location),
            FlatPosition::Separator => {
                warn!(index, "convert_index: index falls on a strand break.");
                None
            }
            FlatPosition::OutOfBounds => {
                warn!(index, len = self.flat_len(), "convert_index: index out of bounds.");
                None
            }
        }
    }

    /// Associates `open_loop` with the strand containing flat index `index`.
    ///
    /// Returns the strand the loop was attached to, or `None` (logged) when
    /// the index does not name a base.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::LoopAlreadyAssociated`] if that strand already
    /// has a loop.
    pub fn add_open_loop(
        &mut self,
        open_loop: LoopId,
        index: usize,
    ) -> Result<Option<SegmentId>, OrderingError> {
        let FlatPosition::Base(location) = self.locate_flat(index) else {
            warn!(index, "add_open_loop: index does not name a base, no loop associated.");
            return Ok(None);
        };
        let segment = location.segment;
        let Some(target) = self.segment_mut(segment) else {
            return Ok(None);
        };
        if let Some(existing) = target.open_loop {
            return Err(OrderingError::LoopAlreadyAssociated { segment, existing });
        }
        target.open_loop = Some(open_loop);
        Ok(Some(segment))
    }

    /// Finds the `index`-th free base of type `base` across the complex.
    ///
    /// Strands are visited in chain order and each one's loop is asked for its
    /// free-base count until the running budget falls inside a loop, which
    /// then resolves the concrete location.
    pub fn get_index(
        &self,
        base: BaseType,
        index: usize,
        loops: &LoopRegistry,
    ) -> Result<(LoopId, BaseLocation), OrderingError> {
        let mut remaining = index;
        for (segment, strand) in self.segments() {
            let loop_id = strand.open_loop.ok_or(OrderingError::MissingLoop { segment })?;
            let open_loop = loops
                .get(loop_id)
                .ok_or(OrderingError::StaleLoop { loop_id })?;
            let free = open_loop.free_bases().get(base) as usize;
            if remaining < free {
                let location = open_loop
                    .base(base, remaining)
                    .ok_or(OrderingError::FreeBaseOutOfRange { base, index })?;
                return Ok((loop_id, location));
            }
            remaining -= free;
        }
        Err(OrderingError::FreeBaseOutOfRange { base, index })
    }

    /// The loop adjacent to the canonical first strand.
    pub fn head_loop(&self) -> Option<LoopId> {
        self.head
            .and_then(|head| self.segment(head))
            .and_then(|s| s.open_loop)
    }

    /// Moves the first association with `old` over to `new`.
    pub fn replace_open_loop(&mut self, old: LoopId, new: LoopId) -> Result<(), OrderingError> {
        let segment = self
            .segments()
            .find(|(_, s)| s.open_loop == Some(old))
            .map(|(id, _)| id)
            .ok_or(OrderingError::LoopNotFound { loop_id: old })?;
        if let Some(target) = self.segment_mut(segment) {
            target.open_loop = Some(new);
        }
        Ok(())
    }

    /// Forgets every loop association without touching the loops.
    ///
    /// Used before dropping an ordering whose loops are owned elsewhere.
    pub fn cleanup(&mut self) {
        for segment in self.segments.values_mut() {
            segment.open_loop = None;
        }
    }

    /// Drops a standalone ordering together with every loop it references.
    pub fn release_loops(mut self, loops: &mut LoopRegistry) {
        let owned: Vec<LoopId> = self.segments().filter_map(|(_, s)| s.open_loop).collect();
        self.cleanup();
        let mut released = 0;
        for loop_id in owned {
            if loops.release(loop_id).is_some() {
                released += 1;
            }
        }
        debug!(released, "Released loops of a standalone ordering.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loops::testing::MockLoop;
    use crate::core::models::bases::BaseCounts;

    fn parse(sequence: &str, structure: &str) -> Ordering {
        Ordering::parse(sequence, structure, &BaseType::encode(sequence)).unwrap()
    }

    #[test]
    fn convert_index_resolves_each_strand() {
        let ordering = parse("ACGT+TTTTT", "(..)+(..).");
        let strands = ordering.segment_ids();

        let first = ordering.convert_index(0).unwrap();
        assert_eq!(first, BaseLocation::new(strands[0], 0));
        assert_eq!(ordering.code_at(first), Some(BaseType::A.code()));

        assert_eq!(ordering.convert_index(3), Some(BaseLocation::new(strands[0], 3)));
        assert_eq!(ordering.convert_index(4), None);
        assert_eq!(ordering.convert_index(5), Some(BaseLocation::new(strands[1], 0)));
        assert_eq!(ordering.convert_index(7), Some(BaseLocation::new(strands[1], 2)));
        assert_eq!(ordering.convert_index(9), Some(BaseLocation::new(strands[1], 4)));
        assert_eq!(ordering.convert_index(10), None);
    }

    #[test]
    fn convert_index_agrees_with_flat_sequence() {
        let ordering = parse("GAT+CCA+T", "(..+.).+.");
        let flat = ordering.flat_sequence().code_sequence.clone();
        for (index, &code) in flat.iter().enumerate() {
            match ordering.convert_index(index) {
                Some(location) => assert_eq!(ordering.code_at(location), Some(code)),
                None => assert_eq!(code, b'_'),
            }
        }
    }

    #[test]
    fn add_open_loop_attaches_to_containing_strand() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC+GT", "((+))");
        let strands = ordering.segment_ids();
        let exterior = loops.insert(MockLoop::labelled("exterior"));
        let second = loops.insert(MockLoop::labelled("second"));

        assert_eq!(ordering.add_open_loop(exterior, 1).unwrap(), Some(strands[0]));
        assert_eq!(ordering.add_open_loop(second, 3).unwrap(), Some(strands[1]));
        assert_eq!(ordering.head_loop(), Some(exterior));
        assert_eq!(
            ordering.segment(strands[1]).unwrap().open_loop(),
            Some(second)
        );
    }

    #[test]
    fn add_open_loop_rejects_double_association() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC+GT", "((+))");
        let strand = ordering.segment_ids()[0];
        let first = loops.insert(MockLoop::labelled("a"));
        let second = loops.insert(MockLoop::labelled("b"));

        ordering.add_open_loop(first, 0).unwrap();
        assert_eq!(
            ordering.add_open_loop(second, 1).unwrap_err(),
            OrderingError::LoopAlreadyAssociated {
                segment: strand,
                existing: first
            }
        );
    }

    #[test]
    fn add_open_loop_ignores_separator_and_out_of_range() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC+GT", "((+))");
        let stray = loops.insert(MockLoop::labelled("stray"));
        assert_eq!(ordering.add_open_loop(stray, 2).unwrap(), None);
        assert_eq!(ordering.add_open_loop(stray, 50).unwrap(), None);
        assert!(ordering.segments().all(|(_, s)| s.open_loop().is_none()));
    }

    #[test]
    fn get_index_walks_loops_in_chain_order() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AAC+GAA", "(..+.).");
        let strands = ordering.segment_ids();
        let first = loops.insert(MockLoop::with_free_bases(
            BaseCounts::new(2, 1, 0, 0),
            vec![
                (BaseType::A, BaseLocation::new(strands[0], 1)),
                (BaseType::C, BaseLocation::new(strands[0], 2)),
                (BaseType::A, BaseLocation::new(strands[1], 2)),
            ],
        ));
        let second = loops.insert(MockLoop::with_free_bases(
            BaseCounts::new(1, 0, 1, 0),
            vec![
                (BaseType::G, BaseLocation::new(strands[1], 0)),
                (BaseType::A, BaseLocation::new(strands[1], 1)),
            ],
        ));
        ordering.add_open_loop(first, 0).unwrap();
        ordering.add_open_loop(second, 4).unwrap();

        assert_eq!(
            ordering.get_index(BaseType::A, 1, &loops).unwrap(),
            (first, BaseLocation::new(strands[1], 2))
        );
        assert_eq!(
            ordering.get_index(BaseType::A, 2, &loops).unwrap(),
            (second, BaseLocation::new(strands[1], 1))
        );
        assert_eq!(
            ordering.get_index(BaseType::G, 0, &loops).unwrap(),
            (second, BaseLocation::new(strands[1], 0))
        );
        assert_eq!(
            ordering.get_index(BaseType::T, 0, &loops).unwrap_err(),
            OrderingError::FreeBaseOutOfRange {
                base: BaseType::T,
                index: 0
            }
        );
    }

    #[test]
    fn get_index_requires_every_strand_to_have_a_loop() {
        let loops = LoopRegistry::new();
        let ordering = parse("AC+GT", "((+))");
        let head = ordering.head().unwrap();
        assert_eq!(
            ordering.get_index(BaseType::A, 0, &loops).unwrap_err(),
            OrderingError::MissingLoop { segment: head }
        );
    }

    #[test]
    fn replace_open_loop_swaps_association() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC", "..");
        let old = loops.insert(MockLoop::labelled("old"));
        let new = loops.insert(MockLoop::labelled("new"));
        ordering.add_open_loop(old, 0).unwrap();

        ordering.replace_open_loop(old, new).unwrap();
        assert_eq!(ordering.head_loop(), Some(new));
        assert_eq!(
            ordering.replace_open_loop(old, new).unwrap_err(),
            OrderingError::LoopNotFound { loop_id: old }
        );
    }

    #[test]
    fn cleanup_clears_associations_but_keeps_loops() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC+GT", "((+))");
        let a = loops.insert(MockLoop::labelled("a"));
        ordering.add_open_loop(a, 0).unwrap();

        ordering.cleanup();
        assert!(ordering.head_loop().is_none());
        assert!(loops.contains(a));
    }

    #[test]
    fn release_loops_frees_every_referenced_loop() {
        let mut loops = LoopRegistry::new();
        let mut ordering = parse("AC+GT", "((+))");
        let a = loops.insert(MockLoop::labelled("a"));
        let b = loops.insert(MockLoop::labelled("b"));
        let unrelated = loops.insert(MockLoop::labelled("unrelated"));
        ordering.add_open_loop(a, 0).unwrap();
        ordering.add_open_loop(b, 3).unwrap();

        ordering.release_loops(&mut loops);
        assert!(!loops.contains(a));
        assert!(!loops.contains(b));
        assert!(loops.contains(unrelated));
    }
}
