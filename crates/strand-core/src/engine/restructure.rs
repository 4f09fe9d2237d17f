use super::error::OrderingError;
use crate::core::loops::registry::LoopRegistry;
use crate::core::models::bases::Bracket;
use crate::core::models::ids::{LoopId, SegmentId};
use crate::core::models::ordering::Ordering;
use crate::core::models::segment::Segment;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

impl Ordering {
    /// Appends every strand of `second` after the tail of `self`.
    ///
    /// Segments are moved, not copied, and keep their handles. The canonical
    /// rooting of `self` is unchanged.
    #[instrument(skip_all, fields(first = self.count, second = second.count))]
    pub fn join(&mut self, second: Ordering) {
        let Ordering {
            segments,
            head: second_head,
            tail: second_tail,
            count: second_count,
            ..
        } = second;
        let Some(second_head) = second_head else {
            return;
        };

        self.segments.extend(segments);
        match self.tail {
            Some(tail) => {
                if let Some(last) = self.segments.get_mut(&tail) {
                    last.next = Some(second_head);
                }
                if let Some(first) = self.segments.get_mut(&second_head) {
                    first.prev = Some(tail);
                }
            }
            None => self.head = Some(second_head),
        }
        self.tail = second_tail;
        self.count += second_count;
        self.invalidate_caches();
        debug!(strands = self.count, "Joined strand orderings.");
    }

    /// Joins two orderings, `first` ahead of `second`.
    pub fn join_ordering(mut first: Ordering, second: Ordering) -> Ordering {
        first.join(second);
        first
    }

    /// Splits the complex in two after a base pair joining them was broken.
    ///
    /// `first_old` and `second_old` are the loops on either side of the broken
    /// pair; each must be referenced by exactly one segment. Those segments are
    /// re-associated with `first_new` and `second_new` respectively, and the old
    /// loops are released from `loops`.
    ///
    /// Calling the two matched segments A and B in chain order: when A is the
    /// head, `self` keeps `[head, B)` and the returned ordering holds
    /// `[B, tail]`; otherwise the run `[A, B)` is cut out and returned while
    /// `self` keeps everything else. Either way `self` keeps its head.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::SplitMarkers`] if the markers are not found
    /// exactly once each, or [`OrderingError::StaleLoop`] if an old loop is
    /// missing from the registry. Nothing is modified on error.
    #[instrument(skip_all, fields(strands = self.count))]
    pub fn break_ordering(
        &mut self,
        loops: &mut LoopRegistry,
        first_old: LoopId,
        second_old: LoopId,
        first_new: LoopId,
        second_new: LoopId,
    ) -> Result<Ordering, OrderingError> {
        let mut boundaries: Vec<(usize, SegmentId, LoopId)> = Vec::with_capacity(2);
        let (mut first_hits, mut second_hits) = (0, 0);
        for (position, (id, segment)) in self.segments().enumerate() {
            match segment.open_loop {
                Some(l) if l == first_old => {
                    first_hits += 1;
                    boundaries.push((position, id, first_new));
                }
                Some(l) if l == second_old => {
                    second_hits += 1;
                    boundaries.push((position, id, second_new));
                }
                _ => {}
            }
        }
        if first_old == second_old || first_hits != 1 || second_hits != 1 {
            return Err(OrderingError::SplitMarkers {
                found: boundaries.len(),
            });
        }
        for loop_id in [first_old, second_old] {
            if !loops.contains(loop_id) {
                return Err(OrderingError::StaleLoop { loop_id });
            }
        }

        let (position_a, boundary_a, _) = boundaries[0];
        let (position_b, boundary_b, _) = boundaries[1];
        let run_length = position_b - position_a;
        let before_b = self.link(boundary_b).0.ok_or(OrderingError::SplitMarkers {
            found: boundaries.len(),
        })?;

        for &(_, id, new_loop) in &boundaries {
            if let Some(segment) = self.segments.get_mut(&id) {
                segment.open_loop = Some(new_loop);
            }
        }

        let new_ordering = if Some(boundary_a) == self.head {
            let old_tail = self.tail;
            self.set_next(before_b, None);
            self.set_prev(boundary_b, None);
            let moved = self.take_run(boundary_b, old_tail);
            let moved_count = self.count - run_length;
            self.tail = Some(before_b);
            self.count = run_length;
            trace!(kept = run_length, moved = moved_count, "Split at head boundary.");
            Ordering::from_chain(moved, Some(boundary_b), old_tail, moved_count)
        } else {
            let before_a = self.link(boundary_a).0;
            self.set_next(before_b, None);
            self.set_prev(boundary_a, None);
            if let Some(before_a) = before_a {
                self.set_next(before_a, Some(boundary_b));
            }
            self.set_prev(boundary_b, before_a);
            let moved = self.take_run(boundary_a, Some(before_b));
            self.count -= run_length;
            trace!(kept = self.count, moved = run_length, "Split at interior boundary.");
            Ordering::from_chain(moved, Some(boundary_a), Some(before_b), run_length)
        };
        self.invalidate_caches();

        loops.release(first_old);
        loops.release(second_old);
        debug!(
            kept = self.count,
            split_off = new_ordering.count,
            "Broke strand ordering in two."
        );
        Ok(new_ordering)
    }

    /// Re-roots the chain so that the segment adjacent to `target` comes first.
    ///
    /// The structure is treated as a ring cut at the new head: from the target
    /// to the old tail every `)` whose partner now lies ahead is flipped to
    /// `(`, and from the target's predecessor back to the old head every `(`
    /// whose partner now lies behind is flipped to `)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::LoopNotFound`] if no segment references
    /// `target`.
    #[instrument(skip_all)]
    pub fn reorder(&mut self, target: LoopId) -> Result<(), OrderingError> {
        let pivot = self
            .segments()
            .find(|(_, s)| s.open_loop == Some(target))
            .map(|(id, _)| id)
            .ok_or(OrderingError::LoopNotFound { loop_id: target })?;
        if Some(pivot) == self.head {
            return Ok(());
        }

        let order = self.segment_ids();
        let pivot_position = order.iter().position(|&id| id == pivot).unwrap_or(0);
        let (behind, ahead) = order.split_at(pivot_position);

        let mut open = 0usize;
        for id in ahead {
            if let Some(segment) = self.segments.get_mut(id) {
                for bracket in segment.structure.iter_mut() {
                    match *bracket {
                        Bracket::Open => open += 1,
                        Bracket::Close if open == 0 => *bracket = Bracket::Open,
                        Bracket::Close => open -= 1,
                        Bracket::Unpaired => {}
                    }
                }
            }
        }

        let mut close = 0usize;
        for id in behind.iter().rev() {
            if let Some(segment) = self.segments.get_mut(id) {
                for bracket in segment.structure.iter_mut().rev() {
                    match *bracket {
                        Bracket::Close => close += 1,
                        Bracket::Open if close == 0 => *bracket = Bracket::Close,
                        Bracket::Open => close -= 1,
                        Bracket::Unpaired => {}
                    }
                }
            }
        }

        let (old_head, old_tail) = (self.head, self.tail);
        let new_tail = behind.last().copied();
        if let (Some(old_head), Some(old_tail)) = (old_head, old_tail) {
            self.set_next(old_tail, Some(old_head));
            self.set_prev(old_head, Some(old_tail));
        }
        self.set_prev(pivot, None);
        if let Some(new_tail) = new_tail {
            self.set_next(new_tail, None);
        }
        self.head = Some(pivot);
        self.tail = new_tail;
        self.invalidate_caches();
        debug!(position = pivot_position, "Re-rooted strand ordering.");
        Ok(())
    }

    fn link(&self, id: SegmentId) -> (Option<SegmentId>, Option<SegmentId>) {
        self.segments
            .get(&id)
            .map_or((None, None), |s| (s.prev, s.next))
    }

    fn set_next(&mut self, id: SegmentId, next: Option<SegmentId>) {
        if let Some(segment) = self.segments.get_mut(&id) {
            segment.next = next;
        }
    }

    fn set_prev(&mut self, id: SegmentId, prev: Option<SegmentId>) {
        if let Some(segment) = self.segments.get_mut(&id) {
            segment.prev = prev;
        }
    }

    /// Removes the run `[from, to]` from the arena, following `next` links.
    fn take_run(
        &mut self,
        from: SegmentId,
        to: Option<SegmentId>,
    ) -> HashMap<SegmentId, Segment> {
        let mut run = HashMap::new();
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let Some(segment) = self.segments.remove(&id) else {
                break;
            };
            cursor = if Some(id) == to { None } else { segment.next };
            run.insert(id, segment);
        }
        run
    }
}
