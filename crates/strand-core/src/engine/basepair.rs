use super::error::OrderingError;
use crate::core::models::bases::Bracket;
use crate::core::models::ids::BaseLocation;
use crate::core::models::ordering::Ordering;
use tracing::trace;

impl Ordering {
    /// Records a new base pair between two unpaired bases.
    ///
    /// The base earlier in chain order becomes `(` and the later one `)`,
    /// whatever the argument order.
    pub fn add_basepair(
        &mut self,
        first: BaseLocation,
        second: BaseLocation,
    ) -> Result<(), OrderingError> {
        let (open, close) = self.resolve_pair(first, second)?;
        self.expect_bracket(open, Bracket::Unpaired)?;
        self.expect_bracket(close, Bracket::Unpaired)?;
        self.write_bracket(open, Bracket::Open);
        self.write_bracket(close, Bracket::Close);
        self.invalidate_caches();
        trace!(?open, ?close, "Added base pair.");
        Ok(())
    }

    /// Removes the base pair between two paired bases.
    pub fn break_basepair(
        &mut self,
        first: BaseLocation,
        second: BaseLocation,
    ) -> Result<(), OrderingError> {
        let (open, close) = self.resolve_pair(first, second)?;
        self.expect_bracket(open, Bracket::Open)?;
        self.expect_bracket(close, Bracket::Close)?;
        self.write_bracket(open, Bracket::Unpaired);
        self.write_bracket(close, Bracket::Unpaired);
        self.invalidate_caches();
        trace!(?open, ?close, "Broke base pair.");
        Ok(())
    }

    /// Resolves both locations in one chain scan and returns them in
    /// document order.
    fn resolve_pair(
        &self,
        first: BaseLocation,
        second: BaseLocation,
    ) -> Result<(BaseLocation, BaseLocation), OrderingError> {
        let mut first_key = None;
        let mut second_key = None;
        for (position, (id, segment)) in self.segments().enumerate() {
            if id == first.segment && first.offset < segment.size() {
                first_key = Some((position, first.offset));
            }
            if id == second.segment && second.offset < segment.size() {
                second_key = Some((position, second.offset));
            }
        }
        let first_key = first_key.ok_or(OrderingError::LocationNotFound { location: first })?;
        let second_key = second_key.ok_or(OrderingError::LocationNotFound { location: second })?;

        match first_key.cmp(&second_key) {
            std::cmp::Ordering::Less => Ok((first, second)),
            std::cmp::Ordering::Greater => Ok((second, first)),
            std::cmp::Ordering::Equal => Err(OrderingError::SameBase { location: first }),
        }
    }

    fn expect_bracket(&self, location: BaseLocation, expected: Bracket) -> Result<(), OrderingError> {
        let found = self
            .bracket_at(location)
            .ok_or(OrderingError::LocationNotFound { location })?;
        if found == expected {
            Ok(())
        } else {
            Err(OrderingError::BasePairMismatch {
                location,
                expected,
                found,
            })
        }
    }

    fn write_bracket(&mut self, location: BaseLocation, bracket: Bracket) {
        if let Some(slot) = self
            .segment_mut(location.segment)
            .and_then(|s| s.structure.get_mut(location.offset))
        {
            *slot = bracket;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bases::BaseType;
    use crate::core::models::ids::SegmentId;

    fn parse(sequence: &str, structure: &str) -> Ordering {
        Ordering::parse(sequence, structure, &BaseType::encode(sequence)).unwrap()
    }

    fn ids(ordering: &Ordering) -> Vec<SegmentId> {
        ordering.segment_ids()
    }

    #[test]
    fn add_basepair_within_one_segment() {
        let mut ordering = parse("GGAAACC", ".......");
        let strand = ids(&ordering)[0];
        ordering
            .add_basepair(BaseLocation::new(strand, 1), BaseLocation::new(strand, 5))
            .unwrap();
        assert_eq!(ordering.structure(), ".(...).");
    }

    #[test]
    fn add_basepair_orders_arguments_by_position() {
        let mut ordering = parse("GGAA+TTCC", "....+....");
        let strands = ids(&ordering);
        ordering
            .add_basepair(BaseLocation::new(strands[1], 2), BaseLocation::new(strands[0], 0))
            .unwrap();
        assert_eq!(ordering.structure(), "(...+..).");
    }

    #[test]
    fn add_basepair_orders_by_offset_within_same_segment() {
        let mut ordering = parse("GGAAACC", ".......");
        let strand = ids(&ordering)[0];
        ordering
            .add_basepair(BaseLocation::new(strand, 6), BaseLocation::new(strand, 0))
            .unwrap();
        assert_eq!(ordering.structure(), "(.....)");
    }

    #[test]
    fn add_then_break_restores_structure() {
        let mut ordering = parse("GGAA+TTCC", "(...+...)");
        let original = ordering.structure().to_string();
        let strands = ids(&ordering);
        let p = BaseLocation::new(strands[1], 0);
        let q = BaseLocation::new(strands[0], 1);

        ordering.add_basepair(p, q).unwrap();
        assert_eq!(ordering.structure(), "((..+)..)");
        ordering.break_basepair(p, q).unwrap();
        assert_eq!(ordering.structure(), original);
    }

    #[test]
    fn add_basepair_rejects_paired_base_without_mutation() {
        let mut ordering = parse("GGAAACC", "(.....)");
        let strand = ids(&ordering)[0];
        let err = ordering
            .add_basepair(BaseLocation::new(strand, 0), BaseLocation::new(strand, 3))
            .unwrap_err();
        assert_eq!(
            err,
            OrderingError::BasePairMismatch {
                location: BaseLocation::new(strand, 0),
                expected: Bracket::Unpaired,
                found: Bracket::Open,
            }
        );
        assert_eq!(ordering.structure(), "(.....)");
    }

    #[test]
    fn break_basepair_requires_open_then_close() {
        let mut ordering = parse("GGAAACC", "((...))");
        let strand = ids(&ordering)[0];
        let err = ordering
            .break_basepair(BaseLocation::new(strand, 0), BaseLocation::new(strand, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            OrderingError::BasePairMismatch {
                expected: Bracket::Close,
                ..
            }
        ));
        assert_eq!(ordering.structure(), "((...))");
    }

    #[test]
    fn unknown_locations_are_rejected() {
        let mut ordering = parse("GGAA", "....");
        let foreign = parse("CC", "..");
        let strand = ids(&ordering)[0];
        let outside = BaseLocation::new(ids(&foreign)[0], 0);
        assert_eq!(
            ordering
                .add_basepair(BaseLocation::new(strand, 0), outside)
                .unwrap_err(),
            OrderingError::LocationNotFound { location: outside }
        );
        let past_end = BaseLocation::new(strand, 4);
        assert_eq!(
            ordering
                .add_basepair(past_end, BaseLocation::new(strand, 0))
                .unwrap_err(),
            OrderingError::LocationNotFound { location: past_end }
        );
        assert!(matches!(
            ordering.add_basepair(BaseLocation::new(strand, 1), BaseLocation::new(strand, 1)),
            Err(OrderingError::SameBase { .. })
        ));
    }
}
