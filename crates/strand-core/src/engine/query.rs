use super::error::OrderingError;
use crate::core::loops::registry::LoopRegistry;
use crate::core::models::bases::{BaseCounts, ExteriorBaseCounts};
use crate::core::models::ident::IdentList;
use crate::core::models::ids::LoopId;
use crate::core::models::ordering::Ordering;
use tracing::instrument;

impl Ordering {
    /// Sums the free bases of every strand's loop into the ordering's
    /// exterior tally.
    ///
    /// The returned reference points at a single aggregate that is
    /// overwritten by the next call; copy it to keep a snapshot.
    pub fn exterior_bases(
        &mut self,
        loops: &LoopRegistry,
    ) -> Result<&ExteriorBaseCounts, OrderingError> {
        let mut total = BaseCounts::default();
        for (segment, strand) in self.segments() {
            let loop_id = strand.open_loop.ok_or(OrderingError::MissingLoop { segment })?;
            let open_loop = loops
                .get(loop_id)
                .ok_or(OrderingError::StaleLoop { loop_id })?;
            total += open_loop.free_bases();
        }
        self.exterior_bases = total;
        Ok(&self.exterior_bases)
    }

    /// The tally computed by the last [`Ordering::exterior_bases`] call.
    pub fn last_exterior_bases(&self) -> &ExteriorBaseCounts {
        &self.exterior_bases
    }

    /// Checks whether some cyclic rotation of the strand tags equals `ids`.
    ///
    /// On a match, returns the loop of the strand where the first matching
    /// rotation starts. Lists of a different length never match.
    pub fn check_id_list(&self, ids: &IdentList) -> Option<LoopId> {
        let strands: Vec<_> = self.segments().map(|(_, s)| s).collect();
        let wanted: Vec<&str> = ids.tags().collect();
        let n = strands.len();
        if n == 0 || wanted.len() != n {
            return None;
        }
        (0..n)
            .find(|&start| (0..n).all(|k| strands[(start + k) % n].tag == wanted[k]))
            .and_then(|start| strands[start].open_loop)
    }

    /// True iff some strand tagged `tag` has every base paired.
    pub fn check_id_bound(&self, tag: &str) -> bool {
        self.segments()
            .any(|(_, s)| s.tag == tag && s.is_fully_paired())
    }

    /// Asks every strand's loop to refresh its local context.
    pub fn update_local_context(&self, loops: &mut LoopRegistry) -> Result<(), OrderingError> {
        for (segment, strand) in self.segments() {
            let loop_id = strand.open_loop.ok_or(OrderingError::MissingLoop { segment })?;
            loops
                .get_mut(loop_id)
                .ok_or(OrderingError::StaleLoop { loop_id })?
                .update_local_context();
        }
        Ok(())
    }

    /// Human-readable description of the loops along the ordering.
    #[instrument(skip_all, level = "trace")]
    pub fn report(&self, loops: &LoopRegistry) -> Result<String, OrderingError> {
        let mut out = String::from("\nStrand ordering: \n");
        for (segment, strand) in self.segments() {
            let loop_id = strand.open_loop.ok_or(OrderingError::MissingLoop { segment })?;
            let open_loop = loops
                .get(loop_id)
                .ok_or(OrderingError::StaleLoop { loop_id })?;
            out.push_str(&open_loop.type_internals_to_string());
        }
        out.push('\n');
        Ok(out)
    }
}
