use crate::core::models::bases::{BaseCounts, BaseType};
use crate::core::models::ids::BaseLocation;
use std::fmt::Debug;

/// The view an ordering has of an open loop adjacent to one of its strands.
///
/// Loops are owned by the simulation; an ordering only stores their
/// [`LoopId`](crate::core::models::ids::LoopId) and reaches them through a
/// [`LoopRegistry`](super::registry::LoopRegistry).
pub trait OpenLoop: Debug {
    /// Number of unpaired bases of each type in this loop.
    fn free_bases(&self) -> BaseCounts;

    /// Location of the `index`-th free base of type `base`.
    ///
    /// Returns `None` when `index` is not below `free_bases().get(base)`.
    fn base(&self, base: BaseType, index: usize) -> Option<BaseLocation>;

    /// Detaches neighbour bookkeeping before the loop is released.
    fn cleanup_adjacent(&mut self);

    /// Recomputes any cached local context.
    fn update_local_context(&mut self);

    /// Diagnostic description, never parsed.
    fn type_internals_to_string(&self) -> String;
}
