use super::traits::OpenLoop;
use crate::core::models::ids::LoopId;
use slotmap::SlotMap;
use tracing::trace;

/// Arena owning every open loop referenced by the orderings of a simulation.
#[derive(Debug, Default)]
pub struct LoopRegistry {
    loops: SlotMap<LoopId, Box<dyn OpenLoop>>,
}

impl LoopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, open_loop: impl OpenLoop + 'static) -> LoopId {
        self.insert_boxed(Box::new(open_loop))
    }

    pub fn insert_boxed(&mut self, open_loop: Box<dyn OpenLoop>) -> LoopId {
        self.loops.insert(open_loop)
    }

    pub fn get(&self, id: LoopId) -> Option<&dyn OpenLoop> {
        self.loops.get(id).map(|l| l.as_ref())
    }

    pub fn get_mut(&mut self, id: LoopId) -> Option<&mut (dyn OpenLoop + 'static)> {
        self.loops.get_mut(id).map(|l| l.as_mut())
    }

    pub fn contains(&self, id: LoopId) -> bool {
        self.loops.contains_key(id)
    }

    /// Removes a loop after letting it detach from its neighbours.
    pub fn release(&mut self, id: LoopId) -> Option<Box<dyn OpenLoop>> {
        let open_loop = self.loops.get_mut(id)?;
        open_loop.cleanup_adjacent();
        trace!(?id, "Releasing open loop.");
        self.loops.remove(id)
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }
}
