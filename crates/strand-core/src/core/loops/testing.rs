use super::traits::OpenLoop;
use crate::core::models::bases::{BaseCounts, BaseType};
use crate::core::models::ids::BaseLocation;

/// Scriptable open loop used by unit tests.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockLoop {
    label: String,
    counts: BaseCounts,
    free: Vec<(BaseType, BaseLocation)>,
    cleaned: bool,
    updates: usize,
}

impl MockLoop {
    pub(crate) fn labelled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// A loop reporting `counts` and resolving bases from `free`, which lists
    /// free bases in the order the loop enumerates them.
    pub(crate) fn with_free_bases(counts: BaseCounts, free: Vec<(BaseType, BaseLocation)>) -> Self {
        Self {
            counts,
            free,
            ..Self::default()
        }
    }
}

impl OpenLoop for MockLoop {
    fn free_bases(&self) -> BaseCounts {
        self.counts
    }

    fn base(&self, base: BaseType, index: usize) -> Option<BaseLocation> {
        self.free
            .iter()
            .filter(|(kind, _)| *kind == base)
            .nth(index)
            .map(|(_, location)| *location)
    }

    fn cleanup_adjacent(&mut self) {
        self.cleaned = true;
    }

    fn update_local_context(&mut self) {
        self.updates += 1;
    }

    fn type_internals_to_string(&self) -> String {
        let mut out = self.label.clone();
        if self.cleaned {
            out.push_str(" cleaned");
        }
        if self.updates > 0 {
            out.push_str(&format!(" updated={}", self.updates));
        }
        out
    }
}
