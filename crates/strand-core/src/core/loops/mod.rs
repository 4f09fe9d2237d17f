//! Collaborator interface for the open loops adjacent to each strand.
//!
//! Loop internals and thermodynamics live in the surrounding simulation. This
//! module only defines what an ordering needs from a loop ([`traits::OpenLoop`])
//! and the arena the simulation stores them in ([`registry::LoopRegistry`]).

pub mod registry;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;
