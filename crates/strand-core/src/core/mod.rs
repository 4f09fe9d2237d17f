//! # Core Module
//!
//! Data structures shared by every ordering operation.
//!
//! - **Models** ([`models`]) - Segments, handles, nucleotide types and the ordering container
//! - **Input** ([`io`]) - Construction from `+`-separated dot-bracket strings
//! - **Loops** ([`loops`]) - The open-loop collaborator trait and its registry

pub mod io;
pub mod loops;
pub mod models;
