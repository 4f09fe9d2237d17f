//! # strandorder
//!
//! Strand ordering bookkeeping for multi-strand nucleic-acid complexes in a
//! kinetic Monte Carlo simulator.
//!
//! An [`Ordering`](core::models::ordering::Ordering) records, for one complex,
//! the canonical order of its strands together with each strand's sequence,
//! coded sequence and dot-bracket structure. The simulation decides which
//! move to apply; this crate applies the bookkeeping consequence of it.
//!
//! ## Layout
//!
//! - **[`core`]: Data and collaborators.** Strand segments and their handles,
//!   nucleotide types, the ordering container with its cached views, the
//!   dot-bracket reader, and the [`OpenLoop`](core::loops::traits::OpenLoop)
//!   interface through which the ordering talks to the simulation's loops.
//!
//! - **[`engine`]: Operations.** Joining and splitting complexes, re-rooting,
//!   base-pair mutation, flat-index translation, aggregate queries, plus the
//!   parse configuration and the error types those operations report.

pub mod core;
pub mod engine;
