//! # Engine Module
//!
//! Operations the simulation applies to an [`Ordering`](crate::core::models::ordering::Ordering)
//! between moves. Each submodule adds one group of methods to the ordering:
//!
//! - **Restructuring** ([`restructure`]) - Join two complexes, split one in two, re-root the chain
//! - **Base pairs** ([`basepair`]) - Form and break pairs addressed by base identity
//! - **Indexing** ([`indexing`]) - Flat-index translation and loop association
//! - **Queries** ([`query`]) - Exterior free-base tally, strand-identity patterns, diagnostics
//! - **Configuration** ([`config`]) - Parse validation settings
//! - **Errors** ([`error`]) - Contract violations reported by the operations

pub mod basepair;
pub mod config;
pub mod error;
pub mod indexing;
pub mod query;
pub mod restructure;
