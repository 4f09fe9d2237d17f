//! # Core Models Module
//!
//! Representation of one complex's strands.
//!
//! ## Key Components
//!
//! - [`segment`] - One strand's sequence, coded sequence and structure
//! - [`ordering`] - The chain of segments for a complex, with cached flat views
//! - [`bases`] - Nucleotide types, free-base tallies and structure brackets
//! - [`ident`] - Caller-supplied strand identities
//! - [`ids`] - Stable handles for segments, loops and individual bases
//!
//! ## Usage
//!
//! ```ignore
//! use strandorder::core::models::{bases::BaseType, ordering::Ordering};
//!
//! let ordering = Ordering::parse("GGG+CCC", "(((+)))", &BaseType::encode("GGG+CCC"))?;
//! assert_eq!(ordering.strand_count(), 2);
//! assert_eq!(ordering.structure(), "(((+)))");
//! ```

pub mod bases;
pub mod ident;
pub mod ids;
pub mod ordering;
pub mod segment;
