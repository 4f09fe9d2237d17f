//! Construction of orderings from textual input.
//!
//! The dot-bracket reader accepts the parallel `sequence`, `structure` and
//! code-sequence strings a simulation is configured with, using `+` between
//! strands.

pub mod dot_bracket;
