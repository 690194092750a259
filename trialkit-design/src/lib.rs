//! Trial-sequence generation: expands a factorial design into a shuffled,
//! numbered list of trial records ready for a presentation loop.

pub mod design;
pub mod sequence;

pub use design::Design;
pub use sequence::{build_sequence, Sequence};
