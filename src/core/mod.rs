//! Core engine: traversal, labelling, grouping, and emission.
//!
//! Nothing in this module parses arguments or touches the process
//! environment; [`session::Session`] is the entry point.

pub mod classify;
pub mod emit;
pub mod error;
pub mod fs;
pub mod grouping;
pub mod session;
