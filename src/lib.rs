//! Command line tracker for daily habits. Habits live in a single
//! pretty-printed JSON file in the platform state directory; every command
//! loads it, applies one change, and writes it back before returning.
//!

pub mod cli;
pub mod habit;
pub mod utils;
