//! Command-line plumbing: argument parsing, usage text, display level.

pub mod args;
pub mod constants;
pub mod help;
