//! CLI subcommand implementations.

pub mod check;
pub mod overlap;
