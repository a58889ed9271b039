//! Command-line interface definition.

/// CLI argument parsing with clap.
pub mod args;

pub use args::Args;
