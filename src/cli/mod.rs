//! Command-line interface
//!
//! Argument parsing with clap and thin handlers that wire the export
//! pipeline together. Handlers print user-facing summaries on stdout and
//! return errors for the binary to report on stderr.

pub mod commands;

pub use commands::{run, Cli, Commands};
