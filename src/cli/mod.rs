//! Command-line interface for naa-scout.
//!
//! Provides the `digest` and `headline` scans and the outermost reporting scope.

mod commands;

pub use commands::{build_config, parse_cli, run, run_with_cli, Cli, Commands, ScanArgs};
