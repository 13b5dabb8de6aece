//! Command-line argument definitions for the Veneer CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the trim level, change detection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Veneer API report generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the surface model JSON file
    #[arg(help = "Path to the surface model file")]
    pub input: String,

    /// Path to the output report file
    #[arg(short, long, default_value = "api-report.md")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Trim level override (untrimmed, alpha, beta, public)
    #[arg(long)]
    pub trim_level: Option<String>,

    /// Compare against the existing report instead of writing; fails when
    /// the API surface changed
    #[arg(long)]
    pub check: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
