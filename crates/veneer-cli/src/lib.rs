//! CLI logic for the Veneer API report generator.
//!
//! This module contains the core CLI logic for the Veneer report tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::info;

use veneer::stability::TrimLevel;
use veneer::{ReportBuilder, VeneerError, reports_equivalent};

/// Run the Veneer CLI application
///
/// Loads the surface model, generates the report, and either writes it to
/// the output path or (in `--check` mode) compares it with the existing
/// report file.
///
/// # Errors
///
/// Returns `VeneerError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Surface model parse errors
/// - Report generation errors
/// - An out-of-date report in `--check` mode
pub fn run(args: &Args) -> Result<(), VeneerError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        check = args.check;
        "Generating API report"
    );

    let mut report_config = config::load_config(args.config.as_ref())?;
    if let Some(value) = &args.trim_level {
        let level: TrimLevel = value.parse()?;
        report_config.set_trim_level(level);
    }

    let model = veneer::load_model(&args.input)?;

    let builder = ReportBuilder::new(report_config);
    let report = builder.generate(&model)?;

    if args.check {
        let existing = match fs::read_to_string(&args.output) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };
        if !reports_equivalent(&report, &existing) {
            return Err(VeneerError::ReportOutOfDate {
                path: args.output.clone(),
            });
        }
        info!(output_file = args.output; "API report is up to date");
        return Ok(());
    }

    fs::write(&args.output, report)?;

    info!(output_file = args.output; "API report written");

    Ok(())
}
