//! Error adapter for converting VeneerError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use veneer::VeneerError;

/// Adapter wrapping a [`VeneerError`] for miette rendering.
///
/// Report generation errors carry their location context (declaration name
/// and originating file) in the message itself, so the adapter only
/// contributes a stable error code and, where useful, a help line.
pub struct ErrorAdapter<'a>(pub &'a VeneerError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VeneerError::Io(_) => "veneer::io",
            VeneerError::Model(_) => "veneer::model",
            VeneerError::TrimLevel(_) | VeneerError::Config(_) => "veneer::config",
            VeneerError::MissingEmitName { .. } => "veneer::missing_emit_name",
            VeneerError::UnknownEntity { .. } => "veneer::unknown_entity",
            VeneerError::WildcardReExport { .. } => "veneer::wildcard_reexport",
            VeneerError::DeclarationLookup { .. }
            | VeneerError::MissingSyntaxNode { .. }
            | VeneerError::DetachedDeclarator { .. } => "veneer::internal",
            VeneerError::ReportOutOfDate { .. } => "veneer::report_out_of_date",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match &self.0 {
            VeneerError::WildcardReExport { .. } => {
                "replace the wildcard re-export with named exports so the \
                 namespace block can be flattened"
            }
            VeneerError::ReportOutOfDate { .. } => {
                "run again without --check to regenerate the report"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
