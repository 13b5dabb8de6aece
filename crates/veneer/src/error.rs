//! Error types for report generation.
//!
//! This module provides the main error type [`VeneerError`]. Fatal errors
//! indicate an upstream invariant violation or a broken configuration and
//! abort the whole report; recoverable findings (missing documentation,
//! deprecation notes) are never errors — they become comment lines in the
//! report itself.

use std::io;

use thiserror::Error;

use veneer_core::entity::EntityId;
use veneer_core::stability::TrimLevelParseError;
use veneer_core::syntax::NodeId;

/// The main error type for report generation.
///
/// Every variant that originates inside the rewrite engine carries enough
/// location context (declaration name and originating file) to be
/// actionable without consulting the engine's internals.
#[derive(Debug, Error)]
pub enum VeneerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse surface model: {0}")]
    Model(#[from] serde_json::Error),

    #[error(transparent)]
    TrimLevel(#[from] TrimLevelParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("entity `{entity}` has no canonical emission name")]
    MissingEmitName { entity: String },

    #[error("symbol resolution references unknown entity {entity}")]
    UnknownEntity { entity: EntityId },

    #[error(
        "namespace `{namespace}` re-exports all of external module `{module}`, \
         which cannot be flattened into a static export list"
    )]
    WildcardReExport { namespace: String, module: String },

    #[error("internal error: no declaration record for syntax node {node} inside `{name}` ({file})")]
    DeclarationLookup {
        node: NodeId,
        name: String,
        file: String,
    },

    #[error("syntax node {node} for declaration `{name}` ({file}) is missing from the syntax tree")]
    MissingSyntaxNode {
        node: NodeId,
        name: String,
        file: String,
    },

    #[error("declarator `{name}` ({file}) is not inside a variable statement")]
    DetachedDeclarator { name: String, file: String },

    #[error("API report {path} is out of date; regenerate it")]
    ReportOutOfDate { path: String },
}
