//! Veneer - deterministic API surface reports from resolved declarations.
//!
//! Rewriting, filtering, and serialization for API surface reports. A
//! frontend supplies a fully resolved [`SurfaceModel`]; the engine renders
//! a diffable report of the library's public surface at a configurable
//! stability threshold.

pub mod config;
pub mod policy;
pub mod resolver;

mod diagnostics;
mod error;
mod filter;
mod report;
mod synopsis;
mod writer;

pub use veneer_core::{declaration, entity, message, model, overlay, span, stability, syntax};

pub use diagnostics::DiagnosticRouter;
pub use error::VeneerError;
pub use report::reports_equivalent;

use std::fs;
use std::path::Path;

use log::{debug, info};

use veneer_core::model::SurfaceModel;

use config::ReportConfig;
use policy::RewriteImportType;

/// Builder for generating API surface reports.
///
/// # Examples
///
/// ```rust,no_run
/// use veneer::{ReportBuilder, config::ReportConfig};
///
/// let model = veneer::load_model("surface.json")
///     .expect("Failed to load surface model");
///
/// let builder = ReportBuilder::new(ReportConfig::default());
/// let report = builder.generate(&model)
///     .expect("Failed to generate report");
///
/// // Or use default config
/// let builder = ReportBuilder::default();
/// ```
#[derive(Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate the report document for `model`.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError`] when the model violates an input invariant:
    /// a missing canonical emission name, a declaration lookup failure, or
    /// a wildcard re-export inside an aliased module.
    pub fn generate(&self, model: &SurfaceModel) -> Result<String, VeneerError> {
        report::generate_report(model, &self.config, None)
    }

    /// Generate the report with an import-reference rewriting
    /// collaborator, used when cross-module type references need custom
    /// handling.
    pub fn generate_with_imports(
        &self,
        model: &SurfaceModel,
        import_rewriter: &dyn RewriteImportType,
    ) -> Result<String, VeneerError> {
        report::generate_report(model, &self.config, Some(import_rewriter))
    }

    /// Whether `model` still matches a previously generated report.
    ///
    /// Uses whitespace-insensitive equivalence, so reflowed or re-wrapped
    /// reports do not register as changes.
    pub fn is_up_to_date(
        &self,
        model: &SurfaceModel,
        existing_report: &str,
    ) -> Result<bool, VeneerError> {
        let fresh = self.generate(model)?;
        Ok(reports_equivalent(&fresh, existing_report))
    }
}

/// Load a surface model from a JSON file.
///
/// # Errors
///
/// Returns `VeneerError::Io` when the file cannot be read and
/// `VeneerError::Model` when it does not deserialize as a surface model.
pub fn load_model(path: impl AsRef<Path>) -> Result<SurfaceModel, VeneerError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading surface model");

    let text = fs::read_to_string(path)?;
    let model: SurfaceModel = serde_json::from_str(&text)?;

    debug!(
        package = model.package_name,
        declarations = model.declarations.len(),
        entities = model.entities.len();
        "Surface model loaded"
    );
    Ok(model)
}
