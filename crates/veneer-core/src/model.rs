//! The self-contained input contract for one report.
//!
//! A [`SurfaceModel`] bundles everything the engine needs for one pass:
//! the source buffer, the resolved syntax tree, declarations with their
//! metadata, exported entities, identifier resolutions, and analysis
//! messages. Models are fully computed and immutable before a rewrite pass
//! starts, and discarded after serialization.

use serde::{Deserialize, Serialize};

use crate::declaration::Declaration;
use crate::entity::{EntityId, ExportedEntity};
use crate::message::ApiMessage;
use crate::syntax::{NodeId, SyntaxNode};

/// One identifier occurrence resolved to a tracked exported entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The identifier occurrence's syntax node.
    pub node: NodeId,
    /// The entity the occurrence refers to.
    pub entity: EntityId,
}

/// The fully resolved declaration model of one library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceModel {
    /// Name of the package being reported on.
    pub package_name: String,

    /// The immutable original-text buffer all ranges index into.
    pub source: String,

    /// Root of the resolved syntax tree over [`SurfaceModel::source`].
    pub root: SyntaxNode,

    /// All declarations, flat, with parent links.
    #[serde(default)]
    pub declarations: Vec<Declaration>,

    /// Exported entities in iteration order. Report ordering follows this
    /// order exactly.
    #[serde(default)]
    pub entities: Vec<ExportedEntity>,

    /// Identifier occurrences resolved to tracked entities.
    #[serde(default)]
    pub resolutions: Vec<Resolution>,

    /// External type/library directive references.
    #[serde(default)]
    pub directive_references: Vec<String>,

    /// Modules passed through as star exports.
    #[serde(default)]
    pub star_exports: Vec<String>,

    /// Messages produced during analysis.
    #[serde(default)]
    pub messages: Vec<ApiMessage>,

    /// Whether the package has a top-level documentation comment.
    #[serde(default)]
    pub package_documented: bool,
}

impl SurfaceModel {
    /// Look up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&ExportedEntity> {
        self.entities.get(id.index())
    }
}
