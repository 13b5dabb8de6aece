//! Exported entities: the symbols a report iterates over.
//!
//! An [`ExportedEntity`] groups one underlying symbol's declarations with
//! the set of names it is exported under and the single canonical name it
//! is emitted as. The report always renders the canonical name, no matter
//! how many local aliases reference the symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::declaration::DeclarationId;

/// Index of one entity within a surface model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Where an entity's definition comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum EntitySource {
    /// Declared in the library being reported on.
    Local,

    /// Imported from an external package; the report emits an import
    /// statement for it.
    Import {
        /// Module specifier of the external package.
        module: String,
        /// Name the symbol is exported under in that package. `None` for a
        /// default import.
        exported_as: Option<String>,
    },

    /// An alias for an entire local module, rendered as a synthetic
    /// namespace block.
    ModuleAlias(ModuleAlias),
}

/// A re-exported module alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAlias {
    /// Path of the aliased local module, used in error context.
    pub module: String,

    /// Local names the aliased module re-exports, in declaration order.
    #[serde(default)]
    pub exported_locals: Vec<String>,

    /// External modules the aliased module wildcard re-exports. A non-empty
    /// list is fatal: a wildcard cannot be flattened into a static name
    /// list.
    #[serde(default)]
    pub wildcard_reexports: Vec<String>,
}

/// One exportable symbol of the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEntity {
    /// The single canonical name this entity is rendered under. Required
    /// for every consumable entity; its absence is a fatal input error.
    #[serde(default)]
    pub name_for_emit: Option<String>,

    /// Names this entity is exported under, in export order.
    #[serde(default)]
    pub export_names: Vec<String>,

    /// The entity's declarations, in merge order.
    #[serde(default)]
    pub declarations: Vec<DeclarationId>,

    /// Emit `export` on the declaration itself instead of a separate
    /// export clause.
    #[serde(default)]
    pub should_inline_export: bool,

    /// Whether the entity appears in the report at all.
    #[serde(default)]
    pub consumable: bool,

    #[serde(default = "EntitySource::local")]
    pub source: EntitySource,
}

impl EntitySource {
    fn local() -> Self {
        EntitySource::Local
    }
}

impl ExportedEntity {
    /// The canonical emission name, if assigned.
    pub fn name_for_emit(&self) -> Option<&str> {
        self.name_for_emit.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_source_default_is_local() {
        let json = r#"{ "nameForEmit": "Widget", "consumable": true }"#;
        let entity: ExportedEntity = serde_json::from_str(json).unwrap();

        assert!(matches!(entity.source, EntitySource::Local));
        assert_eq!(entity.name_for_emit(), Some("Widget"));
        assert!(entity.export_names.is_empty());
    }

    #[test]
    fn test_module_alias_round_trip() {
        let alias = ModuleAlias {
            module: "./widgets".to_string(),
            exported_locals: vec!["Widget".to_string(), "Gadget".to_string()],
            wildcard_reexports: Vec::new(),
        };
        let json = serde_json::to_string(&EntitySource::ModuleAlias(alias)).unwrap();
        let back: EntitySource = serde_json::from_str(&json).unwrap();

        match back {
            EntitySource::ModuleAlias(alias) => {
                assert_eq!(alias.module, "./widgets");
                assert_eq!(alias.exported_locals.len(), 2);
            }
            other => panic!("expected module alias, got {other:?}"),
        }
    }
}
