//! Analysis messages routed into the report.
//!
//! Frontends attach lint-style messages to declarations or to individual
//! export names; the report renders each message as a comment line next to
//! the construct it belongs to, and collects the leftovers in a trailing
//! block.

use serde::{Deserialize, Serialize};

use crate::declaration::DeclarationId;
use crate::entity::EntityId;

/// What a message is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MessageAssociation {
    /// No association; rendered in the trailing block of the report.
    None,

    /// Attached to one declaration; rendered in its synopsis.
    Declaration { declaration: DeclarationId },

    /// Attached to one export name of an entity; rendered immediately
    /// above that export clause.
    ExportName { entity: EntityId, name: String },
}

impl Default for MessageAssociation {
    fn default() -> Self {
        MessageAssociation::None
    }
}

/// One lint-style message produced during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMessage {
    /// Free-form message text, already formatted for display.
    pub text: String,

    #[serde(default)]
    pub association: MessageAssociation,
}

impl ApiMessage {
    /// A message with no association.
    pub fn unassociated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            association: MessageAssociation::None,
        }
    }

    /// A message attached to a declaration.
    pub fn for_declaration(text: impl Into<String>, declaration: DeclarationId) -> Self {
        Self {
            text: text.into(),
            association: MessageAssociation::Declaration { declaration },
        }
    }

    /// A message attached to one export name of an entity.
    pub fn for_export_name(
        text: impl Into<String>,
        entity: EntityId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            association: MessageAssociation::ExportName {
                entity,
                name: name.into(),
            },
        }
    }
}
