//! Declarations and their visibility metadata.
//!
//! A [`Declaration`] is a named construct (class, interface, enum,
//! namespace, type alias, function, variable, or a member of one of these)
//! produced by the frontend, linked to the syntax node it was parsed from.
//! The engine consumes declarations read-only; all rewrite state lives in
//! span overlays.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stability::ReleaseTag;
use crate::syntax::NodeId;

/// Index of one declaration within a surface model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub u32);

impl DeclarationId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Category of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    Namespace,
    TypeAlias,
    Function,
    Variable,
    Method,
    Property,
}

/// Source-level modifier flags that affect filtering.
///
/// Formatting-only modifiers (`abstract`, `readonly`, ...) stay in the
/// source text and never appear here; only `private` changes inclusion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub private: bool,
}

/// Visibility and documentation metadata for one declaration, computed by
/// the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationMetadata {
    /// The declaration's own release tag. `None` means "same as parent":
    /// the effective tag is inherited from the nearest tagged ancestor.
    #[serde(default)]
    pub release_tag: Option<ReleaseTag>,

    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub event_property: bool,

    /// A deprecation note is attached to this declaration.
    #[serde(default)]
    pub deprecated: bool,

    /// A documentation comment is attached to this declaration.
    #[serde(default)]
    pub documented: bool,

    /// The declaration is trusted and intentionally opaque: its body is
    /// collapsed to a marker instead of rendered in full.
    #[serde(default)]
    pub preapproved: bool,

    /// A synthetic or ancillary sibling of a primary declaration. Tag and
    /// marker lines are only emitted for the primary.
    #[serde(default)]
    pub ancillary: bool,
}

/// One named declaration in the library, linked to its syntax node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Local name of the declaration.
    pub name: String,
    pub kind: DeclarationKind,
    /// The syntax node this declaration was parsed from.
    pub node: NodeId,
    /// Originating file, used for error and message context.
    pub file: String,
    #[serde(default)]
    pub parent: Option<DeclarationId>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub metadata: DeclarationMetadata,
}

/// Read-only lookup structure over a model's declarations.
///
/// Declarations arrive as a flat list with parent links; this derives the
/// child lists and the node-to-declaration join the rewrite policy needs.
#[derive(Debug)]
pub struct DeclarationSet<'a> {
    declarations: &'a [Declaration],
    children: Vec<Vec<DeclarationId>>,
    by_node: HashMap<NodeId, DeclarationId>,
}

impl<'a> DeclarationSet<'a> {
    pub fn new(declarations: &'a [Declaration]) -> Self {
        let mut children = vec![Vec::new(); declarations.len()];
        let mut by_node = HashMap::new();

        for (index, declaration) in declarations.iter().enumerate() {
            let id = DeclarationId(index as u32);
            by_node.insert(declaration.node, id);
            if let Some(parent) = declaration.parent {
                children[parent.index()].push(id);
            }
        }

        Self {
            declarations,
            children,
            by_node,
        }
    }

    pub fn get(&self, id: DeclarationId) -> &'a Declaration {
        &self.declarations[id.index()]
    }

    /// The declaration parsed from syntax node `node`, if any.
    pub fn by_node(&self, node: NodeId) -> Option<DeclarationId> {
        self.by_node.get(&node).copied()
    }

    pub fn children(&self, id: DeclarationId) -> &[DeclarationId] {
        &self.children[id.index()]
    }

    /// The effective release tag of `id`: its own tag, or the nearest
    /// tagged ancestor's, defaulting to [`ReleaseTag::Public`].
    pub fn effective_release_tag(&self, id: DeclarationId) -> ReleaseTag {
        let mut current = Some(id);
        while let Some(declaration_id) = current {
            let declaration = self.get(declaration_id);
            if let Some(tag) = declaration.metadata.release_tag {
                return tag;
            }
            current = declaration.parent;
        }
        ReleaseTag::Public
    }

    /// The effective release tag a child of `id` would inherit if it
    /// carried no tag of its own.
    pub fn inherited_release_tag(&self, id: DeclarationId) -> ReleaseTag {
        match self.get(id).parent {
            Some(parent) => self.effective_release_tag(parent),
            None => ReleaseTag::Public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(
        name: &str,
        kind: DeclarationKind,
        node: u32,
        parent: Option<DeclarationId>,
        tag: Option<ReleaseTag>,
    ) -> Declaration {
        Declaration {
            name: name.to_string(),
            kind,
            node: NodeId(node),
            file: "src/index".to_string(),
            parent,
            modifiers: Modifiers::default(),
            metadata: DeclarationMetadata {
                release_tag: tag,
                ..DeclarationMetadata::default()
            },
        }
    }

    #[test]
    fn test_children_derived_from_parent_links() {
        let declarations = vec![
            declaration("Widget", DeclarationKind::Class, 0, None, None),
            declaration(
                "render",
                DeclarationKind::Method,
                1,
                Some(DeclarationId(0)),
                None,
            ),
            declaration(
                "dispose",
                DeclarationKind::Method,
                2,
                Some(DeclarationId(0)),
                None,
            ),
        ];
        let set = DeclarationSet::new(&declarations);

        assert_eq!(
            set.children(DeclarationId(0)),
            &[DeclarationId(1), DeclarationId(2)]
        );
        assert!(set.children(DeclarationId(1)).is_empty());
    }

    #[test]
    fn test_by_node_join() {
        let declarations = vec![declaration("Widget", DeclarationKind::Class, 7, None, None)];
        let set = DeclarationSet::new(&declarations);

        assert_eq!(set.by_node(NodeId(7)), Some(DeclarationId(0)));
        assert_eq!(set.by_node(NodeId(8)), None);
    }

    #[test]
    fn test_effective_tag_inherited_from_ancestor() {
        let declarations = vec![
            declaration(
                "Widget",
                DeclarationKind::Class,
                0,
                None,
                Some(ReleaseTag::Beta),
            ),
            declaration(
                "render",
                DeclarationKind::Method,
                1,
                Some(DeclarationId(0)),
                None,
            ),
        ];
        let set = DeclarationSet::new(&declarations);

        assert_eq!(
            set.effective_release_tag(DeclarationId(1)),
            ReleaseTag::Beta
        );
    }

    #[test]
    fn test_effective_tag_defaults_to_public() {
        let declarations = vec![declaration("Widget", DeclarationKind::Class, 0, None, None)];
        let set = DeclarationSet::new(&declarations);

        assert_eq!(
            set.effective_release_tag(DeclarationId(0)),
            ReleaseTag::Public
        );
    }

    #[test]
    fn test_own_tag_overrides_ancestor() {
        let declarations = vec![
            declaration(
                "Widget",
                DeclarationKind::Class,
                0,
                None,
                Some(ReleaseTag::Public),
            ),
            declaration(
                "experimental",
                DeclarationKind::Method,
                1,
                Some(DeclarationId(0)),
                Some(ReleaseTag::Alpha),
            ),
        ];
        let set = DeclarationSet::new(&declarations);

        assert_eq!(
            set.effective_release_tag(DeclarationId(1)),
            ReleaseTag::Alpha
        );
        assert_eq!(
            set.inherited_release_tag(DeclarationId(1)),
            ReleaseTag::Public
        );
    }
}
