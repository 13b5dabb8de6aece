//! Resolved syntax-tree nodes consumed by the rewrite engine.
//!
//! The engine never parses source text itself. A compiler frontend supplies
//! a fully resolved tree of [`SyntaxNode`]s over one immutable source
//! buffer, and the engine only reads it. Each node carries a [`SyntaxKind`],
//! a byte range into the buffer, and an identity [`NodeId`] that external
//! collaborators (declarations, symbol resolutions) use to refer back to a
//! specific occurrence.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one syntax node within a surface model.
///
/// Ids are assigned by the frontend and must be unique across the whole
/// tree; the engine uses them to join nodes with declarations and symbol
/// resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A `[start, end)` byte range into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a new range. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted text range {start}..{end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `other` lies entirely within this range.
    pub fn contains(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Category of a syntax node.
///
/// The rewrite policy dispatches on this tag with a single exhaustive
/// match, so adding a kind forces every rule table to acknowledge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyntaxKind {
    // Declarations.
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    NamespaceDeclaration,
    TypeAliasDeclaration,
    FunctionDeclaration,
    MethodDeclaration,
    PropertyDeclaration,
    EnumMember,
    VariableStatement,
    VariableDeclarator,

    // Modifiers.
    ModifierList,
    ExportKeyword,
    DeclareKeyword,
    DefaultKeyword,

    /// The keyword introducing a declaration (`class`, `interface`, `enum`,
    /// `namespace`, `type`, `function`).
    DeclarationKeyword,

    /// A brace-enclosed ordered list of member declarations, directly
    /// inside a declaration or namespace body.
    MemberList,

    /// An inline type literal (an anonymous structural type shape).
    TypeLiteral,

    /// An import-like type reference naming another module.
    ImportTypeReference,

    Identifier,

    /// Any other token: punctuation, literals, operators.
    Token,

    /// A generic interior node with no rewrite behavior of its own.
    Fragment,
}

impl SyntaxKind {
    /// Returns `true` for kinds that introduce a named declaration the
    /// visibility filter and sibling sorter operate on.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::NamespaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::EnumMember
                | SyntaxKind::VariableDeclarator
        )
    }

    /// Returns `true` for modifier keywords the engine always strips and
    /// re-synthesizes itself.
    pub fn is_stripped_modifier(&self) -> bool {
        matches!(
            self,
            SyntaxKind::ExportKeyword | SyntaxKind::DeclareKeyword | SyntaxKind::DefaultKeyword
        )
    }
}

/// One node of the resolved syntax tree.
///
/// Child ranges must be disjoint, in source order, and nested within the
/// parent range; [`NodeIndex::build`] checks this in debug builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: SyntaxKind,
    pub range: TextRange,
    #[serde(default)]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a childless node.
    pub fn leaf(id: NodeId, kind: SyntaxKind, range: impl Into<TextRange>) -> Self {
        Self {
            id,
            kind,
            range: range.into(),
            children: Vec::new(),
        }
    }

    /// Create an interior node with the given children.
    pub fn new(
        id: NodeId,
        kind: SyntaxKind,
        range: impl Into<TextRange>,
        children: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            id,
            kind,
            range: range.into(),
            children,
        }
    }
}

/// Lookup structure over one syntax tree.
///
/// Maps node ids back to their nodes and records each node's parent, which
/// the rewrite policy needs for lookahead (e.g. finding the variable
/// statement enclosing a declarator).
#[derive(Debug)]
pub struct NodeIndex<'a> {
    nodes: HashMap<NodeId, &'a SyntaxNode>,
    parents: HashMap<NodeId, NodeId>,
}

impl<'a> NodeIndex<'a> {
    /// Walk `root` and index every node it contains.
    pub fn build(root: &'a SyntaxNode) -> Self {
        let mut index = Self {
            nodes: HashMap::new(),
            parents: HashMap::new(),
        };
        index.visit(root, None);
        index
    }

    fn visit(&mut self, node: &'a SyntaxNode, parent: Option<NodeId>) {
        self.nodes.insert(node.id, node);
        if let Some(parent) = parent {
            self.parents.insert(node.id, parent);
        }

        let mut previous_end = node.range.start;
        for child in &node.children {
            debug_assert!(
                node.range.contains(child.range),
                "child {} escapes parent {} range",
                child.id,
                node.id
            );
            debug_assert!(
                child.range.start >= previous_end,
                "child {} overlaps its predecessor",
                child.id
            );
            previous_end = child.range.end;

            self.visit(child, Some(node.id));
        }
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        self.nodes.get(&id).copied()
    }

    /// The parent of `id`, if it is not the root.
    pub fn parent(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        self.parents.get(&id).and_then(|parent| self.get(*parent))
    }

    /// Walk ancestors of `id` (nearest first) until `predicate` matches.
    pub fn find_ancestor(
        &self,
        id: NodeId,
        predicate: impl Fn(&SyntaxNode) -> bool,
    ) -> Option<&'a SyntaxNode> {
        let mut current = self.parent(id)?;
        loop {
            if predicate(current) {
                return Some(current);
            }
            current = self.parent(current.id)?;
        }
    }
}
