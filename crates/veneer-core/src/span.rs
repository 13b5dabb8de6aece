//! The span tree: a rewritable mirror of one syntax subtree.
//!
//! A [`SpanTree`] is built fresh for each declaration being rendered. It
//! mirrors the declaration's [`SyntaxNode`] subtree 1:1 as a flat arena of
//! [`SpanNode`]s addressed by [`SpanId`], each owning a text range into the
//! original source buffer. Parent and previous-sibling back-references are
//! plain indices used for lookahead during rewriting, never for ownership.
//!
//! The tree never changes after construction; all rewrite state lives in a
//! parallel [`OverlaySet`](crate::overlay::OverlaySet).

use crate::syntax::{NodeId, SyntaxKind, SyntaxNode, TextRange};

/// Index of one span within a [`SpanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(u32);

impl SpanId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One node of a span tree.
#[derive(Debug)]
pub struct SpanNode {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Identity of the mirrored syntax node.
    pub node: NodeId,
    pub children: Vec<SpanId>,
    pub parent: Option<SpanId>,
    pub previous_sibling: Option<SpanId>,
}

/// An arena of spans mirroring one syntax subtree, over a shared immutable
/// source buffer.
///
/// The root span is always [`SpanTree::root`], and spans are stored in
/// depth-first pre-order, so a subtree occupies a contiguous id range.
#[derive(Debug)]
pub struct SpanTree<'src> {
    source: &'src str,
    spans: Vec<SpanNode>,
}

impl<'src> SpanTree<'src> {
    /// Mirror the subtree rooted at `node` over `source`.
    pub fn build(source: &'src str, node: &SyntaxNode) -> Self {
        let mut tree = Self {
            source,
            spans: Vec::new(),
        };
        tree.add(node, None, None);
        tree
    }

    fn add(
        &mut self,
        node: &SyntaxNode,
        parent: Option<SpanId>,
        previous_sibling: Option<SpanId>,
    ) -> SpanId {
        let id = SpanId::new(self.spans.len());
        self.spans.push(SpanNode {
            kind: node.kind,
            range: node.range,
            node: node.id,
            children: Vec::new(),
            parent,
            previous_sibling,
        });

        let mut previous = None;
        for child in &node.children {
            let child_id = self.add(child, Some(id), previous);
            self.spans[id.index()].children.push(child_id);
            previous = Some(child_id);
        }

        id
    }

    /// The root span (the mirrored declaration node itself).
    pub fn root(&self) -> SpanId {
        SpanId::new(0)
    }

    /// Number of spans in the arena.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, id: SpanId) -> &SpanNode {
        &self.spans[id.index()]
    }

    pub fn kind(&self, id: SpanId) -> SyntaxKind {
        self.get(id).kind
    }

    /// The full original text covered by a span, children included.
    pub fn text(&self, id: SpanId) -> &'src str {
        let range = self.get(id).range;
        &self.source[range.start..range.end]
    }

    /// Slice the underlying source buffer directly.
    pub fn slice(&self, range: TextRange) -> &'src str {
        &self.source[range.start..range.end]
    }

    /// Walk previous siblings of `id` (nearest first) until `predicate`
    /// matches.
    pub fn find_previous_sibling(
        &self,
        id: SpanId,
        predicate: impl Fn(&SpanNode) -> bool,
    ) -> Option<SpanId> {
        let mut current = self.get(id).previous_sibling;
        while let Some(sibling) = current {
            if predicate(self.get(sibling)) {
                return Some(sibling);
            }
            current = self.get(sibling).previous_sibling;
        }
        None
    }

    /// All span ids in depth-first pre-order.
    pub fn ids(&self) -> impl Iterator<Item = SpanId> {
        (0..self.spans.len()).map(SpanId::new)
    }
}
