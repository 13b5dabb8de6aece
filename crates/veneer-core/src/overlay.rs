//! Modification overlays applied to spans during rewriting.
//!
//! The span tree itself is immutable once built; every rewrite decision is
//! expressed as a mutation of the [`Overlay`] record for a span. Overlays
//! live in an [`OverlaySet`] arena parallel to the [`SpanTree`] so the same
//! tree can be walked multiple times with different policies.
//!
//! [`SpanTree`]: crate::span::SpanTree

use crate::span::SpanId;

/// Per-span rewrite instructions.
///
/// A default overlay is a full passthrough: rendering a tree whose overlays
/// are all default reproduces the original text byte-for-byte.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    /// Suppress the span's own text. Children are still rendered unless
    /// [`Overlay::skip_subtree`] is also set.
    pub skip_own_text: bool,

    /// Suppress the span and everything nested inside it.
    pub skip_subtree: bool,

    /// Synthetic text emitted before the span's own text.
    pub prefix: String,

    /// Synthetic text emitted after the span's children and own text.
    pub suffix: String,

    /// Drop the original separator text that would normally follow this
    /// span, for when a synthetic suffix already supplies replacement
    /// punctuation or spacing.
    pub omit_following_separator: bool,

    /// Reorder this span's children by their sort keys.
    pub sort_children: bool,

    /// Sort key assigned by the parent when it requests reordering.
    /// Children without a key are fixed anchors that keep their position.
    pub sort_key: Option<String>,
}

impl Overlay {
    /// Prepend text before any previously assigned prefix.
    pub fn prepend(&mut self, text: &str) {
        self.prefix.insert_str(0, text);
    }
}

/// Arena of overlays addressed by [`SpanId`], one per span in a tree.
#[derive(Debug)]
pub struct OverlaySet {
    overlays: Vec<Overlay>,
}

impl OverlaySet {
    /// Create an all-default (full passthrough) overlay set for a tree of
    /// `len` spans.
    pub fn new(len: usize) -> Self {
        Self {
            overlays: vec![Overlay::default(); len],
        }
    }

    pub fn get(&self, id: SpanId) -> &Overlay {
        &self.overlays[id.index()]
    }

    pub fn get_mut(&mut self, id: SpanId) -> &mut Overlay {
        &mut self.overlays[id.index()]
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
