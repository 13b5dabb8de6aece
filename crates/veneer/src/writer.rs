//! The span writer: serializes a span tree honoring its overlays.
//!
//! Rendering walks the tree recursively. For each span it emits the
//! overlay prefix, then the span's own text (the parts of its range not
//! covered by children) interleaved with its children in their current
//! order, then the overlay suffix. The own text between two child slots is
//! the *separator* for the child occupying the earlier slot; it stays tied
//! to the slot even when children are reordered, and is dropped when the
//! occupying child sets `omit_following_separator`. The separator after
//! the last slot is the parent's closing text and is never dropped.
//!
//! A skipped subtree gives up one adjacent separator as well: the one
//! before it, or for a run of skipped occupants at the head of the list
//! (where the preceding text is the parent's opening text) the one after,
//! so exclusions leave no stray gaps.
//!
//! The defining correctness property: a tree whose overlays are all
//! default renders back to the original source byte-for-byte.

use veneer_core::overlay::OverlaySet;
use veneer_core::span::{SpanId, SpanTree};
use veneer_core::syntax::TextRange;

/// Render `tree` from its root with the given overlays.
pub fn render(tree: &SpanTree<'_>, overlays: &OverlaySet) -> String {
    let mut out = String::new();
    render_span(tree, overlays, tree.root(), &mut out);
    out
}

fn render_span(tree: &SpanTree<'_>, overlays: &OverlaySet, id: SpanId, out: &mut String) {
    let overlay = overlays.get(id);
    if overlay.skip_subtree {
        return;
    }

    out.push_str(&overlay.prefix);

    let span = tree.get(id);
    let slots = &span.children;
    if slots.is_empty() {
        if !overlay.skip_own_text {
            out.push_str(tree.text(id));
        }
    } else {
        let order = render_order(tree, overlays, id);
        let mut cursor = span.range.start;
        let mut separator_omitted = false;
        let mut at_list_start = true;

        for (slot, occupant) in slots.iter().zip(order.iter()) {
            let slot_range = tree.get(*slot).range;
            let vanishes = overlays.get(*occupant).skip_subtree;
            let suppress = separator_omitted || (vanishes && !at_list_start);
            if !overlay.skip_own_text && !suppress {
                out.push_str(tree.slice(TextRange::new(cursor, slot_range.start)));
            }
            render_span(tree, overlays, *occupant, out);

            cursor = slot_range.end;
            if vanishes {
                // A skipped run at the head of the list keeps the opening
                // text and drops the run's following separator; anywhere
                // else the preceding separator was dropped instead.
                separator_omitted = at_list_start;
            } else {
                separator_omitted = overlays.get(*occupant).omit_following_separator;
                at_list_start = false;
            }
        }

        // Closing own text after the last slot; never subject to
        // separator omission.
        if !overlay.skip_own_text {
            out.push_str(tree.slice(TextRange::new(cursor, span.range.end)));
        }
    }

    out.push_str(&overlay.suffix);
}

/// The order children are rendered in: original order, or — when the
/// parent requests sorting — keyed children stable-sorted among
/// themselves while keyless children stay fixed in their slots.
fn render_order(tree: &SpanTree<'_>, overlays: &OverlaySet, id: SpanId) -> Vec<SpanId> {
    let slots = &tree.get(id).children;
    if !overlays.get(id).sort_children {
        return slots.clone();
    }

    let mut sortable: Vec<SpanId> = slots
        .iter()
        .copied()
        .filter(|child| overlays.get(*child).sort_key.is_some())
        .collect();
    sortable.sort_by(|a, b| overlays.get(*a).sort_key.cmp(&overlays.get(*b).sort_key));

    let mut next_sorted = 0;
    slots
        .iter()
        .map(|slot| {
            if overlays.get(*slot).sort_key.is_some() && next_sorted < sortable.len() {
                let occupant = sortable[next_sorted];
                next_sorted += 1;
                occupant
            } else {
                *slot
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use veneer_core::syntax::{NodeId, SyntaxKind, SyntaxNode};

    // `export class Widget { alpha; beta; }` shaped tree with the members
    // as sortable children of the member list.
    fn class_tree() -> (String, SyntaxNode) {
        let source = "export class Widget { alpha; beta; }".to_string();
        let node = SyntaxNode::new(
            NodeId(0),
            SyntaxKind::ClassDeclaration,
            0..36,
            vec![
                SyntaxNode::leaf(NodeId(1), SyntaxKind::ExportKeyword, 0..6),
                SyntaxNode::leaf(NodeId(2), SyntaxKind::DeclarationKeyword, 7..12),
                SyntaxNode::leaf(NodeId(3), SyntaxKind::Identifier, 13..19),
                SyntaxNode::new(
                    NodeId(4),
                    SyntaxKind::MemberList,
                    20..36,
                    vec![
                        SyntaxNode::leaf(NodeId(5), SyntaxKind::PropertyDeclaration, 22..28),
                        SyntaxNode::leaf(NodeId(6), SyntaxKind::PropertyDeclaration, 29..34),
                    ],
                ),
            ],
        );
        (source, node)
    }

    #[test]
    fn test_identity_render() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let overlays = OverlaySet::new(tree.len());

        assert_eq!(render(&tree, &overlays), source);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        overlays.get_mut(tree.root()).prefix = ">>".to_string();
        overlays.get_mut(tree.root()).suffix = "<<".to_string();

        assert_eq!(render(&tree, &overlays), format!(">>{source}<<"));
    }

    #[test]
    fn test_skip_own_text_keeps_children() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let member_list = tree.get(tree.root()).children[3];
        overlays.get_mut(member_list).skip_own_text = true;

        // Braces and inner separators vanish; the members remain.
        assert_eq!(render(&tree, &overlays), "export class Widget alpha;beta;");
    }

    #[test]
    fn test_skip_subtree_removes_everything() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let member_list = tree.get(tree.root()).children[3];
        overlays.get_mut(member_list).skip_subtree = true;
        overlays.get_mut(member_list).prefix = "ignored".to_string();

        // Prefix is not emitted for a skipped subtree, and the separator
        // before it is dropped with it.
        assert_eq!(render(&tree, &overlays), "export class Widget");
    }

    #[test]
    fn test_skipped_last_child_drops_preceding_separator() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let member_list = tree.get(tree.root()).children[3];
        let members = tree.get(member_list).children.clone();
        overlays.get_mut(members[1]).skip_subtree = true;

        // No stray gap between the surviving member and the closing text.
        assert_eq!(render(&tree, &overlays), "export class Widget { alpha; }");
    }

    #[test]
    fn test_skipped_first_child_keeps_opening_text() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let member_list = tree.get(tree.root()).children[3];
        let members = tree.get(member_list).children.clone();
        overlays.get_mut(members[0]).skip_subtree = true;

        // The opening brace survives; the separator after the skipped
        // run is dropped instead.
        assert_eq!(render(&tree, &overlays), "export class Widget { beta; }");
    }

    #[test]
    fn test_strip_keyword_with_separator() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let export_keyword = tree.get(tree.root()).children[0];
        overlays.get_mut(export_keyword).skip_own_text = true;
        overlays.get_mut(export_keyword).omit_following_separator = true;

        assert_eq!(render(&tree, &overlays), "class Widget { alpha; beta; }");
    }

    #[test]
    fn test_sorted_children_keep_slot_separators() {
        let (source, node) = class_tree();
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        let member_list = tree.get(tree.root()).children[3];
        let members = tree.get(member_list).children.clone();
        overlays.get_mut(member_list).sort_children = true;
        overlays.get_mut(members[0]).sort_key = Some("beta".to_string());
        overlays.get_mut(members[1]).sort_key = Some("alpha".to_string());

        // Members swap; the separator layout stays put.
        assert_eq!(
            render(&tree, &overlays),
            "export class Widget { beta; alpha; }"
        );
    }

    #[test]
    fn test_keyless_children_are_anchors() {
        let source = "( b, a )".to_string();
        let node = SyntaxNode::new(
            NodeId(0),
            SyntaxKind::Fragment,
            0..8,
            vec![
                SyntaxNode::leaf(NodeId(1), SyntaxKind::Token, 0..1),
                SyntaxNode::leaf(NodeId(2), SyntaxKind::Identifier, 2..3),
                SyntaxNode::leaf(NodeId(3), SyntaxKind::Identifier, 5..6),
                SyntaxNode::leaf(NodeId(4), SyntaxKind::Token, 7..8),
            ],
        );
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        overlays.get_mut(tree.root()).sort_children = true;
        let children = tree.get(tree.root()).children.clone();
        overlays.get_mut(children[1]).sort_key = Some("b".to_string());
        overlays.get_mut(children[2]).sort_key = Some("a".to_string());

        // Parens are anchors, identifiers reorder between them.
        assert_eq!(render(&tree, &overlays), "( a, b )");
    }

    #[test]
    fn test_stable_sort_on_equal_keys() {
        let source = "x y".to_string();
        let node = SyntaxNode::new(
            NodeId(0),
            SyntaxKind::Fragment,
            0..3,
            vec![
                SyntaxNode::leaf(NodeId(1), SyntaxKind::Identifier, 0..1),
                SyntaxNode::leaf(NodeId(2), SyntaxKind::Identifier, 2..3),
            ],
        );
        let tree = SpanTree::build(&source, &node);
        let mut overlays = OverlaySet::new(tree.len());
        overlays.get_mut(tree.root()).sort_children = true;
        let children = tree.get(tree.root()).children.clone();
        overlays.get_mut(children[0]).sort_key = Some("same".to_string());
        overlays.get_mut(children[1]).sort_key = Some("same".to_string());

        assert_eq!(render(&tree, &overlays), "x y");
    }

    // Strategy: a random source buffer partitioned into a random nested
    // tree, to exercise the identity property on arbitrary shapes.
    fn arbitrary_cuts(text_len: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
        // Random split points partition the buffer into leaf children;
        // uncovered stretches become the parent's own text.
        prop::collection::vec(0..=text_len, 0..6).prop_map(move |mut cuts| {
            cuts.sort_unstable();
            cuts.dedup();
            let mut ranges = Vec::new();
            let mut previous = 0;
            for cut in cuts {
                if cut > previous {
                    ranges.push((previous, cut));
                }
                previous = cut;
            }
            if previous < text_len {
                ranges.push((previous, text_len));
            }
            ranges
        })
    }

    proptest! {
        #[test]
        fn prop_identity_render(source in "[ -~]{0,40}", ranges in arbitrary_cuts(40)) {
            let len = source.len();
            let children: Vec<SyntaxNode> = ranges
                .iter()
                .filter(|(start, end)| *end <= len && *start < *end)
                .enumerate()
                .map(|(i, (start, end))| {
                    SyntaxNode::leaf(NodeId(i as u32 + 1), SyntaxKind::Token, *start..*end)
                })
                .collect();
            let root = SyntaxNode::new(NodeId(0), SyntaxKind::Fragment, 0..len, children);

            let tree = SpanTree::build(&source, &root);
            let overlays = OverlaySet::new(tree.len());
            prop_assert_eq!(render(&tree, &overlays), source);
        }
    }
}
