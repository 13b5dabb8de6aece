//! Synopsis blocks: the leading annotation comments for a declaration.
//!
//! A synopsis summarizes what a reviewer needs to know about one
//! declaration: the analysis messages attached to it, its stability tag
//! when it deviates from its surroundings, and its lint-style markers.
//! The lines returned here carry no comment punctuation; callers render
//! them as `//` line comments at the right indentation.

use veneer_core::declaration::{DeclarationId, DeclarationSet};
use veneer_core::stability::ReleaseTag;

use crate::diagnostics::DiagnosticRouter;

/// Build the synopsis lines for `id`, consuming its routed messages.
///
/// Emits, in order: one line per associated message; a blank separator
/// line; then a single marker line. The marker line contains the release
/// tag (only when the declaration carries its own tag that differs from
/// what it would inherit and is not the public default), `@sealed`,
/// `@virtual`, `@override`, `@eventProperty`, `@deprecated`, and
/// `(undocumented)`.
///
/// Rendering `(undocumented)` additionally raises a missing-documentation
/// finding on the router — this is how missing documentation is
/// discovered, rather than being precomputed upstream.
///
/// Ancillary sibling declarations get messages only, never markers.
pub fn synopsis_lines(
    declarations: &DeclarationSet<'_>,
    id: DeclarationId,
    router: &mut DiagnosticRouter,
) -> Vec<String> {
    let mut lines = router.take_for_declaration(id);

    let declaration = declarations.get(id);
    let metadata = &declaration.metadata;
    if metadata.ancillary {
        return lines;
    }

    let mut markers: Vec<&str> = Vec::new();
    if let Some(tag) = metadata.release_tag {
        if tag != declarations.inherited_release_tag(id) && tag != ReleaseTag::Public {
            markers.push(tag.as_str());
        }
    }
    if metadata.sealed {
        markers.push("@sealed");
    }
    if metadata.is_virtual {
        markers.push("@virtual");
    }
    if metadata.is_override {
        markers.push("@override");
    }
    if metadata.event_property {
        markers.push("@eventProperty");
    }
    if metadata.deprecated {
        markers.push("@deprecated");
    }
    if !metadata.documented {
        markers.push("(undocumented)");
        router.report_undocumented(&declaration.name, &declaration.file);
    }

    if !markers.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(markers.join(" "));
    }

    lines
}
