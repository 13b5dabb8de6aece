//! The visibility filter: which declarations appear in a report.
//!
//! Inclusion is decided from a declaration's *effective* release tag (its
//! own tag, or the nearest tagged ancestor's, defaulting to public) tested
//! against the report's trim level. A private modifier always excludes,
//! regardless of level.

use veneer_core::declaration::{DeclarationId, DeclarationSet};
use veneer_core::stability::TrimLevel;

/// Whether declaration `id` is included at `level`.
pub fn is_included(declarations: &DeclarationSet<'_>, id: DeclarationId, level: TrimLevel) -> bool {
    if declarations.get(id).modifiers.private {
        return false;
    }
    level.admits(declarations.effective_release_tag(id))
}
