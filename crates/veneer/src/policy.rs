//! The rewrite policy: per-node-kind rules applied to a span tree.
//!
//! [`RewritePolicy::rewrite_declaration`] walks the span tree of one
//! declaration and mutates its overlay set: excluded declarations vanish,
//! modifier keywords are stripped and re-synthesized from entity state,
//! sibling member lists become sortable, identifiers whose target survives
//! the trim are renamed to their canonical emission names, and
//! multi-declarator statements are flattened into independent blocks. The
//! structural tree is never touched.
//!
//! The policy is stateless across declarations; the only mutable
//! collaborator is the [`DiagnosticRouter`], threaded through every call so
//! message collection happens exactly once per visited declaration.

use log::{debug, trace};

use veneer_core::declaration::{DeclarationId, DeclarationSet};
use veneer_core::entity::{EntityId, ExportedEntity};
use veneer_core::overlay::OverlaySet;
use veneer_core::span::{SpanId, SpanTree};
use veneer_core::stability::TrimLevel;
use veneer_core::syntax::{NodeIndex, SyntaxKind};

use crate::diagnostics::DiagnosticRouter;
use crate::error::VeneerError;
use crate::resolver::ResolveSymbol;
use crate::{filter, synopsis};

/// Context threaded down the recursive walk.
///
/// `inside_type_literal` is passed down, never stored: members of an
/// inline type literal get no synopsis comments and no sibling sorting.
#[derive(Debug, Clone, Copy)]
struct Ctx {
    entity: EntityId,
    declaration: DeclarationId,
    inside_type_literal: bool,
}

/// A capability handed to an [`RewriteImportType`] collaborator so it can
/// re-enter the recursive rewrite without a back-reference to the whole
/// policy.
pub struct Recurse<'r, 'a, 'm> {
    policy: &'r RewritePolicy<'a, 'm>,
    router: &'r mut DiagnosticRouter,
    ctx: Ctx,
}

impl Recurse<'_, '_, '_> {
    /// Continue the rewrite at `span` with the current context.
    pub fn rewrite(
        &mut self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
    ) -> Result<(), VeneerError> {
        self.policy.rewrite(tree, overlays, span, self.ctx, self.router)
    }
}

/// Rewrites import-like type references that name another module.
///
/// Cross-module resolution details live outside the policy; the
/// collaborator receives the recursive rewrite as a [`Recurse`] capability
/// for the parts of the subtree it does not handle itself.
pub trait RewriteImportType {
    fn rewrite_import_type(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
        recurse: &mut Recurse<'_, '_, '_>,
    ) -> Result<(), VeneerError>;
}

/// The per-node-kind rule table.
pub struct RewritePolicy<'a, 'm> {
    source: &'m str,
    nodes: &'a NodeIndex<'m>,
    declarations: &'a DeclarationSet<'m>,
    entities: &'m [ExportedEntity],
    resolver: &'a dyn ResolveSymbol,
    import_rewriter: Option<&'a dyn RewriteImportType>,
    trim_level: TrimLevel,
}

impl<'a, 'm> RewritePolicy<'a, 'm> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: &'m str,
        nodes: &'a NodeIndex<'m>,
        declarations: &'a DeclarationSet<'m>,
        entities: &'m [ExportedEntity],
        resolver: &'a dyn ResolveSymbol,
        import_rewriter: Option<&'a dyn RewriteImportType>,
        trim_level: TrimLevel,
    ) -> Self {
        Self {
            source,
            nodes,
            declarations,
            entities,
            resolver,
            import_rewriter,
            trim_level,
        }
    }

    /// Apply the full rule table to the declaration at the tree root.
    ///
    /// The caller has already decided the root declaration is included;
    /// its synopsis is emitted outside the rendered text.
    pub fn rewrite_declaration(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        entity: EntityId,
        declaration: DeclarationId,
        router: &mut DiagnosticRouter,
    ) -> Result<(), VeneerError> {
        let ctx = Ctx {
            entity,
            declaration,
            inside_type_literal: false,
        };
        if tree.kind(tree.root()) == SyntaxKind::VariableDeclarator {
            self.flatten_declarator(tree, overlays, ctx)?;
        }
        self.rewrite_children(tree, overlays, tree.root(), ctx, router)
    }

    /// The short-circuit policy for pre-approved declarations: strip and
    /// re-synthesize modifiers, collapse the body to a marker, and never
    /// recurse into members.
    pub fn rewrite_preapproved(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        entity: EntityId,
    ) -> Result<(), VeneerError> {
        let root = tree.root();
        for &child in &tree.get(root).children {
            match tree.kind(child) {
                kind if kind.is_stripped_modifier() => {
                    let overlay = overlays.get_mut(child);
                    overlay.skip_own_text = true;
                    overlay.omit_following_separator = true;
                }
                SyntaxKind::ModifierList => {
                    for &modifier in &tree.get(child).children {
                        if tree.kind(modifier).is_stripped_modifier() {
                            let overlay = overlays.get_mut(modifier);
                            overlay.skip_own_text = true;
                            overlay.omit_following_separator = true;
                        }
                    }
                    self.collapse_empty_modifier_list(tree, overlays, child);
                }
                SyntaxKind::DeclarationKeyword => {
                    self.synthesize_modifiers(tree, overlays, child, entity)?;
                }
                SyntaxKind::MemberList => {
                    let overlay = overlays.get_mut(child);
                    overlay.skip_own_text = true;
                    overlay.prefix.push_str("{ /* collapsed */ }");
                    for &member in &tree.get(child).children {
                        overlays.get_mut(member).skip_subtree = true;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn rewrite(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
        ctx: Ctx,
        router: &mut DiagnosticRouter,
    ) -> Result<(), VeneerError> {
        match tree.kind(span) {
            SyntaxKind::ClassDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::NamespaceDeclaration
            | SyntaxKind::TypeAliasDeclaration
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::PropertyDeclaration
            | SyntaxKind::EnumMember
            | SyntaxKind::VariableDeclarator => {
                if span == tree.root() {
                    self.rewrite_children(tree, overlays, span, ctx, router)
                } else {
                    self.rewrite_nested_declaration(tree, overlays, span, ctx, router)
                }
            }

            SyntaxKind::ExportKeyword | SyntaxKind::DeclareKeyword | SyntaxKind::DefaultKeyword => {
                // Stripped unconditionally; the correct modifier set is
                // re-synthesized from entity state, not source text.
                let overlay = overlays.get_mut(span);
                overlay.skip_own_text = true;
                overlay.omit_following_separator = true;
                Ok(())
            }

            SyntaxKind::ModifierList => {
                self.rewrite_children(tree, overlays, span, ctx, router)?;
                self.collapse_empty_modifier_list(tree, overlays, span);
                Ok(())
            }

            SyntaxKind::DeclarationKeyword => {
                if tree.get(span).parent == Some(tree.root()) {
                    self.synthesize_modifiers(tree, overlays, span, ctx.entity)?;
                }
                Ok(())
            }

            SyntaxKind::MemberList => {
                if !ctx.inside_type_literal {
                    self.mark_sortable_members(tree, overlays, span);
                }
                self.rewrite_children(tree, overlays, span, ctx, router)
            }

            SyntaxKind::TypeLiteral => {
                let ctx = Ctx {
                    inside_type_literal: true,
                    ..ctx
                };
                self.rewrite_children(tree, overlays, span, ctx, router)
            }

            SyntaxKind::Identifier => self.rewrite_identifier(tree, overlays, span),

            SyntaxKind::ImportTypeReference => match self.import_rewriter {
                Some(rewriter) => {
                    let mut recurse = Recurse {
                        policy: self,
                        router,
                        ctx,
                    };
                    rewriter.rewrite_import_type(tree, overlays, span, &mut recurse)
                }
                None => self.rewrite_children(tree, overlays, span, ctx, router),
            },

            SyntaxKind::VariableStatement | SyntaxKind::Token | SyntaxKind::Fragment => {
                self.rewrite_children(tree, overlays, span, ctx, router)
            }
        }
    }

    fn rewrite_children(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
        ctx: Ctx,
        router: &mut DiagnosticRouter,
    ) -> Result<(), VeneerError> {
        for &child in &tree.get(span).children {
            self.rewrite(tree, overlays, child, ctx, router)?;
        }
        Ok(())
    }

    fn rewrite_nested_declaration(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
        ctx: Ctx,
        router: &mut DiagnosticRouter,
    ) -> Result<(), VeneerError> {
        let node = tree.get(span).node;
        let Some(id) = self.declarations.by_node(node) else {
            let context = self.declarations.get(ctx.declaration);
            return Err(VeneerError::DeclarationLookup {
                node,
                name: context.name.clone(),
                file: context.file.clone(),
            });
        };

        if !filter::is_included(self.declarations, id, self.trim_level) {
            debug!(declaration = self.declarations.get(id).name; "Excluding declaration");
            let overlay = overlays.get_mut(span);
            overlay.skip_subtree = true;
            overlay.omit_following_separator = true;
            return Ok(());
        }

        // Message collection is a side effect of visiting, so it happens
        // once per visited declaration even when the synopsis text is not
        // injected (inside a type literal).
        let lines = synopsis::synopsis_lines(self.declarations, id, router);
        if !ctx.inside_type_literal && !lines.is_empty() {
            let indent = indentation_at(self.source, tree.get(span).range.start);
            let mut prefix = String::new();
            for line in &lines {
                if line.is_empty() {
                    prefix.push_str("//");
                } else {
                    prefix.push_str("// ");
                    prefix.push_str(line);
                }
                prefix.push('\n');
                prefix.push_str(indent);
            }
            overlays.get_mut(span).prepend(&prefix);
        }

        let ctx = Ctx {
            declaration: id,
            ..ctx
        };
        self.rewrite_children(tree, overlays, span, ctx, router)
    }

    /// Prepend the freshly computed modifier text for the root
    /// declaration. The prepend target is the nearest preceding modifier
    /// list so ordering with kept modifiers (`abstract`, ...) is
    /// preserved; without one, the declaration keyword itself.
    fn synthesize_modifiers(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        keyword: SpanId,
        entity: EntityId,
    ) -> Result<(), VeneerError> {
        let entity = self.entity(entity)?;
        if !entity.should_inline_export {
            return Ok(());
        }
        let target = tree
            .find_previous_sibling(keyword, |sibling| sibling.kind == SyntaxKind::ModifierList)
            .unwrap_or(keyword);
        overlays.get_mut(target).prepend("export ");
        Ok(())
    }

    /// A modifier list whose members were all stripped must also swallow
    /// the separator between itself and the declaration keyword, or the
    /// output keeps a stray leading space.
    fn collapse_empty_modifier_list(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
    ) {
        let children = &tree.get(span).children;
        if !children.is_empty()
            && children
                .iter()
                .all(|child| tree.kind(*child).is_stripped_modifier())
        {
            let overlay = overlays.get_mut(span);
            overlay.skip_own_text = true;
            overlay.omit_following_separator = true;
        }
    }

    fn mark_sortable_members(&self, tree: &SpanTree<'_>, overlays: &mut OverlaySet, span: SpanId) {
        overlays.get_mut(span).sort_children = true;
        for &child in &tree.get(span).children {
            if !tree.kind(child).is_declaration() {
                continue;
            }
            if let Some(id) = self.declarations.by_node(tree.get(child).node) {
                let name = &self.declarations.get(id).name;
                overlays.get_mut(child).sort_key = Some(collation_key(name));
            }
        }
    }

    fn rewrite_identifier(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        span: SpanId,
    ) -> Result<(), VeneerError> {
        let node = tree.get(span).node;
        let Some(entity_id) = self.resolver.resolve(node) else {
            return Ok(());
        };
        let entity = self.entity(entity_id)?;

        // Only rename to names the report still defines at this trim
        // level; a reference to a trimmed-out entity keeps its original
        // text. Entities without declarations of their own (pure
        // re-exports) are always defined.
        let retained = entity.declarations.is_empty()
            || entity.declarations.iter().any(|&declaration| {
                filter::is_included(self.declarations, declaration, self.trim_level)
            });
        if !retained {
            trace!(name = tree.text(span); "Target entity trimmed, keeping original identifier");
            return Ok(());
        }

        let name = entity
            .name_for_emit()
            .ok_or_else(|| VeneerError::MissingEmitName {
                entity: entity
                    .export_names
                    .first()
                    .cloned()
                    .unwrap_or_else(|| tree.text(span).to_string()),
            })?;

        if name != tree.text(span) {
            trace!(from = tree.text(span), to = name; "Renaming identifier to canonical name");
            let overlay = overlays.get_mut(span);
            overlay.skip_own_text = true;
            overlay.prefix.push_str(name);
        }
        Ok(())
    }

    /// A declarator rendered as an independent top-level block needs the
    /// statement prefix (the mutability keyword) and terminator that its
    /// enclosing multi-declarator statement owned.
    fn flatten_declarator(
        &self,
        tree: &SpanTree<'_>,
        overlays: &mut OverlaySet,
        ctx: Ctx,
    ) -> Result<(), VeneerError> {
        let declaration = self.declarations.get(ctx.declaration);
        let root_node = tree.get(tree.root()).node;

        let statement = self
            .nodes
            .find_ancestor(root_node, |node| node.kind == SyntaxKind::VariableStatement)
            .ok_or_else(|| VeneerError::DetachedDeclarator {
                name: declaration.name.clone(),
                file: declaration.file.clone(),
            })?;
        let first_declarator = statement
            .children
            .iter()
            .find(|child| child.kind == SyntaxKind::VariableDeclarator)
            .ok_or_else(|| VeneerError::DetachedDeclarator {
                name: declaration.name.clone(),
                file: declaration.file.clone(),
            })?;

        // Everything between the stripped modifiers and the first
        // declarator is the statement prefix, e.g. `const `.
        let mut start = statement.range.start;
        for child in &statement.children {
            if child.range.start >= first_declarator.range.start {
                break;
            }
            if child.kind.is_stripped_modifier() || child.kind == SyntaxKind::ModifierList {
                start = child.range.end;
            }
        }
        let keyword_text = self.source[start..first_declarator.range.start].trim_start();

        let entity = self.entity(ctx.entity)?;
        let mut prefix = String::new();
        if entity.should_inline_export {
            prefix.push_str("export ");
        }
        prefix.push_str(keyword_text);

        let overlay = overlays.get_mut(tree.root());
        overlay.prepend(&prefix);
        overlay.suffix.push(';');
        Ok(())
    }

    fn entity(&self, id: EntityId) -> Result<&'m ExportedEntity, VeneerError> {
        self.entities
            .get(id.index())
            .ok_or(VeneerError::UnknownEntity { entity: id })
    }
}

/// Sort key for sibling ordering: leading underscores are ignored so
/// `_Widget` collates adjacent to `Widget`; the stripped underscore run
/// breaks ties, placing `_Widget` after the bare `Widget`.
pub(crate) fn collation_key(name: &str) -> String {
    let normalized = name.trim_start_matches('_');
    let underscores = &name[..name.len() - normalized.len()];
    format!("{normalized} {underscores}")
}

/// The whitespace indentation of the line containing `offset`, when
/// `offset` sits at the start of a line's content.
fn indentation_at(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |index| index + 1);
    let slice = &source[line_start..offset];
    if slice.chars().all(|c| c == ' ' || c == '\t') {
        slice
    } else {
        ""
    }
}
