//! The report orchestrator: assembles one full API report document.
//!
//! [`generate_report`] runs the whole pipeline over a [`SurfaceModel`]:
//! header, directive references, imports, one block per consumable entity
//! (synopsis, rewritten declarations, export clauses), synthetic namespace
//! blocks, star exports, and the trailing diagnostics section. The
//! sequencing is deterministic so reports diff cleanly between runs.

use std::fmt::Write as _;

use log::{debug, info};

use veneer_core::declaration::DeclarationSet;
use veneer_core::entity::{EntityId, EntitySource, ExportedEntity};
use veneer_core::model::SurfaceModel;
use veneer_core::overlay::OverlaySet;
use veneer_core::span::SpanTree;
use veneer_core::syntax::NodeIndex;

use crate::config::ReportConfig;
use crate::diagnostics::DiagnosticRouter;
use crate::error::VeneerError;
use crate::policy::{RewriteImportType, RewritePolicy};
use crate::resolver::ResolutionTable;
use crate::{filter, synopsis, writer};

/// Generate the API report document for `model`.
///
/// The returned string is the complete report: Markdown header, one fenced
/// code block with the rewritten declaration text, and the trailing
/// comment section inside the fence. Trailing whitespace is trimmed from
/// every line as a final normalization step, since upstream source
/// formatting may carry trailing spaces that are immaterial to the
/// report's meaning.
pub fn generate_report(
    model: &SurfaceModel,
    config: &ReportConfig,
    import_rewriter: Option<&dyn RewriteImportType>,
) -> Result<String, VeneerError> {
    info!(
        package = model.package_name,
        entities = model.entities.len(),
        trim_level = config.trim_level().as_str();
        "Generating API report"
    );

    let nodes = NodeIndex::build(&model.root);
    let declarations = DeclarationSet::new(&model.declarations);
    let resolver = ResolutionTable::from_resolutions(&model.resolutions);
    let mut router = DiagnosticRouter::new(&model.messages);
    let policy = RewritePolicy::new(
        &model.source,
        &nodes,
        &declarations,
        &model.entities,
        &resolver,
        import_rewriter,
        config.trim_level(),
    );

    let mut out = String::new();
    let _ = writeln!(out, "## API Report File for \"{}\"", model.package_name);
    out.push('\n');
    out.push_str("> Do not edit this file. It is a generated API report.\n\n");
    out.push_str("```ts\n\n");

    write_directive_references(&mut out, model);
    write_imports(&mut out, model)?;

    for (index, entity) in model.entities.iter().enumerate() {
        if !entity.consumable {
            continue;
        }
        match &entity.source {
            EntitySource::Local | EntitySource::Import { .. } => {
                write_entity_block(
                    &mut out,
                    model,
                    &declarations,
                    &nodes,
                    &policy,
                    config,
                    &mut router,
                    index,
                    entity,
                )?;
            }
            // Namespace blocks come after all plain declarations.
            EntitySource::ModuleAlias(_) => {}
        }
    }

    for entity in &model.entities {
        if !entity.consumable {
            continue;
        }
        if let EntitySource::ModuleAlias(alias) = &entity.source {
            write_namespace_block(&mut out, entity, alias)?;
        }
    }

    for module in &model.star_exports {
        let _ = writeln!(out, "export * from \"{module}\";");
    }
    if !model.star_exports.is_empty() {
        out.push('\n');
    }

    let leftovers = router.take_unconsumed();
    if !leftovers.is_empty() {
        out.push_str("// Warnings were encountered during analysis:\n//\n");
        for line in &leftovers {
            let _ = writeln!(out, "// {line}");
        }
        out.push('\n');
    }

    if !model.package_documented {
        out.push_str("// (No packageDocumentation comment for this package)\n\n");
    }

    out.push_str("```\n");

    debug!(
        package = model.package_name,
        unconsumed = leftovers.len(),
        raised = router.raised().len();
        "Report assembly finished"
    );
    Ok(trim_trailing_whitespace(&out))
}

/// Whether two report documents describe the same API surface.
///
/// Collapses every run of whitespace (including newlines) to a single
/// space before comparing, so line-ending normalization and incidental
/// reflow never register as a change while any token or ordering
/// difference does.
pub fn reports_equivalent(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

fn write_directive_references(out: &mut String, model: &SurfaceModel) {
    let mut references: Vec<&str> = model
        .directive_references
        .iter()
        .map(String::as_str)
        .collect();
    references.sort_unstable();
    references.dedup();

    for reference in &references {
        let _ = writeln!(out, "/// <reference types=\"{reference}\" />");
    }
    if !references.is_empty() {
        out.push('\n');
    }
}

fn write_imports(out: &mut String, model: &SurfaceModel) -> Result<(), VeneerError> {
    let mut wrote_any = false;
    for entity in &model.entities {
        let EntitySource::Import {
            module,
            exported_as,
        } = &entity.source
        else {
            continue;
        };
        let name = emit_name(entity)?;

        match exported_as.as_deref() {
            None => {
                let _ = writeln!(out, "import {name} from '{module}';");
            }
            Some(original) if original == name => {
                let _ = writeln!(out, "import {{ {name} }} from '{module}';");
            }
            Some(original) => {
                let _ = writeln!(out, "import {{ {original} as {name} }} from '{module}';");
            }
        }
        wrote_any = true;
    }
    if wrote_any {
        out.push('\n');
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_entity_block(
    out: &mut String,
    model: &SurfaceModel,
    declarations: &DeclarationSet<'_>,
    nodes: &NodeIndex<'_>,
    policy: &RewritePolicy<'_, '_>,
    config: &ReportConfig,
    router: &mut DiagnosticRouter,
    index: usize,
    entity: &ExportedEntity,
) -> Result<(), VeneerError> {
    let entity_id = EntityId(index as u32);
    let mut rendered_any = false;

    for &declaration_id in &entity.declarations {
        if !filter::is_included(declarations, declaration_id, config.trim_level()) {
            debug!(
                entity = emit_name(entity)?,
                declaration = declarations.get(declaration_id).name;
                "Declaration trimmed from report"
            );
            continue;
        }

        let declaration = declarations.get(declaration_id);
        let node = nodes
            .get(declaration.node)
            .ok_or_else(|| VeneerError::MissingSyntaxNode {
                node: declaration.node,
                name: declaration.name.clone(),
                file: declaration.file.clone(),
            })?;

        let lines = synopsis::synopsis_lines(declarations, declaration_id, router);
        push_comment_lines(out, &lines);

        let tree = SpanTree::build(&model.source, node);
        let mut overlays = OverlaySet::new(tree.len());
        if declaration.metadata.preapproved {
            policy.rewrite_preapproved(&tree, &mut overlays, entity_id)?;
        } else {
            policy.rewrite_declaration(
                &tree,
                &mut overlays,
                entity_id,
                declaration_id,
                router,
            )?;
        }
        out.push_str(&writer::render(&tree, &overlays));
        out.push_str("\n\n");
        rendered_any = true;
    }

    // Export clauses are pointless when every declaration was trimmed;
    // entities without declarations of their own (pure re-exports) still
    // get them.
    if !entity.should_inline_export && (rendered_any || entity.declarations.is_empty()) {
        let canonical = emit_name(entity)?;
        for export_name in &entity.export_names {
            let lines = router.take_for_export_name(entity_id, export_name);
            push_comment_lines(out, &lines);

            if export_name == canonical {
                let _ = writeln!(out, "export {{ {canonical} }}");
            } else {
                let _ = writeln!(out, "export {{ {canonical} as {export_name} }}");
            }
            out.push('\n');
        }
    }

    Ok(())
}

fn write_namespace_block(
    out: &mut String,
    entity: &ExportedEntity,
    alias: &veneer_core::entity::ModuleAlias,
) -> Result<(), VeneerError> {
    let name = emit_name(entity)?;

    if let Some(module) = alias.wildcard_reexports.first() {
        return Err(VeneerError::WildcardReExport {
            namespace: name.to_string(),
            module: module.clone(),
        });
    }

    let _ = writeln!(out, "declare namespace {name} {{");
    out.push_str("    export {\n");
    for (index, local) in alias.exported_locals.iter().enumerate() {
        let separator = if index + 1 < alias.exported_locals.len() {
            ","
        } else {
            ""
        };
        let _ = writeln!(out, "        {local}{separator}");
    }
    out.push_str("    }\n}\n\n");
    Ok(())
}

fn emit_name(entity: &ExportedEntity) -> Result<&str, VeneerError> {
    entity
        .name_for_emit()
        .ok_or_else(|| VeneerError::MissingEmitName {
            entity: entity
                .export_names
                .first()
                .cloned()
                .unwrap_or_else(|| "<unnamed>".to_string()),
        })
}

fn push_comment_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            let _ = writeln!(out, "// {line}");
        }
    }
}

fn trim_trailing_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
