//! The module engine: orchestrates classification, harvesting, statement
//! transformation, body assembly, rewrite application and cleanup.

use crate::analyzer::Analyzer;
use crate::exporter::Exporter;
use crate::importer::Importer;
use crate::matchers::{
    is_interop_marker, is_loader_call, is_loader_call_statement, is_return_statement,
    is_use_strict_directive, is_variable_declaration,
};
use crate::rewrite::RewriteMap;
use crate::shape::{DefineShape, callback_body, classify, find_define_call};
use crate::synth;
use esmify_ast::{NodeArena, NodeIndex, NodeKind, build, find_all, remove_nodes};
use rustc_hash::FxHashSet;

/// Convert the program rooted at `root` from the AMD convention to the ESM
/// convention, in place.
///
/// A file with no recognized module definition call converts to an empty
/// body; that is defined behavior, not an error.
pub fn convert(arena: &mut NodeArena, root: NodeIndex) {
    let Some(define) = find_define_call(arena, root) else {
        tracing::debug!("no module definition call found, emitting an empty body");
        arena.set_program_body(root, Vec::new());
        return;
    };
    let Some(shape) = classify(arena, define) else {
        tracing::warn!("unsupported module definition shape, emitting an empty body");
        arena.set_program_body(root, Vec::new());
        return;
    };
    match shape {
        DefineShape::ObjectExport { object } => {
            // The whole module is a static data export; no harvesting needed.
            let export = build::export_default(arena, object);
            arena.set_program_body(root, vec![export]);
        }
        DefineShape::Factory { .. } => convert_factory(arena, root, &shape),
    }
}

fn convert_factory(arena: &mut NodeArena, root: NodeIndex, shape: &DefineShape) {
    let DefineShape::Factory { callback, .. } = shape else {
        return;
    };
    let analyzer = Analyzer::from_shape(arena, shape);
    let mut rewrites = RewriteMap::new();

    let imports = Importer {
        arena: &mut *arena,
        analyzer: &analyzer,
        rewrites: &mut rewrites,
    }
    .harvest(shape);
    let exports = Exporter {
        arena: &mut *arena,
        analyzer: &analyzer,
        rewrites: &mut rewrites,
    }
    .harvest(shape);

    let statements = match callback_body(arena, *callback) {
        Ok(statements) => statements,
        // Expression-bodied factory: the body is one export default.
        Err(expression) => vec![build::export_default(arena, expression)],
    };

    let mut new_body = imports;
    for statement in statements {
        if let Some(kept) = transform_statement(arena, &analyzer, &rewrites, statement) {
            new_body.push(kept);
        }
    }
    new_body.extend(exports);
    arena.set_program_body(root, new_body);

    rewrites.apply(arena);
    cleanup(arena, root, &analyzer);
}

/// Transform one top-level statement of the factory body; `None` elides it.
fn transform_statement(
    arena: &mut NodeArena,
    analyzer: &Analyzer,
    rewrites: &RewriteMap,
    statement: NodeIndex,
) -> Option<NodeIndex> {
    if rewrites.is_converted(statement) {
        // Already fully represented by a harvested declaration; emitting it
        // as well would duplicate the export.
        tracing::debug!("dropping statement already converted upstream");
        return None;
    }
    let loader = analyzer.loader_binding().to_string();
    if is_return_statement(arena, statement) {
        return synth::return_to_export_default(arena, statement);
    }
    if is_loader_call_statement(arena, statement, &loader) {
        // Already represented by an import.
        return None;
    }
    if is_variable_declaration(arena, statement) {
        return filter_loader_declarators(arena, statement, &loader);
    }
    Some(statement)
}

/// Drop declarators initialized by a loader call (each is already an
/// import); drop the whole statement when none survive.
fn filter_loader_declarators(
    arena: &mut NodeArena,
    statement: NodeIndex,
    loader: &str,
) -> Option<NodeIndex> {
    let kept: Vec<NodeIndex> = match arena.kind(statement) {
        Some(NodeKind::VariableDeclaration { declarations, .. }) => declarations
            .iter()
            .copied()
            .filter(|declarator| {
                !matches!(arena.kind(*declarator), Some(NodeKind::VariableDeclarator { init, .. })
                    if is_loader_call(arena, *init, loader))
            })
            .collect(),
        _ => return Some(statement),
    };
    if kept.is_empty() {
        return None;
    }
    if let Some(NodeKind::VariableDeclaration { declarations, .. }) =
        arena.get_mut(statement).map(|node| &mut node.kind)
    {
        *declarations = kept;
    }
    Some(statement)
}

/// Strip module-interop boilerplate and strict-mode directives, tree-wide.
fn cleanup(arena: &mut NodeArena, root: NodeIndex, analyzer: &Analyzer) {
    let target = analyzer.export_target().to_string();
    let stale: FxHashSet<NodeIndex> = find_all(arena, root, |arena, index| {
        is_use_strict_directive(arena, index) || is_interop_marker(arena, index, &target)
    })
    .into_iter()
    .collect();
    if !stale.is_empty() {
        remove_nodes(arena, &stale);
    }
}
