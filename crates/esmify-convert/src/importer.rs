//! Import harvesting.
//!
//! Imports come from two places, in this order: the dependency list of the
//! define call (list order), then loader calls discovered inside the factory
//! body (discovery order). Every body construct represented by an import is
//! marked for removal in the side-table.

use crate::analyzer::{Analyzer, RESERVED_SPECIFIERS};
use crate::matchers::{is_loader_call, is_loader_call_statement, loader_call_specifier};
use crate::rewrite::RewriteMap;
use crate::shape::{DefineShape, callback_params};
use esmify_ast::{NodeArena, NodeIndex, NodeKind, build, find_all};

pub struct Importer<'a> {
    pub arena: &'a mut NodeArena,
    pub analyzer: &'a Analyzer,
    pub rewrites: &'a mut RewriteMap,
}

impl Importer<'_> {
    /// Ordered import declarations implied by the define call.
    pub fn harvest(&mut self, shape: &DefineShape) -> Vec<NodeIndex> {
        let DefineShape::Factory {
            dependencies,
            callback,
            ..
        } = shape
        else {
            return Vec::new();
        };
        let mut imports = Vec::new();
        self.harvest_dependency_list(dependencies, *callback, &mut imports);
        self.harvest_loader_calls(*callback, &mut imports);
        imports
    }

    fn harvest_dependency_list(
        &mut self,
        dependencies: &[NodeIndex],
        callback: NodeIndex,
        imports: &mut Vec<NodeIndex>,
    ) {
        let params = callback_params(self.arena, callback);
        for (position, dependency) in dependencies.iter().enumerate() {
            let Some(specifier) = self.arena.string_value(*dependency).map(str::to_string) else {
                tracing::debug!("skipping non-string dependency specifier");
                continue;
            };
            if RESERVED_SPECIFIERS.contains(&specifier.as_str()) {
                continue;
            }
            match params.get(position) {
                Some(param) => {
                    imports.push(build::import_declaration(
                        self.arena,
                        Some(param.as_str()),
                        &specifier,
                    ));
                }
                // More specifiers than parameters: imported for side effect
                // only.
                None => imports.push(build::import_declaration(self.arena, None, &specifier)),
            }
        }
    }

    /// `var x = loader('m')` declarators and bare `loader('m');` statements,
    /// at any depth inside the factory body, in discovery order.
    fn harvest_loader_calls(&mut self, callback: NodeIndex, imports: &mut Vec<NodeIndex>) {
        let loader = self.analyzer.loader_binding().to_string();
        let sites = find_all(self.arena, callback, |arena, index| {
            is_loader_call_statement(arena, index, &loader)
                || matches!(arena.kind(index), Some(NodeKind::VariableDeclarator { init, .. })
                    if is_loader_call(arena, *init, &loader))
        });
        for site in sites {
            match self.arena.kind(site) {
                Some(NodeKind::VariableDeclarator { id, init }) => {
                    let (id, init) = (*id, *init);
                    let local = self.arena.identifier_text(id).map(str::to_string);
                    let Some(specifier) =
                        loader_call_specifier(self.arena, init, &loader).map(str::to_string)
                    else {
                        continue;
                    };
                    imports.push(build::import_declaration(
                        self.arena,
                        local.as_deref(),
                        &specifier,
                    ));
                    self.rewrites.mark_remove(site);
                }
                Some(NodeKind::ExpressionStatement { expression, .. }) => {
                    let expression = *expression;
                    let Some(specifier) = loader_call_specifier(self.arena, expression, &loader)
                        .map(str::to_string)
                    else {
                        continue;
                    };
                    imports.push(build::import_declaration(self.arena, None, &specifier));
                    self.rewrites.mark_remove(site);
                }
                _ => {}
            }
        }
    }
}
