//! Export harvesting.
//!
//! Scans the top level of the factory body for assignments rooted at the
//! export target. A whole-target assignment (`module.exports = X`,
//! `exports = X`) is marked as already converted and contributes a trailing
//! `export default X`. A property assignment (`exports.NAME = X`) is
//! rewritten in place to `export var NAME = X;` via a replacement marker, so
//! its evaluation order against surrounding statements is preserved.
//! Assignments nested deeper than the top level are left as plain
//! assignments.

use crate::analyzer::{Analyzer, ExportPath};
use crate::rewrite::RewriteMap;
use crate::shape::{DefineShape, callback_body};
use crate::synth;
use esmify_ast::{NodeArena, NodeIndex, build};

pub struct Exporter<'a> {
    pub arena: &'a mut NodeArena,
    pub analyzer: &'a Analyzer,
    pub rewrites: &'a mut RewriteMap,
}

impl Exporter<'_> {
    /// Ordered export declarations to append after the transformed body.
    pub fn harvest(&mut self, shape: &DefineShape) -> Vec<NodeIndex> {
        let DefineShape::Factory { callback, .. } = shape else {
            return Vec::new();
        };
        let Ok(statements) = callback_body(self.arena, *callback) else {
            // Expression-bodied factories export exactly their expression;
            // the engine handles that directly.
            return Vec::new();
        };
        let mut exports = Vec::new();
        for statement in statements {
            let Some((target, value)) = self.analyzer.assignment_parts(self.arena, statement)
            else {
                continue;
            };
            match self.analyzer.export_path(self.arena, target) {
                Some(ExportPath::Whole) => {
                    self.rewrites.mark_converted(statement);
                    exports.push(build::export_default(self.arena, value));
                }
                Some(ExportPath::Named(name)) => {
                    let replacement = synth::export_var(self.arena, &name, value);
                    self.rewrites.mark_replace(statement, replacement);
                }
                None => {}
            }
        }
        exports
    }
}
