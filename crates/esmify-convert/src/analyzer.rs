//! Scope questions the importer and exporter depend on.
//!
//! The three reserved dependency specifiers — "require", "exports" and
//! "module" — do not produce imports. Instead they bind local names that
//! change how the factory body is read: calls of the require binding are
//! dependency loads, assignments rooted at the exports binding are exports.

use crate::shape::{DefineShape, callback_params};
use esmify_ast::{NodeArena, NodeIndex, NodeKind};

pub const RESERVED_SPECIFIERS: &[&str] = &["require", "exports", "module"];

/// Where an assignment target points within the module's public surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportPath {
    /// `exports = X` or `module.exports = X`
    Whole,
    /// `exports.NAME = X` or `module.exports.NAME = X`
    Named(String),
}

/// Resolved local bindings of the reserved specifiers. Pure data: computing
/// it borrows the arena only transiently, so the harvesting passes can hold
/// it alongside a mutable arena.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    require_name: Option<String>,
    exports_name: Option<String>,
    module_name: Option<String>,
}

impl Analyzer {
    pub fn from_shape(arena: &NodeArena, shape: &DefineShape) -> Analyzer {
        let mut analyzer = Analyzer::default();
        let DefineShape::Factory {
            dependencies,
            callback,
            ..
        } = shape
        else {
            return analyzer;
        };
        let params = callback_params(arena, *callback);
        if dependencies.is_empty() {
            // The simplified CommonJS wrapper: `define(function (require,
            // exports, module) { ... })` binds by position.
            for (position, reserved) in RESERVED_SPECIFIERS.iter().enumerate() {
                if let Some(param) = params.get(position) {
                    analyzer.bind(reserved, param);
                }
            }
        } else {
            for (position, dependency) in dependencies.iter().enumerate() {
                let Some(specifier) = arena.string_value(*dependency) else {
                    continue;
                };
                if let Some(param) = params.get(position) {
                    analyzer.bind(specifier, param);
                }
            }
        }
        analyzer
    }

    fn bind(&mut self, specifier: &str, param: &str) {
        match specifier {
            "require" => self.require_name = Some(param.to_string()),
            "exports" => self.exports_name = Some(param.to_string()),
            "module" => self.module_name = Some(param.to_string()),
            _ => {}
        }
    }

    /// Local name of the dependency-loading function. Bodies routinely call
    /// a global `require` even without binding it, so that is the fallback.
    pub fn loader_binding(&self) -> &str {
        self.require_name.as_deref().unwrap_or("require")
    }

    /// Local name of the export target object.
    pub fn export_target(&self) -> &str {
        self.exports_name.as_deref().unwrap_or("exports")
    }

    /// Local name of the module wrapper object.
    pub fn module_binding(&self) -> &str {
        self.module_name.as_deref().unwrap_or("module")
    }

    /// The written-to target and assigned value of a plain `=` assignment
    /// statement. Compound assignments (`+=` etc.) are reads as well as
    /// writes and are never converted.
    pub fn assignment_parts(
        &self,
        arena: &NodeArena,
        statement: NodeIndex,
    ) -> Option<(NodeIndex, NodeIndex)> {
        let NodeKind::ExpressionStatement { expression, .. } = arena.kind(statement)? else {
            return None;
        };
        let NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } = arena.kind(*expression)?
        else {
            return None;
        };
        if operator != "=" {
            return None;
        }
        Some((*left, *right))
    }

    /// Whether an assignment target roots at the export target, and at which
    /// property.
    pub fn export_path(&self, arena: &NodeArena, target: NodeIndex) -> Option<ExportPath> {
        // `exports = X`
        if arena.identifier_text(target) == Some(self.export_target()) {
            return Some(ExportPath::Whole);
        }
        let NodeKind::MemberExpression {
            object,
            property,
            computed: false,
        } = arena.kind(target)?
        else {
            return None;
        };
        // `module.exports = X`
        if self.is_module_exports(arena, target) {
            return Some(ExportPath::Whole);
        }
        let name = arena.identifier_text(*property)?.to_string();
        // `exports.NAME = X`
        if arena.identifier_text(*object) == Some(self.export_target()) {
            return Some(ExportPath::Named(name));
        }
        // `module.exports.NAME = X`
        if self.is_module_exports(arena, *object) {
            return Some(ExportPath::Named(name));
        }
        None
    }

    fn is_module_exports(&self, arena: &NodeArena, index: NodeIndex) -> bool {
        match arena.kind(index) {
            Some(NodeKind::MemberExpression {
                object,
                property,
                computed: false,
            }) => {
                arena.identifier_text(*object) == Some(self.module_binding())
                    && arena.identifier_text(*property) == Some("exports")
            }
            _ => false,
        }
    }
}
