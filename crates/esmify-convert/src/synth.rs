//! Node synthesis: replacement nodes the engine swaps in for source
//! statements.

use esmify_ast::{NodeArena, NodeIndex, NodeKind, VarKind, build};

/// `return <expr>;` becomes `export default <expr>;`. A bare `return;` has
/// nothing to export and yields `None`.
pub fn return_to_export_default(arena: &mut NodeArena, statement: NodeIndex) -> Option<NodeIndex> {
    let argument = match arena.kind(statement) {
        Some(NodeKind::ReturnStatement { argument }) => *argument,
        _ => return None,
    };
    if argument.is_none() {
        return None;
    }
    Some(build::export_default(arena, argument))
}

/// `target.NAME = <value>` becomes `export var NAME = <value>;`
pub fn export_var(arena: &mut NodeArena, name: &str, value: NodeIndex) -> NodeIndex {
    let id = build::identifier(arena, name);
    let declarator = build::variable_declarator(arena, id, value);
    let declaration = build::variable_declaration(arena, VarKind::Var, vec![declarator]);
    build::export_named(arena, declaration)
}
