//! Tree traversal and node removal.

use crate::arena::{NodeArena, NodeIndex};
use crate::node::NodeKind;
use rustc_hash::FxHashSet;

/// Preorder walk of the tree rooted at `root`. The callback receives each
/// node together with its parent (`NodeIndex::NONE` for the root).
pub fn walk<F>(arena: &NodeArena, root: NodeIndex, f: &mut F)
where
    F: FnMut(NodeIndex, NodeIndex),
{
    walk_from(arena, root, NodeIndex::NONE, f);
}

fn walk_from<F>(arena: &NodeArena, index: NodeIndex, parent: NodeIndex, f: &mut F)
where
    F: FnMut(NodeIndex, NodeIndex),
{
    let Some(node) = arena.get(index) else {
        return;
    };
    f(index, parent);
    for child in node.kind.children() {
        walk_from(arena, child, index, f);
    }
}

/// First node (preorder) for which the predicate holds.
pub fn find_first<P>(arena: &NodeArena, root: NodeIndex, pred: P) -> Option<NodeIndex>
where
    P: Fn(&NodeArena, NodeIndex) -> bool,
{
    let mut found = None;
    walk(arena, root, &mut |index, _parent| {
        if found.is_none() && pred(arena, index) {
            found = Some(index);
        }
    });
    found
}

/// All nodes (preorder) for which the predicate holds.
pub fn find_all<P>(arena: &NodeArena, root: NodeIndex, pred: P) -> Vec<NodeIndex>
where
    P: Fn(&NodeArena, NodeIndex) -> bool,
{
    let mut found = Vec::new();
    walk(arena, root, &mut |index, _parent| {
        if pred(arena, index) {
            found.push(index);
        }
    });
    found
}

/// Delete the given nodes from whatever sequence contains them.
///
/// A variable declaration whose declarator list empties out is deleted as
/// well, iterating until no further statements empty.
pub fn remove_nodes(arena: &mut NodeArena, removed: &FxHashSet<NodeIndex>) {
    let mut removed = removed.clone();
    loop {
        let mut emptied = Vec::new();
        for i in 0..arena.nodes.len() {
            let index = NodeIndex(i as u32);
            let had_declarations = matches!(
                arena.nodes[i].kind,
                NodeKind::VariableDeclaration { ref declarations, .. } if !declarations.is_empty()
            );
            filter_sequences(&mut arena.nodes[i].kind, &removed);
            if had_declarations {
                if let NodeKind::VariableDeclaration { declarations, .. } = &arena.nodes[i].kind {
                    if declarations.is_empty() && !removed.contains(&index) {
                        emptied.push(index);
                    }
                }
            }
        }
        if emptied.is_empty() {
            break;
        }
        removed.extend(emptied);
    }
}

fn filter_sequences(kind: &mut NodeKind, removed: &FxHashSet<NodeIndex>) {
    let keep = |list: &mut Vec<NodeIndex>| list.retain(|index| !removed.contains(index));
    match kind {
        NodeKind::Program { body }
        | NodeKind::BlockStatement { body }
        | NodeKind::SwitchCase {
            consequent: body, ..
        } => keep(body),
        NodeKind::VariableDeclaration { declarations, .. } => keep(declarations),
        NodeKind::ArrayExpression { elements } => keep(elements),
        NodeKind::ObjectExpression { properties } => keep(properties),
        NodeKind::CallExpression { arguments, .. } | NodeKind::NewExpression { arguments, .. } => {
            keep(arguments)
        }
        NodeKind::SequenceExpression { expressions } => keep(expressions),
        NodeKind::SwitchStatement { cases, .. } => keep(cases),
        NodeKind::FunctionExpression { params, .. }
        | NodeKind::FunctionDeclaration { params, .. }
        | NodeKind::ArrowFunctionExpression { params, .. } => keep(params),
        _ => {}
    }
}
