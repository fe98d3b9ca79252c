//! The rewrite side-table.
//!
//! Harvesting passes record pending rewrites here instead of tagging tree
//! nodes; the apply pass is then a function of (tree, side-table). The table
//! is written once per conversion and consumed exactly once by `apply`.

use esmify_ast::{NodeArena, NodeIndex, remove_nodes};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone, Copy, Debug)]
pub enum Rewrite {
    /// Overwrite the marked node with this one.
    Replace(NodeIndex),
    /// Delete the marked node from its containing sequence.
    Remove,
}

#[derive(Debug, Default)]
pub struct RewriteMap {
    actions: FxHashMap<NodeIndex, Rewrite>,
    /// Statements some pass has already fully represented elsewhere; the
    /// statement transform drops them instead of emitting a duplicate.
    converted: FxHashSet<NodeIndex>,
}

impl RewriteMap {
    pub fn new() -> RewriteMap {
        RewriteMap::default()
    }

    pub fn mark_replace(&mut self, old: NodeIndex, new: NodeIndex) {
        self.actions.insert(old, Rewrite::Replace(new));
    }

    pub fn mark_remove(&mut self, index: NodeIndex) {
        self.actions.insert(index, Rewrite::Remove);
    }

    pub fn mark_converted(&mut self, index: NodeIndex) {
        self.converted.insert(index);
    }

    pub fn is_converted(&self, index: NodeIndex) -> bool {
        self.converted.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.converted.is_empty()
    }

    /// Consume the table, applying every pending rewrite. Replacements
    /// overwrite the node slot in the arena (so every reference to the old
    /// index now sees the new node); removals are filtered out of whatever
    /// sequence contains them, anywhere in the tree.
    pub fn apply(self, arena: &mut NodeArena) {
        let mut removed = FxHashSet::default();
        for (old, action) in self.actions {
            match action {
                Rewrite::Replace(new) => {
                    if let Some(node) = arena.get(new).cloned() {
                        arena.replace(old, node);
                    }
                }
                Rewrite::Remove => {
                    removed.insert(old);
                }
            }
        }
        if !removed.is_empty() {
            remove_nodes(arena, &removed);
        }
    }
}
