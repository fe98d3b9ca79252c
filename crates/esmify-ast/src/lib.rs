//! Arena-based JavaScript AST for the esmify converter.
//!
//! This crate provides the foundational types used across all esmify crates:
//! - Node storage (`NodeArena`, `NodeIndex`, `Node`)
//! - The closed set of node kinds (`NodeKind`)
//! - Source spans (`Span`)
//! - Node construction helpers (`build`)
//! - Tree traversal and removal (`visit`)
//! - Parse diagnostics (`Diagnostic`)

pub mod arena;
pub use arena::{Node, NodeArena, NodeIndex};

pub mod node;
pub use node::{NodeKind, VarKind};

pub mod span;
pub use span::Span;

pub mod build;

pub mod visit;
pub use visit::{find_all, find_first, remove_nodes, walk};

pub mod diagnostics;
pub use diagnostics::Diagnostic;
