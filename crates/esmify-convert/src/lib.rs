//! AMD-to-ESM conversion engine.
//!
//! The engine rewrites a parsed tree in place: it locates the module
//! definition call, harvests the import and export declarations it implies,
//! transforms the factory body's statements, assembles the new program body
//! and applies the pending rewrites recorded in a side-table.
//!
//! Everything here is per-conversion state; nothing persists across files.

pub mod analyzer;
pub use analyzer::{Analyzer, ExportPath};

pub mod engine;
pub use engine::convert;

pub mod exporter;
pub use exporter::Exporter;

pub mod importer;
pub use importer::Importer;

pub mod matchers;

pub mod rewrite;
pub use rewrite::{Rewrite, RewriteMap};

pub mod shape;
pub use shape::{DefineShape, classify, find_define_call};

pub mod synth;
