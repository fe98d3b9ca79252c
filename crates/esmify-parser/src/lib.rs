//! JavaScript scanner and parser for the esmify converter.
//!
//! Covers the ES5+ subset AMD modules are written in, plus arrow functions
//! (a `define` factory callback is frequently an arrow). The parser aborts
//! on the first syntax error with a `Diagnostic`; the converter downstream
//! assumes a well-formed tree.

pub mod scanner;

mod expressions;
mod parser;

pub use parser::{ParsedModule, parse};
