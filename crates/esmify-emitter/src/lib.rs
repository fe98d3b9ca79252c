//! JavaScript printer for the esmify converter.
//!
//! Serializes a (converted) tree back to source text. Printing is purely
//! structural: parenthesized expressions are explicit nodes preserved by the
//! parser, and the converter only relocates whole parsed expressions, so no
//! precedence re-derivation is needed.

mod printer;

pub use printer::{PrintOptions, Printer, print};
