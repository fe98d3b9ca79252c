//! Parse diagnostics.

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// A parse-level problem with a source location. The parser aborts on the
/// first diagnostic; the CLI surfaces it verbatim.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Diagnostic {
        Diagnostic {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.span.start)
    }
}

impl std::error::Error for Diagnostic {}
