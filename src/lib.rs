//! esmify — convert AMD modules to ES modules.
//!
//! The pipeline is parse → convert → print: `esmify-parser` builds the tree,
//! `esmify-convert` rewrites it in place, `esmify-emitter` serializes it.
//! Each call owns a fresh arena and rewrite table, so conversions are
//! independent and safe to run per file.
//!
//! ```
//! let output = esmify::convert(
//!     "define(['a'], function (a) { return a; });",
//!     &esmify::Options::default(),
//! )
//! .unwrap();
//! assert_eq!(output, "import a from 'a';\nexport default a;\n");
//! ```

use esmify_ast::Diagnostic;
use esmify_emitter::PrintOptions;
use std::fmt;

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Separate the import block, module body and export block with blank
    /// lines in the output.
    pub beautify: bool,
}

#[derive(Debug)]
pub enum Error {
    /// The input is not parseable JavaScript.
    Parse(Diagnostic),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(diagnostic) => write!(f, "parse error: {diagnostic}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(diagnostic) => Some(diagnostic),
        }
    }
}

/// Convert one AMD source file to ESM source text.
pub fn convert(source: &str, options: &Options) -> Result<String, Error> {
    let mut module = esmify_parser::parse(source).map_err(Error::Parse)?;
    esmify_convert::convert(&mut module.arena, module.root);
    let print_options = PrintOptions {
        separate_sections: options.beautify,
    };
    Ok(esmify_emitter::print(
        &module.arena,
        module.root,
        &print_options,
    ))
}
