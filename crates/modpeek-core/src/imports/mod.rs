//! Import discovery for a single line of JavaScript source.
//!
//! Provides a line-scoped extractor for `require(...)` and `import ... from` specifiers.

mod scan;

pub use scan::{extract_import_values, extract_specifiers, Specifier, SpecifierKind};
