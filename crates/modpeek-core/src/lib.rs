#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod completion;
pub mod config;
pub mod error;
pub mod host;
pub mod hover;
pub mod imports;
pub mod paths;
pub mod resolver;
pub mod version;

pub use completion::{completion_candidates, query_completions, should_do_autocomplete, Completion};
pub use config::{Config, ResolverConfig};
pub use error::Error;
pub use host::{BufferView, EditorView, ImportPreview, Point};
pub use hover::{hover_targets, HoverPreview};
pub use imports::{extract_import_values, extract_specifiers, Specifier, SpecifierKind};
pub use resolver::{
    resolve_specifier, resolve_with_trace, FileSystem, MemoryFileSystem, OsFileSystem,
    ResolveContext, ResolveReasonCode, ResolveResult, ResolveStatus,
};
pub use version::VERSION;
