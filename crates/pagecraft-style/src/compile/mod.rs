//! Declaration compilation, stylesheet emission and cached injection.

mod cache;
mod declaration;
mod emitter;

pub use cache::{CachedSink, MemorySink, StyleSink, content_hash, inject_if_changed};
pub use declaration::{DeclarationCompiler, kebab_case};
pub use emitter::StylesheetEmitter;
