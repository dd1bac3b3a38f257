//! Style resolution engine.

mod cascade;
mod engine;
mod inspector;
mod shared;

pub use cascade::{cascade_declarations, fold_rules};
pub use engine::StyleEngine;
pub use inspector::{CascadeView, inspect};
pub use shared::SharedStyleEngine;
