//! Selector and variant-condition matching.

mod matcher;
mod types;
mod variant;

pub use matcher::SelectorMatcher;
pub use types::Selector;
pub use variant::{VariantMap, VariantMatcher, dimensions};
