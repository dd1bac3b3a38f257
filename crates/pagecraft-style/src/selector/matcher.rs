//! Selector matching.

use super::Selector;
use crate::entity::EntityContext;

/// Selector matching engine.
///
/// Matching is exact equality only: no prefix, partial or case-insensitive
/// comparison.
#[derive(Debug)]
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check if a selector matches the entity.
    ///
    /// A selector that is not well formed matches nothing.
    pub fn matches(selector: &Selector, entity: &EntityContext<'_>) -> bool {
        if !selector.is_well_formed() {
            return false;
        }

        match selector {
            Selector::Entity(id) => id == entity.id,
            Selector::Type(type_name) => type_name == entity.type_name,
            Selector::Class(class) => entity.has_class(class),
        }
    }
}
