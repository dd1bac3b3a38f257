//! Layered view of an entity's declarations for debugging and authoring UI.

use std::collections::BTreeMap;

use super::cascade::cascade_declarations;
use crate::entity::EntityContext;
use crate::rules::{Declaration, RuleStore};
use crate::selector::{VariantMap, dimensions};

/// Where each of an entity's declarations comes from, per breakpoint.
///
/// Buckets are filled from every rule whose selector matches, regardless of
/// the active context; `current` is the direct resolution under the
/// context the view was built with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeView {
    /// Rules without a `screen` condition.
    pub base: Declaration,
    /// Rules conditioned on `screen: tablet`.
    pub tablet: Declaration,
    /// Rules conditioned on `screen: mobile`.
    pub mobile: Declaration,
    /// Rules conditioned on any other screen value, keyed by that value.
    pub other: BTreeMap<String, Declaration>,
    /// Effective declarations under the active context.
    pub current: Declaration,
}

impl CascadeView {
    /// The bucket for a screen value, if anything was recorded for it.
    pub fn layer(&self, screen: Option<&str>) -> Option<&Declaration> {
        match screen {
            None => Some(&self.base),
            Some("tablet") => Some(&self.tablet),
            Some("mobile") => Some(&self.mobile),
            Some(other) => self.other.get(other),
        }
    }

    fn layer_mut(&mut self, screen: Option<&str>) -> &mut Declaration {
        match screen {
            None => &mut self.base,
            Some("tablet") => &mut self.tablet,
            Some("mobile") => &mut self.mobile,
            Some(other) => self.other.entry(other.to_string()).or_default(),
        }
    }
}

/// Build the cascade view of `entity`.
pub fn inspect(store: &RuleStore, entity: &EntityContext<'_>, active: &VariantMap) -> CascadeView {
    let mut view = CascadeView::default();

    for rule in store.rules_for(entity) {
        if !rule.conditions.is_well_formed() {
            continue;
        }
        let screen = rule.conditions.get(dimensions::SCREEN);
        cascade_declarations(view.layer_mut(screen), &rule.declarations);
    }

    for rule in store.list_matching(entity, active) {
        cascade_declarations(&mut view.current, &rule.declarations);
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, StyledEntity};
    use crate::selector::Selector;

    fn button_store() -> RuleStore {
        let mut store = RuleStore::new();
        let base = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        let button = Selector::type_selector("Button");
        let mobile = store.ensure_rule(button.clone(), VariantMap::screen("mobile"));
        let watch = store.ensure_rule(button, VariantMap::screen("watch"));
        store.set_decl(&base, &Declaration::new().with("paddingX", 16));
        store.set_decl(&mobile, &Declaration::new().with("paddingX", 12));
        store.set_decl(&watch, &Declaration::new().with("paddingX", 4));
        store
    }

    #[test]
    fn buckets_by_screen() {
        let store = button_store();
        let button = Entity::new("b1", "Button");

        let view = inspect(&store, &button.match_context(), &VariantMap::screen("mobile"));

        assert_eq!(view.base.get("paddingX"), Some(&16.into()));
        assert_eq!(view.mobile.get("paddingX"), Some(&12.into()));
        assert!(view.tablet.is_empty());
        assert_eq!(view.other["watch"].get("paddingX"), Some(&4.into()));
        assert_eq!(view.current.get("paddingX"), Some(&12.into()));
    }

    #[test]
    fn layer_lookup() {
        let store = button_store();
        let button = Entity::new("b1", "Button");
        let view = inspect(&store, &button.match_context(), &VariantMap::new());

        assert!(view.layer(None).is_some());
        assert!(view.layer(Some("tv")).is_none());
        assert_eq!(view.current.get("paddingX"), Some(&16.into()));
    }

    #[test]
    fn unrelated_entities_see_nothing() {
        let store = button_store();
        let label = Entity::new("l1", "Label");

        assert_eq!(
            inspect(&store, &label.match_context(), &VariantMap::new()),
            CascadeView::default()
        );
    }
}
