//! Thread-safe handle to a style engine.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::StyleEngine;
use crate::compile::{CachedSink, StyleSink};
use crate::entity::StyledEntity;
use crate::rules::{Declaration, RuleId};
use crate::selector::{Selector, VariantMap};

/// Shared, lock-protected [`StyleEngine`].
///
/// Writers are serialized by the lock, so concurrent `ensure_rule` calls
/// for the same identity still produce a single rule. Readers always see
/// the store between mutations, never during one.
#[derive(Debug, Clone, Default)]
pub struct SharedStyleEngine {
    inner: Arc<RwLock<StyleEngine>>,
}

impl SharedStyleEngine {
    pub fn new(engine: StyleEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Lock for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, StyleEngine> {
        self.inner.read()
    }

    /// Lock for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, StyleEngine> {
        self.inner.write()
    }

    pub fn ensure_rule(&self, selector: Selector, conditions: VariantMap) -> RuleId {
        self.inner.write().ensure_rule(selector, conditions)
    }

    pub fn set_decl(&self, id: &RuleId, patch: &Declaration) -> bool {
        self.inner.write().set_decl(id, patch)
    }

    pub fn remove_rule(&self, id: &RuleId) -> bool {
        self.inner.write().remove_rule(id)
    }

    pub fn resolve<E>(&self, entity: &E, active: &VariantMap) -> Declaration
    where
        E: StyledEntity + ?Sized,
    {
        self.inner.read().resolve(entity, active)
    }

    /// Copy of the memoized stylesheet for the active context.
    pub fn stylesheet(&self) -> String {
        self.inner.write().stylesheet().to_string()
    }

    pub fn render_to<S: StyleSink>(&self, sink: &mut CachedSink<S>) -> bool {
        self.inner.write().render_to(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use std::thread;

    #[test]
    fn concurrent_ensure_rule_creates_one_rule() {
        let shared = SharedStyleEngine::default();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.ensure_rule(Selector::type_selector("Button"), VariantMap::new())
                })
            })
            .collect();
        let ids: Vec<RuleId> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(shared.read().store().rule_count(), 1);
    }

    #[test]
    fn writes_are_visible_to_readers() {
        let shared = SharedStyleEngine::default();
        let id = shared.ensure_rule(Selector::entity("hero"), VariantMap::new());
        shared.set_decl(&id, &Declaration::new().with("gap", 8));

        let hero = Entity::new("hero", "Section");
        assert_eq!(shared.resolve(&hero, &VariantMap::new()).get("gap"), Some(&8.into()));
        assert!(shared.stylesheet().contains("gap:8px;"));

        assert!(shared.remove_rule(&id));
        assert!(shared.resolve(&hero, &VariantMap::new()).is_empty());
    }
}
