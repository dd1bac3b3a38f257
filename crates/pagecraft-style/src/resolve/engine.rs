//! Main style resolution engine.

use std::collections::BTreeMap;

use super::cascade::fold_rules;
use super::inspector::{CascadeView, inspect};
use crate::compile::{CachedSink, StyleSink, StylesheetEmitter};
use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::entity::StyledEntity;
use crate::logging::targets;
use crate::rules::{Declaration, Mutation, RuleId, RuleStore, SheetId, StyleRule, StyleSheet};
use crate::selector::{Selector, VariantMap};
use crate::tokens::{ResolvedValue, TokenTable};
use crate::{Error, Result};

/// Last compiled stylesheet and the inputs it was built from.
#[derive(Debug)]
struct Compiled {
    store_revision: u64,
    token_revision: u64,
    active: VariantMap,
    text: String,
}

/// The style engine.
///
/// Owns the rule store, the token table and the active variant context,
/// and exposes authoring (`ensure_rule`, `set_decl`, `remove_rule`),
/// resolution (`resolve`, `cascade`) and compilation (`compile`,
/// `stylesheet`, `render_to`).
///
/// The engine is synchronous and assumes a single writer. Wrap it in a
/// [`SharedStyleEngine`](super::SharedStyleEngine) when several threads need
/// access.
pub struct StyleEngine {
    store: RuleStore,
    tokens: TokenTable,
    token_revision: u64,
    active: VariantMap,
    config: EngineConfig,
    compiled: Option<Compiled>,
}

impl StyleEngine {
    /// Create an engine with an empty store and token table.
    pub fn new(config: EngineConfig) -> Self {
        let mut store = RuleStore::new();
        store.set_capture_pre_images(config.capture_pre_images);
        Self {
            store,
            tokens: TokenTable::new(),
            token_revision: 0,
            active: VariantMap::new(),
            config,
            compiled: None,
        }
    }

    /// Create an engine preloaded with sheets.
    pub fn from_sheets(
        config: EngineConfig,
        sheets: impl IntoIterator<Item = StyleSheet>,
    ) -> Result<Self> {
        let mut store = RuleStore::from_sheets(sheets)?;
        store.set_capture_pre_images(config.capture_pre_images);
        Ok(Self {
            store,
            ..Self::new(config)
        })
    }

    /// Builder: set the token table.
    pub fn with_tokens(mut self, tokens: TokenTable) -> Self {
        self.set_tokens(tokens);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration. The next compile starts from scratch.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.store.set_capture_pre_images(config.capture_pre_images);
        self.config = config;
        self.compiled = None;
    }

    /// Read-only access to the rule store.
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &RuleId) -> Result<&StyleRule> {
        self.store.rule(id).ok_or_else(|| Error::RuleNotFound(id.clone()))
    }

    /// Get the token table.
    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    /// Replace the whole token table.
    pub fn set_tokens(&mut self, tokens: TokenTable) {
        tracing::debug!(target: targets::STORE, count = tokens.len(), "token table replaced");
        self.tokens = tokens;
        self.token_revision += 1;
    }

    /// Counter bumped by every [`set_tokens`](Self::set_tokens).
    pub fn token_revision(&self) -> u64 {
        self.token_revision
    }

    /// The active variant context.
    pub fn active(&self) -> &VariantMap {
        &self.active
    }

    /// Set the active variant context.
    pub fn set_active(&mut self, active: VariantMap) {
        self.active = active;
    }

    // Authoring

    /// Return the id of the rule for `(selector, conditions)` in the default
    /// sheet, creating an empty one if none exists.
    pub fn ensure_rule(&mut self, selector: Selector, conditions: VariantMap) -> RuleId {
        self.store.ensure_rule(selector, conditions)
    }

    /// [`ensure_rule`](Self::ensure_rule) against a specific sheet.
    pub fn ensure_rule_in(
        &mut self,
        sheet: &SheetId,
        selector: Selector,
        conditions: VariantMap,
    ) -> Result<RuleId> {
        self.store.ensure_rule_in(sheet, selector, conditions)
    }

    /// Append a caller-built rule to a sheet.
    pub fn insert_rule(&mut self, sheet: &SheetId, rule: StyleRule) -> Result<RuleId> {
        self.store.insert_rule(sheet, rule)
    }

    /// Shallow-merge a patch into a rule's declarations.
    ///
    /// Returns `false` if no rule has that id.
    pub fn set_decl(&mut self, id: &RuleId, patch: &Declaration) -> bool {
        self.set_decl_with(id, patch, &mut Diagnostics::new())
    }

    /// [`set_decl`](Self::set_decl), reporting a missing rule.
    pub fn set_decl_with(
        &mut self,
        id: &RuleId,
        patch: &Declaration,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let found = self.store.set_decl(id, patch);
        if !found {
            diagnostics.push(Diagnostic::RuleNotFound { id: id.clone() });
        }
        found
    }

    /// Remove a rule. Returns `false` if no rule has that id.
    pub fn remove_rule(&mut self, id: &RuleId) -> bool {
        self.remove_rule_with(id, &mut Diagnostics::new())
    }

    /// [`remove_rule`](Self::remove_rule), reporting a missing rule.
    pub fn remove_rule_with(&mut self, id: &RuleId, diagnostics: &mut Diagnostics) -> bool {
        let found = self.store.remove_rule(id);
        if !found {
            diagnostics.push(Diagnostic::RuleNotFound { id: id.clone() });
        }
        found
    }

    /// Append an empty sheet.
    pub fn add_sheet(&mut self, id: impl Into<SheetId>, name: impl Into<String>) -> Result<()> {
        self.store.add_sheet(id, name)
    }

    /// Remove a sheet and its rules.
    pub fn remove_sheet(&mut self, id: &SheetId) -> Option<StyleSheet> {
        self.store.remove_sheet(id)
    }

    /// Connect a mutation hook.
    pub fn on_mutation<F>(&mut self, hook: F)
    where
        F: Fn(&Mutation) + Send + Sync + 'static,
    {
        self.store.on_mutation(hook);
    }

    // Resolution

    /// Effective declarations for an entity under `active`.
    ///
    /// Token references are left in place.
    pub fn resolve<E>(&self, entity: &E, active: &VariantMap) -> Declaration
    where
        E: StyledEntity + ?Sized,
    {
        let context = entity.match_context();
        let effective = fold_rules(self.store.list_matching(&context, active));
        tracing::trace!(
            target: targets::RESOLVE,
            entity = context.id,
            keys = effective.len(),
            "resolved declarations"
        );
        effective
    }

    /// Effective declarations with token references followed.
    pub fn resolve_values<E: StyledEntity + ?Sized>(
        &self,
        entity: &E,
        active: &VariantMap,
    ) -> BTreeMap<String, ResolvedValue> {
        self.resolve(entity, active)
            .iter()
            .map(|(key, value)| (key.to_string(), self.tokens.deref(value)))
            .collect()
    }

    /// Per-breakpoint view of an entity's declarations under the active
    /// context.
    pub fn cascade<E: StyledEntity + ?Sized>(&self, entity: &E) -> CascadeView {
        inspect(&self.store, &entity.match_context(), &self.active)
    }

    // Compilation

    /// Compile the whole store under `active`.
    pub fn compile(&self, active: &VariantMap) -> String {
        self.compile_with(active, &mut Diagnostics::new())
    }

    /// [`compile`](Self::compile), recording what was dropped.
    pub fn compile_with(&self, active: &VariantMap, diagnostics: &mut Diagnostics) -> String {
        StylesheetEmitter::new(&self.config).emit_with(
            &self.store,
            active,
            &self.tokens,
            diagnostics,
        )
    }

    /// Stylesheet for the active context, recompiled only when the rules,
    /// the tokens or the active context changed since the last call.
    pub fn stylesheet(&mut self) -> &str {
        let fresh = self.compiled.as_ref().is_some_and(|compiled| {
            compiled.store_revision == self.store.revision()
                && compiled.token_revision == self.token_revision
                && compiled.active == self.active
        });

        if !fresh {
            let text = self.compile(&self.active);
            self.compiled = Some(Compiled {
                store_revision: self.store.revision(),
                token_revision: self.token_revision,
                active: self.active.clone(),
                text,
            });
        } else {
            tracing::trace!(target: targets::COMPILE, "reusing compiled stylesheet");
        }

        match &self.compiled {
            Some(compiled) => &compiled.text,
            None => "",
        }
    }

    /// Push the current stylesheet through a cached sink.
    ///
    /// Returns whether the sink was written.
    pub fn render_to<S: StyleSink>(&mut self, sink: &mut CachedSink<S>) -> bool {
        let text = self.stylesheet();
        sink.inject_if_changed(text)
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("store", &self.store)
            .field("tokens", &self.tokens.len())
            .field("token_revision", &self.token_revision)
            .field("active", &self.active)
            .field("compiled", &self.compiled.is_some())
            .finish()
    }
}
