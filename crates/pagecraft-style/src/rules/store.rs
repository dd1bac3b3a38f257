//! Rule store: sheets of ordered rules backed by an arena.
//!
//! Rules live in a [`SlotMap`] arena. Each sheet keeps the keys of its
//! rules in priority order, and an id index maps [`RuleId`]s to arena keys,
//! so lookups by id don't scan and removal doesn't shift other rules'
//! storage.

use std::collections::HashMap;
use std::fmt;

use slotmap::{SlotMap, new_key_type};

use super::{Declaration, PriorValues, RuleId, SheetId, StyleRule, StyleSheet};
use crate::entity::EntityContext;
use crate::logging::targets;
use crate::selector::{Selector, SelectorMatcher, VariantMap, VariantMatcher};
use crate::{Error, Result};

new_key_type! {
    /// Arena key of a stored rule.
    struct RuleKey;
}

/// Id of the sheet that always exists and backs [`RuleStore::ensure_rule`].
pub const DEFAULT_SHEET: &str = "default";

/// A change made to the rule store.
///
/// Hooks receive one of these after each mutation. Events carry enough of
/// the prior state for an external undo facility to reverse the change;
/// whether to keep that history is up to the embedder.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// A sheet was appended.
    SheetAdded { sheet: SheetId },
    /// A sheet and all its rules were removed from `position`.
    SheetRemoved { position: usize, sheet: StyleSheet },
    /// `ensure_rule` created a new, empty rule.
    RuleCreated { sheet: SheetId, id: RuleId },
    /// A caller-built rule was inserted.
    RuleInserted { sheet: SheetId, id: RuleId },
    /// Declarations were patched. `previous` holds the replaced values when
    /// pre-image capture is enabled.
    DeclarationsPatched {
        id: RuleId,
        previous: Option<PriorValues>,
    },
    /// A rule was removed from `position` within `sheet`.
    RuleRemoved {
        sheet: SheetId,
        position: usize,
        rule: StyleRule,
    },
}

/// Callback invoked after every store mutation.
pub type MutationHook = Box<dyn Fn(&Mutation) + Send + Sync>;

#[derive(Debug, Clone)]
struct SheetSlot {
    id: SheetId,
    name: String,
    keys: Vec<RuleKey>,
}

impl SheetSlot {
    fn new(id: SheetId, name: String) -> Self {
        Self {
            id,
            name,
            keys: vec![],
        }
    }
}

/// Borrowed view of one sheet in a [`RuleStore`].
#[derive(Clone, Copy)]
pub struct SheetRef<'a> {
    rules: &'a SlotMap<RuleKey, StyleRule>,
    slot: &'a SheetSlot,
}

impl<'a> SheetRef<'a> {
    /// Sheet id.
    pub fn id(&self) -> &'a SheetId {
        &self.slot.id
    }

    /// Sheet name.
    pub fn name(&self) -> &'a str {
        &self.slot.name
    }

    /// Number of rules in the sheet.
    pub fn len(&self) -> usize {
        self.slot.keys.len()
    }

    /// Check if the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.slot.keys.is_empty()
    }

    /// Rules in priority order.
    pub fn rules(self) -> impl Iterator<Item = &'a StyleRule> + 'a {
        let rules = self.rules;
        self.slot.keys.iter().filter_map(move |key| rules.get(*key))
    }

    /// Owned copy of the sheet.
    pub fn to_sheet(&self) -> StyleSheet {
        StyleSheet {
            id: self.slot.id.clone(),
            name: self.slot.name.clone(),
            rules: self.rules().cloned().collect(),
        }
    }
}

impl fmt::Debug for SheetRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetRef")
            .field("id", &self.slot.id)
            .field("name", &self.slot.name)
            .field("rules", &self.slot.keys.len())
            .finish()
    }
}

/// Named sheets of ordered style rules.
///
/// Sheet order is the outer priority tier and rule order within a sheet
/// the inner one; later rules win on conflicting keys. The store is a
/// single-writer structure: callers with several concurrent authors must
/// serialize mutations themselves (see
/// [`SharedStyleEngine`](crate::resolve::SharedStyleEngine)).
pub struct RuleStore {
    rules: SlotMap<RuleKey, StyleRule>,
    index: HashMap<RuleId, RuleKey>,
    sheets: Vec<SheetSlot>,
    next_id: u64,
    revision: u64,
    capture_pre_images: bool,
    hooks: Vec<MutationHook>,
}

impl RuleStore {
    /// Create a store holding only the empty default sheet.
    pub fn new() -> Self {
        Self {
            rules: SlotMap::with_key(),
            index: HashMap::new(),
            sheets: vec![SheetSlot::new(DEFAULT_SHEET.into(), "Default".to_string())],
            next_id: 0,
            revision: 0,
            capture_pre_images: true,
            hooks: vec![],
        }
    }

    /// Build a store from sheet snapshots, in order.
    ///
    /// A sheet with the default id takes the default sheet's place at its
    /// input position; if no input sheet has that id, an empty default sheet
    /// is kept first. Fails on duplicate sheet or rule ids.
    pub fn from_sheets(sheets: impl IntoIterator<Item = StyleSheet>) -> Result<Self> {
        let sheets: Vec<StyleSheet> = sheets.into_iter().collect();
        let mut store = Self::new();
        if sheets.iter().any(|sheet| sheet.id.as_str() == DEFAULT_SHEET) {
            store.sheets.clear();
        }

        for sheet in sheets {
            store.add_sheet(sheet.id.clone(), sheet.name)?;
            for rule in sheet.rules {
                store.insert_rule(&sheet.id, rule)?;
            }
        }
        Ok(store)
    }

    /// Owned snapshots of every sheet, in priority order.
    pub fn to_sheets(&self) -> Vec<StyleSheet> {
        self.sheets().map(|sheet| sheet.to_sheet()).collect()
    }

    /// Enable or disable prior-value capture in [`Mutation::DeclarationsPatched`].
    pub fn set_capture_pre_images(&mut self, capture: bool) {
        self.capture_pre_images = capture;
    }

    /// Register a hook called after every mutation.
    pub fn on_mutation<F>(&mut self, hook: F)
    where
        F: Fn(&Mutation) + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Counter bumped by every mutation. Used to detect stale compiles.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn notify(&self, event: impl FnOnce() -> Mutation) {
        if self.hooks.is_empty() {
            return;
        }
        let event = event();
        for hook in &self.hooks {
            hook(&event);
        }
    }

    // -------------------------------------------------------------------------
    // Sheets
    // -------------------------------------------------------------------------

    /// Append a sheet. Later sheets take priority over earlier ones.
    pub fn add_sheet(&mut self, id: impl Into<SheetId>, name: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.sheet_position(&id).is_some() {
            return Err(Error::DuplicateSheet(id));
        }

        tracing::debug!(target: targets::STORE, sheet = %id, "added sheet");
        self.sheets.push(SheetSlot::new(id.clone(), name.into()));
        self.touch();
        self.notify(|| Mutation::SheetAdded { sheet: id });
        Ok(())
    }

    /// Remove a sheet and all its rules.
    ///
    /// The default sheet cannot be removed; asking for it, or for an unknown
    /// sheet, returns `None`.
    pub fn remove_sheet(&mut self, id: &SheetId) -> Option<StyleSheet> {
        if id.as_str() == DEFAULT_SHEET {
            tracing::warn!(target: targets::STORE, "refusing to remove the default sheet");
            return None;
        }
        let position = self.sheet_position(id)?;
        let slot = self.sheets.remove(position);

        let mut rules = Vec::with_capacity(slot.keys.len());
        for key in slot.keys {
            if let Some(rule) = self.rules.remove(key) {
                self.index.remove(&rule.id);
                rules.push(rule);
            }
        }
        let sheet = StyleSheet {
            id: slot.id,
            name: slot.name,
            rules,
        };

        tracing::debug!(
            target: targets::STORE,
            sheet = %sheet.id,
            rules = sheet.len(),
            "removed sheet"
        );
        self.touch();
        self.notify(|| Mutation::SheetRemoved {
            position,
            sheet: sheet.clone(),
        });
        Some(sheet)
    }

    /// Look up a sheet.
    pub fn sheet(&self, id: &SheetId) -> Option<SheetRef<'_>> {
        let rules = &self.rules;
        self.sheets
            .iter()
            .find(|slot| &slot.id == id)
            .map(|slot| SheetRef { rules, slot })
    }

    /// Iterate over sheets in priority order.
    pub fn sheets(&self) -> impl Iterator<Item = SheetRef<'_>> {
        let rules = &self.rules;
        self.sheets.iter().map(move |slot| SheetRef { rules, slot })
    }

    /// Number of sheets, including the default sheet.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet_position(&self, id: &SheetId) -> Option<usize> {
        self.sheets.iter().position(|slot| &slot.id == id)
    }

    fn default_sheet_position(&mut self) -> usize {
        let id = SheetId::new(DEFAULT_SHEET);
        match self.sheet_position(&id) {
            Some(position) => position,
            None => {
                self.sheets.insert(0, SheetSlot::new(id, "Default".to_string()));
                0
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rules
    // -------------------------------------------------------------------------

    /// Return the id of the default-sheet rule with this identity, creating
    /// an empty one if there is none.
    ///
    /// Idempotent: repeated calls with an equal `(selector, conditions)`
    /// pair return the same id and never duplicate the rule or touch its
    /// declarations.
    pub fn ensure_rule(&mut self, selector: Selector, conditions: VariantMap) -> RuleId {
        let position = self.default_sheet_position();
        self.ensure_at(position, selector, conditions)
    }

    /// Like [`ensure_rule`](Self::ensure_rule), within a specific sheet.
    pub fn ensure_rule_in(
        &mut self,
        sheet: &SheetId,
        selector: Selector,
        conditions: VariantMap,
    ) -> Result<RuleId> {
        let position = self
            .sheet_position(sheet)
            .ok_or_else(|| Error::UnknownSheet(sheet.clone()))?;
        Ok(self.ensure_at(position, selector, conditions))
    }

    fn ensure_at(&mut self, position: usize, selector: Selector, conditions: VariantMap) -> RuleId {
        let existing = self.sheets[position]
            .keys
            .iter()
            .filter_map(|key| self.rules.get(*key))
            .find(|rule| rule.has_identity(&selector, &conditions));
        if let Some(rule) = existing {
            return rule.id.clone();
        }

        let id = self.next_rule_id();
        let key = self
            .rules
            .insert(StyleRule::new(id.clone(), selector, conditions));
        self.index.insert(id.clone(), key);
        self.sheets[position].keys.push(key);

        let sheet = self.sheets[position].id.clone();
        tracing::debug!(target: targets::STORE, rule = %id, sheet = %sheet, "created rule");
        self.touch();
        self.notify(|| Mutation::RuleCreated {
            sheet,
            id: id.clone(),
        });
        id
    }

    fn next_rule_id(&mut self) -> RuleId {
        loop {
            self.next_id += 1;
            let id = RuleId::new(format!("rule-{}", self.next_id));
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Find the rule with this identity in a sheet.
    pub fn find_rule(
        &self,
        sheet: &SheetId,
        selector: &Selector,
        conditions: &VariantMap,
    ) -> Option<&StyleRule> {
        self.sheet(sheet)?
            .rules()
            .find(|rule| rule.has_identity(selector, conditions))
    }

    /// Append a caller-built rule to a sheet.
    ///
    /// Fails with [`Error::DuplicateRuleId`] if the id is already taken
    /// anywhere in the store.
    pub fn insert_rule(&mut self, sheet: &SheetId, rule: StyleRule) -> Result<RuleId> {
        let position = self
            .sheet_position(sheet)
            .ok_or_else(|| Error::UnknownSheet(sheet.clone()))?;
        if self.index.contains_key(&rule.id) {
            return Err(Error::DuplicateRuleId(rule.id));
        }

        let id = rule.id.clone();
        let key = self.rules.insert(rule);
        self.index.insert(id.clone(), key);
        self.sheets[position].keys.push(key);

        tracing::debug!(target: targets::STORE, rule = %id, sheet = %sheet, "inserted rule");
        self.touch();
        self.notify(|| Mutation::RuleInserted {
            sheet: sheet.clone(),
            id: id.clone(),
        });
        Ok(id)
    }

    /// Shallow-merge `patch` into a rule's declarations.
    ///
    /// Returns `false`, changing nothing, if the id is unknown.
    pub fn set_decl(&mut self, id: &RuleId, patch: &Declaration) -> bool {
        let Some(rule) = self.index.get(id).and_then(|key| self.rules.get_mut(*key)) else {
            tracing::debug!(target: targets::STORE, rule = %id, "set_decl on unknown rule");
            return false;
        };

        let previous = if self.capture_pre_images {
            Some(rule.declarations.merge_capturing(patch))
        } else {
            rule.declarations.merge(patch);
            None
        };

        tracing::debug!(
            target: targets::STORE,
            rule = %id,
            keys = patch.len(),
            "patched declarations"
        );
        self.touch();
        self.notify(|| Mutation::DeclarationsPatched {
            id: id.clone(),
            previous,
        });
        true
    }

    /// Delete a rule from whichever sheet holds it.
    ///
    /// Returns `false` if the id is unknown.
    pub fn remove_rule(&mut self, id: &RuleId) -> bool {
        let Some(key) = self.index.remove(id) else {
            tracing::debug!(target: targets::STORE, rule = %id, "remove_rule on unknown rule");
            return false;
        };
        let Some(rule) = self.rules.remove(key) else {
            return false;
        };

        let mut location = None;
        for slot in &mut self.sheets {
            if let Some(position) = slot.keys.iter().position(|k| *k == key) {
                slot.keys.remove(position);
                location = Some((slot.id.clone(), position));
                break;
            }
        }

        tracing::debug!(target: targets::STORE, rule = %id, "removed rule");
        self.touch();
        if let Some((sheet, position)) = location {
            self.notify(|| Mutation::RuleRemoved {
                sheet,
                position,
                rule,
            });
        }
        true
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &RuleId) -> Option<&StyleRule> {
        self.index.get(id).and_then(|key| self.rules.get(*key))
    }

    /// Check if a rule exists.
    pub fn contains_rule(&self, id: &RuleId) -> bool {
        self.index.contains_key(id)
    }

    /// Total number of rules across all sheets.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Check if the store has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule, in sheet order then in-sheet order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.sheets().flat_map(|sheet| sheet.rules())
    }

    /// Rules whose selector matches the entity, regardless of conditions.
    pub fn rules_for(&self, entity: &EntityContext<'_>) -> Vec<&StyleRule> {
        self.rules()
            .filter(|rule| SelectorMatcher::matches(&rule.selector, entity))
            .collect()
    }

    /// Rules whose selector matches the entity and whose conditions match
    /// the active context, in priority order.
    pub fn list_matching(
        &self,
        entity: &EntityContext<'_>,
        active: &VariantMap,
    ) -> Vec<&StyleRule> {
        let matched: Vec<_> = self
            .rules()
            .filter(|rule| {
                SelectorMatcher::matches(&rule.selector, entity)
                    && VariantMatcher::matches(&rule.conditions, active)
            })
            .collect();

        tracing::trace!(
            target: targets::RESOLVE,
            entity = entity.id,
            matched = matched.len(),
            "listed matching rules"
        );
        matched
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleStore")
            .field("sheets", &self.sheets.len())
            .field("rules", &self.rules.len())
            .field("revision", &self.revision)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::entity::{Entity, StyledEntity};
    use crate::rules::DeclarationValue;

    fn button() -> Entity {
        Entity::new("n1", "Button").with_class("primary")
    }

    #[test]
    fn ensure_rule_is_idempotent() {
        let mut store = RuleStore::new();

        let button = Selector::type_selector("Button");
        let first = store.ensure_rule(button.clone(), VariantMap::screen("mobile"));
        let count = store.rule_count();
        let second = store.ensure_rule(button, VariantMap::screen("mobile"));

        assert_eq!(first, second);
        assert_eq!(store.rule_count(), count);
        assert_eq!(count, 1);
    }

    #[test]
    fn ensure_rule_keeps_declarations() {
        let mut store = RuleStore::new();
        let id = store.ensure_rule(Selector::class("card"), VariantMap::new());
        store.set_decl(&id, &Declaration::new().with("bg", "white"));

        let again = store.ensure_rule(Selector::class("card"), VariantMap::new());
        assert_eq!(again, id);
        assert_eq!(
            store.rule(&id).unwrap().declarations.get("bg"),
            Some(&DeclarationValue::from("white"))
        );
    }

    #[test]
    fn distinct_identities_create_distinct_rules() {
        let mut store = RuleStore::new();
        let a = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        let b = store.ensure_rule(Selector::type_selector("Button"), VariantMap::theme("dark"));
        let c = store.ensure_rule(Selector::class("Button"), VariantMap::new());

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.rule_count(), 3);
    }

    #[test]
    fn ensure_rule_is_scoped_per_sheet() {
        let mut store = RuleStore::new();
        store.add_sheet("overrides", "Overrides").unwrap();
        let sheet = SheetId::new("overrides");

        let a = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        let b = store
            .ensure_rule_in(&sheet, Selector::type_selector("Button"), VariantMap::new())
            .unwrap();

        assert_ne!(a, b);
        let button = Selector::type_selector("Button");
        assert!(store.find_rule(&sheet, &button, &VariantMap::new()).is_some());
        assert!(matches!(
            store.ensure_rule_in(&SheetId::new("nope"), Selector::class("x"), VariantMap::new()),
            Err(Error::UnknownSheet(_))
        ));
    }

    #[test]
    fn set_decl_shallow_merges() {
        let mut store = RuleStore::new();
        let id = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());

        assert!(store.set_decl(&id, &Declaration::new().with("a", 1)));
        assert!(store.set_decl(&id, &Declaration::new().with("b", 2)));
        assert_eq!(
            store.rule(&id).unwrap().declarations,
            Declaration::new().with("a", 1).with("b", 2)
        );

        store.set_decl(&id, &Declaration::new().with("a", 3));
        assert_eq!(
            store.rule(&id).unwrap().declarations,
            Declaration::new().with("a", 3).with("b", 2)
        );
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut store = RuleStore::new();
        let revision = store.revision();

        assert!(!store.set_decl(&RuleId::new("ghost"), &Declaration::new().with("a", 1)));
        assert!(!store.remove_rule(&RuleId::new("ghost")));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn remove_rule_deletes_from_its_sheet() {
        let mut store = RuleStore::new();
        let a = store.ensure_rule(Selector::type_selector("A"), VariantMap::new());
        let b = store.ensure_rule(Selector::type_selector("B"), VariantMap::new());

        assert!(store.remove_rule(&a));
        assert!(!store.contains_rule(&a));
        let ids: Vec<_> = store.rules().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn insert_rule_rejects_duplicate_ids() {
        let mut store = RuleStore::new();
        let sheet = SheetId::new(DEFAULT_SHEET);
        store
            .insert_rule(&sheet, StyleRule::new("custom", Selector::class("a"), VariantMap::new()))
            .unwrap();

        let err = store
            .insert_rule(&sheet, StyleRule::new("custom", Selector::class("b"), VariantMap::new()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRuleId(id) if id.as_str() == "custom"));
        assert_eq!(store.rule_count(), 1);
    }

    #[test]
    fn generated_ids_skip_taken_ids() {
        let mut store = RuleStore::new();
        let sheet = SheetId::new(DEFAULT_SHEET);
        store
            .insert_rule(&sheet, StyleRule::new("rule-1", Selector::class("a"), VariantMap::new()))
            .unwrap();

        let id = store.ensure_rule(Selector::class("b"), VariantMap::new());
        assert_ne!(id.as_str(), "rule-1");
        assert_eq!(store.rule_count(), 2);
    }

    #[test]
    fn list_matching_preserves_sheet_then_rule_order() {
        let mut store = RuleStore::new();
        store.add_sheet("app", "App").unwrap();
        let app = SheetId::new("app");

        let late = store
            .ensure_rule_in(&app, Selector::class("primary"), VariantMap::new())
            .unwrap();
        let early = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        let middle = store.ensure_rule(Selector::entity("n1"), VariantMap::new());
        store.ensure_rule(Selector::type_selector("Label"), VariantMap::new());
        store.ensure_rule(Selector::type_selector("Button"), VariantMap::theme("dark"));

        let entity = button();
        let ids: Vec<_> = store
            .list_matching(&entity.match_context(), &VariantMap::theme("light"))
            .into_iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec![early, middle, late]);
    }

    #[test]
    fn remove_sheet_drops_its_rules() {
        let mut store = RuleStore::new();
        store.add_sheet("tmp", "Temporary").unwrap();
        let tmp = SheetId::new("tmp");
        let id = store.ensure_rule_in(&tmp, Selector::class("x"), VariantMap::new()).unwrap();

        let removed = store.remove_sheet(&tmp).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(!store.contains_rule(&id));
        assert!(store.remove_sheet(&SheetId::new(DEFAULT_SHEET)).is_none());
        assert_eq!(store.sheet_count(), 1);
    }

    #[test]
    fn duplicate_sheet_is_an_error() {
        let mut store = RuleStore::new();
        store.add_sheet("a", "A").unwrap();
        assert!(matches!(store.add_sheet("a", "Again"), Err(Error::DuplicateSheet(_))));
    }

    #[test]
    fn snapshot_round_trip_preserves_order() {
        let mut store = RuleStore::new();
        store.add_sheet("app", "App").unwrap();
        let a = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        store.set_decl(&a, &Declaration::new().with("paddingX", 16));
        store
            .ensure_rule_in(
                &SheetId::new("app"),
                Selector::class("primary"),
                VariantMap::theme("dark"),
            )
            .unwrap();

        let sheets = store.to_sheets();
        let rebuilt = RuleStore::from_sheets(sheets.clone()).unwrap();
        assert_eq!(rebuilt.to_sheets(), sheets);
    }

    #[test]
    fn from_sheets_keeps_default_sheet_position() {
        let app = StyleSheet::new("app", "App").with_rule(
            StyleRule::new("app-btn", Selector::type_selector("Button"), VariantMap::new())
                .with_declarations(Declaration::new().with("color", "red")),
        );
        let default = StyleSheet::new(DEFAULT_SHEET, "Page").with_rule(
            StyleRule::new("page-btn", Selector::type_selector("Button"), VariantMap::new())
                .with_declarations(Declaration::new().with("color", "blue")),
        );

        let store = RuleStore::from_sheets([app, default]).unwrap();

        let order: Vec<_> = store.sheets().map(|s| s.id().as_str()).collect();
        assert_eq!(order, ["app", DEFAULT_SHEET]);
        assert_eq!(store.to_sheets()[1].name, "Page");

        let entity = button();
        let matched = store.list_matching(&entity.match_context(), &VariantMap::new());
        let winner = matched.last().unwrap();
        assert_eq!(winner.declarations.get("color"), Some(&DeclarationValue::from("blue")));

        let fresh = RuleStore::from_sheets([StyleSheet::new("app", "App")]).unwrap();
        let order: Vec<_> = fresh.sheets().map(|s| s.id().as_str()).collect();
        assert_eq!(order, [DEFAULT_SHEET, "app"]);
    }

    #[test]
    fn hooks_see_mutations_with_pre_images() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut store = RuleStore::new();
        let sink = events.clone();
        store.on_mutation(move |m| sink.lock().push(m.clone()));

        let id = store.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
        store.set_decl(&id, &Declaration::new().with("bg", "red"));
        store.set_decl(&id, &Declaration::new().with("bg", "blue"));
        store.remove_rule(&id);

        let events = events.lock();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], Mutation::RuleCreated { id: created, .. } if *created == id));
        match &events[2] {
            Mutation::DeclarationsPatched { previous: Some(prior), .. } => {
                assert_eq!(prior.get("bg"), Some(&Some(DeclarationValue::from("red"))));
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[3] {
            Mutation::RuleRemoved { position, rule, .. } => {
                assert_eq!(*position, 0);
                assert_eq!(rule.declarations.get("bg"), Some(&DeclarationValue::from("blue")));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn pre_image_capture_can_be_disabled() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut store = RuleStore::new();
        store.set_capture_pre_images(false);
        let sink = events.clone();
        store.on_mutation(move |m| sink.lock().push(m.clone()));

        let id = store.ensure_rule(Selector::class("a"), VariantMap::new());
        store.set_decl(&id, &Declaration::new().with("bg", "red"));

        assert!(matches!(
            events.lock().last(),
            Some(Mutation::DeclarationsPatched { previous: None, .. })
        ));
    }
}
