//! Single style rule definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Declaration;
use crate::selector::{Selector, VariantMap};

/// Unique identifier of a style rule within a rule store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a rule id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A style rule binding declarations to a selector under variant conditions.
///
/// The pair `(selector, conditions)` is the rule's identity for upserts;
/// the `id` is what authoring code holds on to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Unique rule id.
    pub id: RuleId,
    /// Which entities the rule targets.
    pub selector: Selector,
    /// Variant conditions under which the rule applies.
    #[serde(default)]
    pub conditions: VariantMap,
    /// Authored declarations.
    #[serde(default)]
    pub declarations: Declaration,
}

impl StyleRule {
    /// Create a rule with empty declarations.
    pub fn new(id: impl Into<RuleId>, selector: Selector, conditions: VariantMap) -> Self {
        Self {
            id: id.into(),
            selector,
            conditions,
            declarations: Declaration::new(),
        }
    }

    /// Builder: set the declarations.
    pub fn with_declarations(mut self, declarations: Declaration) -> Self {
        self.declarations = declarations;
        self
    }

    /// Check if this rule has the given identity.
    pub fn has_identity(&self, selector: &Selector, conditions: &VariantMap) -> bool {
        &self.selector == selector && &self.conditions == conditions
    }

    /// Check that both selector and conditions are well formed.
    pub fn is_well_formed(&self) -> bool {
        self.selector.is_well_formed() && self.conditions.is_well_formed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_creation() {
        let rule = StyleRule::new("r1", Selector::type_selector("Button"), VariantMap::new());

        assert_eq!(rule.id.as_str(), "r1");
        assert!(rule.declarations.is_empty());
        assert!(rule.is_well_formed());
    }

    #[test]
    fn identity_compares_selector_and_conditions() {
        let button = Selector::type_selector("Button");
        let rule = StyleRule::new("r1", button.clone(), VariantMap::screen("mobile"));

        assert!(rule.has_identity(&button, &VariantMap::screen("mobile")));
        assert!(!rule.has_identity(&Selector::type_selector("Button"), &VariantMap::new()));
        assert!(!rule.has_identity(&Selector::class("Button"), &VariantMap::screen("mobile")));
    }

    #[test]
    fn rule_deserializes_with_defaults() {
        let rule: StyleRule = serde_json::from_str(
            r#"{ "id": "r9", "selector": { "by": "entity", "value": "hero" } }"#,
        )
        .unwrap();

        assert_eq!(rule.selector, Selector::entity("hero"));
        assert!(rule.conditions.is_empty());
        assert!(rule.declarations.is_empty());
    }
}
