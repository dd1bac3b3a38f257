//! Stylesheet snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StyleRule;

/// Identifier of a sheet within a rule store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(String);

impl SheetId {
    /// Create a sheet id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SheetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SheetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An owned, ordered collection of rules.
///
/// This is the exchange format for a sheet: what the document model
/// persists and what [`RuleStore::from_sheets`](super::RuleStore::from_sheets)
/// loads. Rule order is merge priority: later rules win on key conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Sheet id.
    pub id: SheetId,
    /// Human-readable name.
    pub name: String,
    /// Rules in priority order.
    #[serde(default)]
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Create an empty sheet.
    pub fn new(id: impl Into<SheetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules: vec![],
        }
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the sheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{Selector, VariantMap};

    #[test]
    fn stylesheet_creation() {
        let mut sheet = StyleSheet::new("theme", "Theme");
        assert!(sheet.is_empty());

        sheet.add_rule(StyleRule::new("r1", Selector::type_selector("Button"), VariantMap::new()));

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].id.as_str(), "r1");
    }

    #[test]
    fn rule_ordering() {
        let sheet = StyleSheet::new("app", "App")
            .with_rule(StyleRule::new("a", Selector::type_selector("A"), VariantMap::new()))
            .with_rule(StyleRule::new("b", Selector::type_selector("B"), VariantMap::new()))
            .with_rule(StyleRule::new("c", Selector::type_selector("C"), VariantMap::new()));

        let ids: Vec<_> = sheet.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
