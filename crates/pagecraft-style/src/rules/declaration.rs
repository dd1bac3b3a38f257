//! Authored declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tokens::TokenId;

/// Value of a single declaration: a literal or a token reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclarationValue {
    /// Indirect reference to a design token.
    Token { token: TokenId },
    /// Numeric literal. Rendered with the configured length unit unless the
    /// property is unitless.
    Number(f64),
    /// Literal text, emitted as written.
    Text(String),
}

impl DeclarationValue {
    /// Create a token reference.
    pub fn token(id: impl Into<TokenId>) -> Self {
        Self::Token { token: id.into() }
    }

    /// The referenced token, if this is a token reference.
    pub fn as_token(&self) -> Option<&TokenId> {
        match self {
            Self::Token { token } => Some(token),
            _ => None,
        }
    }

    /// The number, if this is a numeric literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for DeclarationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DeclarationValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for DeclarationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DeclarationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<TokenId> for DeclarationValue {
    fn from(id: TokenId) -> Self {
        Self::Token { token: id }
    }
}

/// Values a patch replaced, keyed by property. `None` means the key was absent.
pub type PriorValues = BTreeMap<String, Option<DeclarationValue>>;

/// Property name to value map authored on a rule.
///
/// Keys come from the fixed vocabulary (`paddingX`, `bg`, `font`, ...) or
/// are passed through to the output. Merging is always shallow and
/// key-wise: a later value replaces an earlier one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Declaration(BTreeMap<String, DeclarationValue>);

impl Declaration {
    /// Create an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a property.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<DeclarationValue>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, returning the previous value.
    pub fn set(
        &mut self,
        property: impl Into<String>,
        value: impl Into<DeclarationValue>,
    ) -> Option<DeclarationValue> {
        self.0.insert(property.into(), value.into())
    }

    /// Get a property value.
    pub fn get(&self, property: &str) -> Option<&DeclarationValue> {
        self.0.get(property)
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<DeclarationValue> {
        self.0.remove(property)
    }

    /// Check if a property is set.
    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclarationValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow, key-wise overwrite merge of `patch` into `self`.
    pub fn merge(&mut self, patch: &Declaration) {
        for (property, value) in &patch.0 {
            self.0.insert(property.clone(), value.clone());
        }
    }

    /// Like [`merge`](Self::merge), but returns what each patched key held before.
    pub fn merge_capturing(&mut self, patch: &Declaration) -> PriorValues {
        patch
            .0
            .iter()
            .map(|(property, value)| {
                let previous = self.0.insert(property.clone(), value.clone());
                (property.clone(), previous)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<DeclarationValue>> FromIterator<(K, V)> for Declaration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_shallow_and_keywise() {
        let mut decl = Declaration::new();
        decl.merge(&Declaration::new().with("a", 1));
        decl.merge(&Declaration::new().with("b", 2));
        assert_eq!(decl, Declaration::new().with("a", 1).with("b", 2));

        decl.merge(&Declaration::new().with("a", 3));
        assert_eq!(decl, Declaration::new().with("a", 3).with("b", 2));
    }

    #[test]
    fn merge_replaces_token_with_literal() {
        let mut decl = Declaration::new().with("bg", DeclarationValue::token("color.primary"));
        decl.merge(&Declaration::new().with("bg", "red"));
        assert_eq!(decl.get("bg"), Some(&DeclarationValue::from("red")));
    }

    #[test]
    fn merge_capturing_reports_prior_values() {
        let mut decl = Declaration::new().with("a", 1);
        let prior = decl.merge_capturing(&Declaration::new().with("a", 2).with("b", "x"));

        assert_eq!(prior.get("a"), Some(&Some(DeclarationValue::Number(1.0))));
        assert_eq!(prior.get("b"), Some(&None));
        assert_eq!(decl.get("a"), Some(&DeclarationValue::Number(2.0)));
    }

    #[test]
    fn value_serde_shape() {
        let decl: Declaration = serde_json::from_str(
            r#"{ "bg": { "token": "color.primary" }, "paddingX": 16, "display": "flex" }"#,
        )
        .unwrap();

        assert_eq!(decl.get("bg"), Some(&DeclarationValue::token("color.primary")));
        assert_eq!(decl.get("paddingX"), Some(&DeclarationValue::Number(16.0)));
        assert_eq!(decl.get("display"), Some(&DeclarationValue::from("flex")));
    }
}
