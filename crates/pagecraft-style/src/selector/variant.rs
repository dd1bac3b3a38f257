//! Variant conditions and the active variant context.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Well-known variant dimensions.
pub mod dimensions {
    /// Responsive breakpoint (`desktop`, `tablet`, `mobile`, ...).
    pub const SCREEN: &str = "screen";
    /// Color theme (`light`, `dark`, ...).
    pub const THEME: &str = "theme";
    /// Interaction state (`hover`, `focus`, ...).
    pub const STATE: &str = "state";
}

/// A partial assignment of values to variant dimensions.
///
/// Used both as a rule's conditions and as the active context. A missing
/// dimension means "unconstrained". Dimensions are open-ended; the ones in
/// [`dimensions`] get special treatment in emitted stylesheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantMap(BTreeMap<String, String>);

impl VariantMap {
    /// Create an empty map (a pure base condition).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a dimension.
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(dimension, value);
        self
    }

    /// Builder: set a dimension, rejecting empty names and values.
    pub fn try_with(self, dimension: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let dimension = dimension.into();
        let value = value.into();
        if dimension.trim().is_empty() || value.trim().is_empty() {
            return Err(Error::invalid_condition(
                dimension,
                value,
                "dimension and value must be non-empty",
            ));
        }
        Ok(self.with(dimension, value))
    }

    /// Shorthand for a `screen` condition.
    pub fn screen(value: impl Into<String>) -> Self {
        Self::new().with(dimensions::SCREEN, value)
    }

    /// Shorthand for a `theme` condition.
    pub fn theme(value: impl Into<String>) -> Self {
        Self::new().with(dimensions::THEME, value)
    }

    /// Shorthand for a `state` condition.
    pub fn state(value: impl Into<String>) -> Self {
        Self::new().with(dimensions::STATE, value)
    }

    /// Set a dimension, returning the previous value.
    pub fn set(
        &mut self,
        dimension: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(dimension.into(), value.into())
    }

    /// Remove a dimension, returning its value.
    pub fn remove(&mut self, dimension: &str) -> Option<String> {
        self.0.remove(dimension)
    }

    /// Get the value of a dimension.
    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.0.get(dimension).map(String::as_str)
    }

    /// Value of the `screen` dimension.
    pub fn screen_value(&self) -> Option<&str> {
        self.get(dimensions::SCREEN)
    }

    /// Value of the `theme` dimension.
    pub fn theme_value(&self) -> Option<&str> {
        self.get(dimensions::THEME)
    }

    /// Value of the `state` dimension.
    pub fn state_value(&self) -> Option<&str> {
        self.get(dimensions::STATE)
    }

    /// Number of constrained dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(dimension, value)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that every dimension and value is non-empty.
    pub fn is_well_formed(&self) -> bool {
        self.0
            .iter()
            .all(|(k, v)| !k.trim().is_empty() && !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Variant condition matching.
#[derive(Debug)]
pub struct VariantMatcher;

impl VariantMatcher {
    /// Check if a rule's conditions are compatible with the active context.
    ///
    /// Every dimension present in `conditions` must equal the active value
    /// exactly; absent dimensions are wildcards. The same policy applies to
    /// `screen`, `theme` and `state`. Malformed conditions never match.
    pub fn matches(conditions: &VariantMap, active: &VariantMap) -> bool {
        if !conditions.is_well_formed() {
            return false;
        }
        conditions
            .iter()
            .all(|(dimension, value)| active.get(dimension) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions_always_match() {
        let base = VariantMap::new();
        assert!(VariantMatcher::matches(&base, &VariantMap::new()));
        let active = VariantMap::theme("dark").with("screen", "mobile");
        assert!(VariantMatcher::matches(&base, &active));
    }

    #[test]
    fn unset_dimension_is_wildcard() {
        let conditions = VariantMap::screen("mobile");
        for theme in ["light", "dark", "sepia"] {
            let active = VariantMap::screen("mobile").with(dimensions::THEME, theme);
            assert!(VariantMatcher::matches(&conditions, &active));
        }
    }

    #[test]
    fn set_dimension_requires_exact_value() {
        let conditions = VariantMap::theme("dark");
        assert!(VariantMatcher::matches(&conditions, &VariantMap::theme("dark")));
        assert!(!VariantMatcher::matches(&conditions, &VariantMap::theme("light")));
        assert!(!VariantMatcher::matches(&conditions, &VariantMap::theme("Dark")));
        assert!(!VariantMatcher::matches(&conditions, &VariantMap::new()));
    }

    #[test]
    fn screen_uses_exact_match() {
        let conditions = VariantMap::screen("mobile");
        assert!(!VariantMatcher::matches(&conditions, &VariantMap::screen("tablet")));
    }

    #[test]
    fn multiple_dimensions_must_all_match() {
        let conditions = VariantMap::theme("dark").with(dimensions::STATE, "hover");
        let active = VariantMap::theme("dark").with(dimensions::STATE, "hover");
        assert!(VariantMatcher::matches(&conditions, &active));

        let active = VariantMap::theme("dark").with(dimensions::STATE, "focus");
        assert!(!VariantMatcher::matches(&conditions, &active));
    }

    #[test]
    fn malformed_conditions_never_match() {
        let conditions = VariantMap::new().with("theme", "");
        assert!(!VariantMatcher::matches(&conditions, &VariantMap::new().with("theme", "")));
        assert!(VariantMap::new().try_with("", "dark").is_err());
        assert!(VariantMap::new().try_with("theme", " ").is_err());
    }

    #[test]
    fn conditions_hash_by_content() {
        use std::collections::HashSet;

        let a: VariantMap = [("theme", "dark"), ("screen", "mobile")].into_iter().collect();
        let b = VariantMap::screen("mobile").with("theme", "dark");

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
