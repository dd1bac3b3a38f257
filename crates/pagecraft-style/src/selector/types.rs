//! Selector type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What a style rule targets.
///
/// Selectors are deliberately flat: there are no combinators, compound
/// parts or pseudo-classes. Interaction states live in the rule's variant
/// conditions instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "lowercase")]
pub enum Selector {
    /// Matches the one entity with this id.
    Entity(String),
    /// Matches every entity of this type/component identifier.
    Type(String),
    /// Matches every entity carrying this class.
    Class(String),
}

impl Selector {
    /// Create an entity selector.
    pub fn entity(id: impl Into<String>) -> Self {
        Self::Entity(id.into())
    }

    /// Create a type selector.
    pub fn type_selector(type_name: impl Into<String>) -> Self {
        Self::Type(type_name.into())
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::Class(class_name.into())
    }

    /// The referenced id, type name or class name.
    pub fn reference(&self) -> &str {
        match self {
            Self::Entity(r) | Self::Type(r) | Self::Class(r) => r,
        }
    }

    /// Check that the reference is usable for matching.
    ///
    /// Selectors built with the infallible constructors or deserialized from
    /// a document may carry an empty or blank reference. Such selectors never
    /// match anything.
    pub fn is_well_formed(&self) -> bool {
        let reference = self.reference();
        !reference.is_empty() && !reference.chars().any(char::is_whitespace)
    }

    /// Return the selector if it is well formed.
    pub fn validated(self) -> Result<Self> {
        if self.is_well_formed() {
            Ok(self)
        } else {
            let text = self.to_string();
            Err(Error::invalid_selector(
                text,
                "reference must be non-empty and contain no whitespace",
            ))
        }
    }
}

/// Short textual form: `#id`, `.class`, or a bare type name.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "#{}", id),
            Self::Class(class) => write!(f, ".{}", class),
            Self::Type(type_name) => write!(f, "{}", type_name),
        }
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let selector = if let Some(id) = s.strip_prefix('#') {
            Self::entity(id)
        } else if let Some(class) = s.strip_prefix('.') {
            Self::class(class)
        } else {
            Self::type_selector(s)
        };
        selector
            .validated()
            .map_err(|_| Error::invalid_selector(s, "expected '#id', '.class' or a type name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        assert_eq!(Selector::entity("node-1").to_string(), "#node-1");
        assert_eq!(Selector::class("primary").to_string(), ".primary");
        assert_eq!(Selector::type_selector("Button").to_string(), "Button");
    }

    #[test]
    fn selector_parse() {
        assert_eq!("#hero".parse::<Selector>().unwrap(), Selector::entity("hero"));
        assert_eq!(".card".parse::<Selector>().unwrap(), Selector::class("card"));
        assert_eq!(" Button ".parse::<Selector>().unwrap(), Selector::type_selector("Button"));
    }

    #[test]
    fn selector_parse_rejects_malformed() {
        assert!("".parse::<Selector>().is_err());
        assert!("#".parse::<Selector>().is_err());
        assert!(".a b".parse::<Selector>().is_err());
    }

    #[test]
    fn well_formed() {
        assert!(Selector::type_selector("Button").is_well_formed());
        assert!(!Selector::class("").is_well_formed());
        assert!(!Selector::entity("a b").is_well_formed());
        assert!(Selector::class(" ").validated().is_err());
    }

    #[test]
    fn selector_serde_shape() {
        let json = serde_json::to_string(&Selector::type_selector("Button")).unwrap();
        assert_eq!(json, r#"{"by":"type","value":"Button"}"#);

        let back: Selector = serde_json::from_str(r#"{"by":"class","value":"muted"}"#).unwrap();
        assert_eq!(back, Selector::class("muted"));
    }
}
