//! Token definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a design token, e.g. `color.primary`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Create a token id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Custom property name generated for this token.
    ///
    /// Dots and any other character that is not alphanumeric, `-` or `_`
    /// become `-`, so `color.primary` maps to `--color-primary`.
    ///
    /// The mapping is not injective: `color.primary` and `color-primary`
    /// share a name. The preamble declares the first such token and reports
    /// the rest as [`Diagnostic::DuplicateVariable`].
    ///
    /// [`Diagnostic::DuplicateVariable`]: crate::diagnostics::Diagnostic::DuplicateVariable
    pub fn var_name(&self) -> String {
        let mut name = String::with_capacity(self.0.len() + 2);
        name.push_str("--");
        name.extend(self.0.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        }));
        name
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a token describes. Controls how numeric values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Color,
    Space,
    Font,
    Radius,
    Shadow,
    Size,
    Opacity,
    #[serde(rename = "z-index")]
    ZIndex,
    #[default]
    Other,
}

impl TokenKind {
    /// Whether numeric values of this kind are lengths.
    pub fn is_length(self) -> bool {
        matches!(self, Self::Space | Self::Radius | Self::Size | Self::Font)
    }
}

/// A single token value: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Family, size, line height and weight carried together by a font token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBundle {
    pub family: String,
    pub size: Scalar,
    pub line_height: Scalar,
    pub weight: Scalar,
}

impl FontBundle {
    /// Create a font bundle.
    pub fn new(
        family: impl Into<String>,
        size: impl Into<Scalar>,
        line_height: impl Into<Scalar>,
        weight: impl Into<Scalar>,
    ) -> Self {
        Self {
            family: family.into(),
            size: size.into(),
            line_height: line_height.into(),
            weight: weight.into(),
        }
    }
}

/// Value of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Font(FontBundle),
    Scalar(Scalar),
}

/// A named design value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(default)]
    pub kind: TokenKind,
    pub value: TokenValue,
}

impl Token {
    /// Create a token.
    pub fn new(id: impl Into<TokenId>, kind: TokenKind, value: TokenValue) -> Self {
        Self {
            id: id.into(),
            kind,
            value,
        }
    }

    /// Create a color token.
    pub fn color(id: impl Into<TokenId>, value: impl Into<String>) -> Self {
        Self::new(id, TokenKind::Color, TokenValue::Scalar(Scalar::Text(value.into())))
    }

    /// Create a spacing token.
    pub fn space(id: impl Into<TokenId>, value: impl Into<Scalar>) -> Self {
        Self::new(id, TokenKind::Space, TokenValue::Scalar(value.into()))
    }

    /// Create a radius token.
    pub fn radius(id: impl Into<TokenId>, value: impl Into<Scalar>) -> Self {
        Self::new(id, TokenKind::Radius, TokenValue::Scalar(value.into()))
    }

    /// Create a shadow token.
    pub fn shadow(id: impl Into<TokenId>, value: impl Into<String>) -> Self {
        Self::new(id, TokenKind::Shadow, TokenValue::Scalar(Scalar::Text(value.into())))
    }

    /// Create a font token.
    pub fn font(id: impl Into<TokenId>, bundle: FontBundle) -> Self {
        Self::new(id, TokenKind::Font, TokenValue::Font(bundle))
    }

    /// The font bundle, if this is a font token.
    pub fn as_font(&self) -> Option<&FontBundle> {
        match &self.value {
            TokenValue::Font(bundle) => Some(bundle),
            TokenValue::Scalar(_) => None,
        }
    }
}
