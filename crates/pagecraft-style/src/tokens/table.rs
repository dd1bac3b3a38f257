//! Token lookup table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Token, TokenId};
use crate::rules::DeclarationValue;

/// Token table supplied to compilation.
///
/// Tokens are kept ordered by id so the generated custom-property preamble
/// is byte-stable across compiles. Swapping the whole table (for example on
/// a theme change) is done by replacing it on the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenTable {
    tokens: BTreeMap<TokenId, Token>,
}

/// A declaration value with token indirection followed.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// The value was a literal and is returned as authored.
    Literal(DeclarationValue),
    /// The value referenced a token present in the table.
    Token(Token),
    /// The value referenced a token missing from the table.
    Unresolved(TokenId),
}

impl ResolvedValue {
    /// Check whether the value names a missing token.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

impl TokenTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from tokens. Later tokens replace earlier ones with the same id.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut table = Self::new();
        for token in tokens {
            table.insert(token);
        }
        table
    }

    /// Add a token, returning the token it replaced.
    pub fn insert(&mut self, token: Token) -> Option<Token> {
        self.tokens.insert(token.id.clone(), token)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, token: Token) -> Self {
        self.insert(token);
        self
    }

    /// Look up a token by id.
    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Check if a token exists.
    pub fn contains(&self, id: &TokenId) -> bool {
        self.tokens.contains_key(id)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over tokens in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Follow a declaration value through the table.
    ///
    /// Never fails: a reference to a missing token yields
    /// [`ResolvedValue::Unresolved`].
    pub fn deref(&self, value: &DeclarationValue) -> ResolvedValue {
        match value.as_token() {
            Some(id) => match self.get(id) {
                Some(token) => ResolvedValue::Token(token.clone()),
                None => ResolvedValue::Unresolved(id.clone()),
            },
            None => ResolvedValue::Literal(value.clone()),
        }
    }
}

impl From<Vec<Token>> for TokenTable {
    fn from(tokens: Vec<Token>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<TokenTable> for Vec<Token> {
    fn from(table: TokenTable) -> Self {
        table.tokens.into_values().collect()
    }
}

impl FromIterator<Token> for TokenTable {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}
