//! Collector for recoverable problems.
//!
//! Resolution and compilation are total: a missing token, an unknown
//! breakpoint or a malformed rule degrades the output instead of failing.
//! Callers that want to know what was dropped pass a [`Diagnostics`] to the
//! `*_with` variants of the engine operations.

use std::fmt;

use crate::rules::RuleId;
use crate::tokens::TokenId;

/// A single recoverable problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A declaration referenced a token missing from the table.
    UnresolvedToken { token: TokenId, property: String },
    /// An operation named a rule id that is not in the store.
    RuleNotFound { id: RuleId },
    /// A rule's `screen` condition names no configured breakpoint.
    UnknownBreakpoint { rule: RuleId, screen: String },
    /// A rule's selector or conditions are malformed; the rule was skipped.
    MalformedRule { rule: RuleId },
    /// Two tokens map to the same custom property; only the first is declared.
    DuplicateVariable {
        name: String,
        kept: TokenId,
        dropped: TokenId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedToken { token, property } => {
                write!(f, "unresolved token '{token}' in property '{property}'")
            }
            Self::RuleNotFound { id } => write!(f, "no rule with id '{id}'"),
            Self::UnknownBreakpoint { rule, screen } => {
                write!(f, "rule '{rule}' uses unknown breakpoint '{screen}'")
            }
            Self::MalformedRule { rule } => write!(f, "rule '{rule}' is malformed and was skipped"),
            Self::DuplicateVariable {
                name,
                kept,
                dropped,
            } => write!(
                f,
                "tokens '{kept}' and '{dropped}' both declare '{name}'; '{dropped}' was dropped"
            ),
        }
    }
}

/// Accumulates [`Diagnostic`]s across one or more operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over recorded diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Tokens that failed to resolve, in the order they were seen.
    pub fn unresolved_tokens(&self) -> impl Iterator<Item = &TokenId> {
        self.entries.iter().filter_map(|d| match d {
            Diagnostic::UnresolvedToken { token, .. } => Some(token),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
