//! Style-graph resolution and stylesheet compilation for Pagecraft.
//!
//! This crate decides which style declarations apply to a page entity and
//! turns the whole rule set into stylesheet text, featuring:
//!
//! - **Rules**: sheets of rules keyed by selector and variant conditions,
//!   with idempotent upserts and shallow declaration patches
//! - **Variants**: exact-match conditions over screen, theme and state
//! - **Tokens**: named design values referenced by declarations and
//!   emitted as custom properties
//! - **Compilation**: shorthand expansion, media-query wrapping and theme
//!   and state qualifiers
//! - **Caching**: memoized compiles and hash-gated injection
//! - **Inspection**: a per-breakpoint view of where each value comes from
//!
//! # Example
//!
//! ```
//! use pagecraft_style::prelude::*;
//!
//! let mut engine = StyleEngine::default()
//!     .with_tokens(TokenTable::new().with(Token::color("color.primary", "#3b82f6")));
//!
//! let id = engine.ensure_rule(Selector::type_selector("Button"), VariantMap::new());
//! engine.set_decl(&id, &Declaration::new().with("bg", DeclarationValue::token("color.primary")));
//!
//! let button = Entity::new("b1", "Button");
//! assert!(engine.resolve(&button, &VariantMap::new()).contains("bg"));
//!
//! let css = engine.stylesheet();
//! assert!(css.contains("background-color:var(--color-primary);"));
//! ```

pub mod compile;
pub mod config;
pub mod diagnostics;
pub mod entity;
pub mod logging;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod tokens;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::compile::{CachedSink, MemorySink, StyleSink, inject_if_changed};
    pub use crate::config::{Breakpoint, EngineConfig};
    pub use crate::diagnostics::{Diagnostic, Diagnostics};
    pub use crate::entity::{Entity, EntityContext, StyledEntity};
    pub use crate::resolve::{CascadeView, SharedStyleEngine, StyleEngine};
    pub use crate::rules::{
        Declaration, DeclarationValue, Mutation, RuleId, SheetId, StyleRule, StyleSheet,
    };
    pub use crate::selector::{Selector, VariantMap};
    pub use crate::tokens::{FontBundle, ResolvedValue, Token, TokenId, TokenTable};
}
