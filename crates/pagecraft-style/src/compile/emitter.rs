//! Stylesheet text generation.

use std::collections::BTreeMap;

use super::declaration::{DeclarationCompiler, FONT_PARTS, font_part_var, render_scalar};
use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::logging::targets;
use crate::rules::{RuleStore, StyleRule, StyleSheet};
use crate::selector::{Selector, VariantMap};
use crate::tokens::{TokenId, TokenTable, TokenValue};

/// States that map onto a native pseudo-class of the same name.
const PSEUDO_STATES: &[&str] = &[
    "hover",
    "focus",
    "active",
    "disabled",
    "checked",
    "focus-visible",
    "focus-within",
];

/// Turns rules and tokens into stylesheet text.
///
/// The output is a custom-property preamble for the token table followed by
/// one block per non-empty rule, in store order, joined by newlines. The
/// text depends only on its inputs, so identical inputs give identical
/// bytes.
#[derive(Debug, Clone, Copy)]
pub struct StylesheetEmitter<'a> {
    config: &'a EngineConfig,
}

impl<'a> StylesheetEmitter<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Emit every rule in the store.
    pub fn emit(&self, store: &RuleStore, active: &VariantMap, tokens: &TokenTable) -> String {
        self.emit_with(store, active, tokens, &mut Diagnostics::new())
    }

    /// Emit every rule in the store, recording dropped content.
    pub fn emit_with(
        &self,
        store: &RuleStore,
        active: &VariantMap,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> String {
        self.emit_rules(store.rules(), active, tokens, diagnostics)
    }

    /// Emit owned sheets, in order.
    pub fn emit_sheets(
        &self,
        sheets: &[StyleSheet],
        active: &VariantMap,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> String {
        self.emit_rules(sheets.iter().flat_map(StyleSheet::iter), active, tokens, diagnostics)
    }

    /// Emit an arbitrary rule sequence.
    pub fn emit_rules<'r>(
        &self,
        rules: impl IntoIterator<Item = &'r StyleRule>,
        active: &VariantMap,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let _span = tracing::debug_span!(target: targets::COMPILE, "emit").entered();

        let mut blocks = Vec::new();
        if let Some(preamble) = self.token_preamble_with(tokens, diagnostics) {
            blocks.push(preamble);
        }

        let mut skipped = 0usize;
        for rule in rules {
            match self.rule_block(rule, active, tokens, diagnostics) {
                Some(block) => blocks.push(block),
                None => skipped += 1,
            }
        }

        let text = blocks.join("\n");
        tracing::debug!(
            target: targets::COMPILE,
            blocks = blocks.len(),
            skipped,
            bytes = text.len(),
            "stylesheet emitted"
        );
        text
    }

    /// The `:root` block declaring one custom property per token.
    ///
    /// Returns `None` for an empty table.
    pub fn token_preamble(&self, tokens: &TokenTable) -> Option<String> {
        self.token_preamble_with(tokens, &mut Diagnostics::new())
    }

    /// Like [`token_preamble`](Self::token_preamble), recording tokens whose
    /// custom property name was already declared by an earlier token.
    pub fn token_preamble_with(
        &self,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        if tokens.is_empty() {
            return None;
        }

        let unit = &self.config.length_unit;
        let mut declared: BTreeMap<String, &TokenId> = BTreeMap::new();
        let mut body = String::new();
        for token in tokens.iter() {
            let properties: Vec<(String, String)> = match &token.value {
                TokenValue::Scalar(scalar) => {
                    let value = render_scalar(scalar, token.kind.is_length(), unit);
                    vec![(token.id.var_name(), value)]
                }
                TokenValue::Font(bundle) => FONT_PARTS
                    .iter()
                    .map(|(part, _)| {
                        let value = match *part {
                            "family" => bundle.family.clone(),
                            "size" => render_scalar(&bundle.size, true, unit),
                            "line-height" => render_scalar(&bundle.line_height, false, unit),
                            _ => render_scalar(&bundle.weight, false, unit),
                        };
                        (font_part_var(&token.id, part), value)
                    })
                    .collect(),
            };

            for (name, value) in properties {
                if let Some(kept) = declared.get(&name) {
                    tracing::warn!(
                        target: targets::COMPILE,
                        name = %name,
                        kept = %kept,
                        dropped = %token.id,
                        "custom property declared twice"
                    );
                    diagnostics.push(Diagnostic::DuplicateVariable {
                        name,
                        kept: (*kept).clone(),
                        dropped: token.id.clone(),
                    });
                    continue;
                }
                push_property(&mut body, &name, &value);
                declared.insert(name, &token.id);
            }
        }

        Some(format!(":root{{{body}}}"))
    }

    /// Selector text for a rule, including theme and state qualifiers.
    pub fn selector_text(&self, rule: &StyleRule, active: &VariantMap) -> String {
        let config = self.config;
        let mut text = String::new();

        let theme = rule.conditions.theme_value().or_else(|| {
            if config.qualify_active_theme {
                active.theme_value()
            } else {
                None
            }
        });
        if let Some(theme) = theme {
            text.push_str(&attribute_selector(&config.theme_attribute, theme));
            text.push(' ');
        }

        match &rule.selector {
            Selector::Entity(id) => {
                text.push_str(&attribute_selector(&config.entity_attribute, id));
            }
            Selector::Type(type_name) => {
                text.push_str(&attribute_selector(&config.type_attribute, type_name));
            }
            Selector::Class(class) => {
                text.push('.');
                push_escaped_ident(&mut text, class);
            }
        }

        if let Some(state) = rule.conditions.state_value() {
            text.push_str(&self.state_qualifier(state));
        }

        text
    }

    fn state_qualifier(&self, state: &str) -> String {
        if state == "pressed" {
            ":active".to_string()
        } else if PSEUDO_STATES.contains(&state) {
            format!(":{state}")
        } else {
            attribute_selector(&self.config.state_attribute, state)
        }
    }

    /// One rule's block, or `None` if it contributes nothing.
    pub fn rule_block(
        &self,
        rule: &StyleRule,
        active: &VariantMap,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        if !rule.is_well_formed() {
            tracing::warn!(target: targets::COMPILE, rule = %rule.id, "skipping malformed rule");
            diagnostics.push(Diagnostic::MalformedRule { rule: rule.id.clone() });
            return None;
        }

        let query = match rule.conditions.screen_value() {
            None => None,
            Some(screen) => match self.config.breakpoint(screen) {
                Some(breakpoint) => breakpoint.query.as_deref(),
                None => {
                    tracing::warn!(
                        target: targets::COMPILE,
                        rule = %rule.id,
                        screen,
                        "unknown breakpoint"
                    );
                    diagnostics.push(Diagnostic::UnknownBreakpoint {
                        rule: rule.id.clone(),
                        screen: screen.to_string(),
                    });
                    return None;
                }
            },
        };

        let pairs = DeclarationCompiler::new(self.config).compile_with(
            &rule.declarations,
            tokens,
            diagnostics,
        );
        let mut body = String::new();
        for (property, value) in &pairs {
            if !value.is_empty() {
                push_property(&mut body, property, value);
            }
        }
        if body.is_empty() {
            return None;
        }

        let block = format!("{}{{{}}}", self.selector_text(rule, active), body);
        Some(match query {
            Some(query) => format!("@media {query}{{{block}}}"),
            None => block,
        })
    }
}

fn push_property(body: &mut String, property: &str, value: &str) {
    body.push_str(property);
    body.push(':');
    body.push_str(value);
    body.push(';');
}

fn attribute_selector(name: &str, value: &str) -> String {
    let mut out = String::with_capacity(name.len() + value.len() + 5);
    out.push('[');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        if c.is_control() {
            push_code_point(&mut out, c);
            continue;
        }
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"]");
    out
}

/// Append `ident` so it reads back as a single identifier.
///
/// Characters outside `[A-Za-z0-9_-]` and non-ASCII are backslash-escaped;
/// a digit in leading position (after an optional `-`) becomes a code point
/// escape.
fn push_escaped_ident(out: &mut String, ident: &str) {
    if ident == "-" {
        out.push_str("\\-");
        return;
    }
    let dashed = ident.starts_with('-');
    for (i, c) in ident.chars().enumerate() {
        let leading = i == 0 || (i == 1 && dashed);
        if (c.is_ascii_digit() && leading) || c.is_control() {
            push_code_point(out, c);
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
}

fn push_code_point(out: &mut String, c: char) {
    out.push('\\');
    out.push_str(&format!("{:x}", u32::from(c)));
    out.push(' ');
}
