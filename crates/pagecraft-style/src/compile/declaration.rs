//! Expansion of the declaration vocabulary into output properties.

use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::logging::targets;
use crate::rules::{Declaration, DeclarationValue};
use crate::tokens::{Scalar, TokenId, TokenTable};

/// Output properties whose numeric values carry no unit.
const UNITLESS: &[&str] = &[
    "opacity",
    "z-index",
    "font-weight",
    "line-height",
    "flex",
    "flex-grow",
    "flex-shrink",
    "order",
];

/// Vocabulary keys that expand to a fixed list of output properties.
const SHORTHANDS: &[(&str, &[&str])] = &[
    ("paddingX", &["padding-left", "padding-right"]),
    ("paddingY", &["padding-top", "padding-bottom"]),
    ("marginX", &["margin-left", "margin-right"]),
    ("marginY", &["margin-top", "margin-bottom"]),
    ("bg", &["background-color"]),
    ("radius", &["border-radius"]),
    ("shadow", &["box-shadow"]),
];

/// Sub-token suffixes of a font bundle and the property each one feeds.
pub(crate) const FONT_PARTS: [(&str, &str); 4] = [
    ("family", "font-family"),
    ("size", "font-size"),
    ("line-height", "line-height"),
    ("weight", "font-weight"),
];

/// Custom property name of one part of a font token.
pub(crate) fn font_part_var(id: &TokenId, part: &str) -> String {
    format!("{}-{}", id.var_name(), part)
}

/// Convert a camelCase key to the hyphenated output convention.
///
/// Keys that are already hyphenated pass through unchanged.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Format a number without a trailing `.0` for integral values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Render a token scalar. Non-finite numbers render empty.
pub(crate) fn render_scalar(scalar: &Scalar, length: bool, unit: &str) -> String {
    match scalar {
        Scalar::Text(text) => text.clone(),
        Scalar::Number(n) if !n.is_finite() => String::new(),
        Scalar::Number(n) if length => format!("{}{}", format_number(*n), unit),
        Scalar::Number(n) => format_number(*n),
    }
}

/// Compiles authored declarations into `(property, value)` pairs.
///
/// | key           | output                                          |
/// |---------------|-------------------------------------------------|
/// | `paddingX`    | `padding-left`, `padding-right`                 |
/// | `paddingY`    | `padding-top`, `padding-bottom`                 |
/// | `marginX`     | `margin-left`, `margin-right`                   |
/// | `marginY`     | `margin-top`, `margin-bottom`                   |
/// | `bg`          | `background-color`                              |
/// | `radius`      | `border-radius`                                 |
/// | `shadow`      | `box-shadow`                                    |
/// | `borderColor` | `border-color` + `border-style:solid`           |
/// | `borderWidth` | `border-width` + `border-style:solid`           |
/// | `font`        | family, size, line height and weight sub-tokens |
/// | anything else | hyphenated key                                  |
///
/// Token references become `var(--...)`. A reference to a missing token
/// renders as an empty value, which the emitter drops.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationCompiler<'a> {
    config: &'a EngineConfig,
}

impl<'a> DeclarationCompiler<'a> {
    /// Create a compiler.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Compile a declaration.
    pub fn compile(&self, decl: &Declaration, tokens: &TokenTable) -> Vec<(String, String)> {
        self.compile_with(decl, tokens, &mut Diagnostics::new())
    }

    /// Compile a declaration, recording unresolved tokens.
    pub fn compile_with(
        &self,
        decl: &Declaration,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(decl.len() + 2);
        // An explicit borderStyle replaces the implicit solid style.
        let mut border_style_done = decl.contains("borderStyle");

        for (key, value) in decl.iter() {
            if let Some((_, properties)) = SHORTHANDS.iter().find(|(name, _)| *name == key) {
                self.push_all(&mut out, properties, key, value, tokens, diagnostics);
                continue;
            }
            match key {
                "borderColor" | "borderWidth" => {
                    let property = if key == "borderColor" {
                        "border-color"
                    } else {
                        "border-width"
                    };
                    self.push_all(&mut out, &[property], key, value, tokens, diagnostics);
                    if !border_style_done {
                        out.push(("border-style".to_string(), "solid".to_string()));
                        border_style_done = true;
                    }
                }
                "font" => self.expand_font(&mut out, value, tokens, diagnostics),
                _ => {
                    let property = kebab_case(key);
                    let rendered = self.render(key, &property, value, tokens, diagnostics);
                    out.push((property, rendered));
                }
            }
        }

        out
    }

    fn push_all(
        &self,
        out: &mut Vec<(String, String)>,
        properties: &[&str],
        key: &str,
        value: &DeclarationValue,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) {
        let Some((first, _)) = properties.split_first() else {
            return;
        };
        let rendered = self.render(key, first, value, tokens, diagnostics);
        for property in properties {
            out.push((property.to_string(), rendered.clone()));
        }
    }

    /// Render one value for an output property.
    fn render(
        &self,
        key: &str,
        property: &str,
        value: &DeclarationValue,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) -> String {
        match value {
            DeclarationValue::Text(text) => text.clone(),
            DeclarationValue::Number(n) => {
                let length = !UNITLESS.contains(&property);
                render_scalar(&Scalar::Number(*n), length, &self.config.length_unit)
            }
            DeclarationValue::Token { token } => {
                if tokens.contains(token) {
                    format!("var({})", token.var_name())
                } else {
                    unresolved(token, key, diagnostics);
                    String::new()
                }
            }
        }
    }

    fn expand_font(
        &self,
        out: &mut Vec<(String, String)>,
        value: &DeclarationValue,
        tokens: &TokenTable,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(id) = value.as_token() else {
            // A literal font is passed through as the shorthand.
            let rendered = self.render("font", "font", value, tokens, diagnostics);
            out.push(("font".to_string(), rendered));
            return;
        };

        match tokens.get(id) {
            Some(token) if token.as_font().is_some() => {
                for (part, property) in FONT_PARTS {
                    out.push((property.to_string(), format!("var({})", font_part_var(id, part))));
                }
            }
            Some(_) => out.push(("font".to_string(), format!("var({})", id.var_name()))),
            None => {
                unresolved(id, "font", diagnostics);
                for (_, property) in FONT_PARTS {
                    out.push((property.to_string(), String::new()));
                }
            }
        }
    }
}

fn unresolved(token: &TokenId, key: &str, diagnostics: &mut Diagnostics) {
    tracing::debug!(target: targets::COMPILE, token = %token, property = key, "unresolved token");
    diagnostics.push(Diagnostic::UnresolvedToken {
        token: token.clone(),
        property: key.to_string(),
    });
}
