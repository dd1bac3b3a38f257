//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```
//! use pagecraft_style::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//! length_unit = "rem"
//!
//! [[breakpoints]]
//! name = "mobile"
//! query = "(max-width: 480px)"
//! "#).unwrap();
//!
//! assert_eq!(config.length_unit, "rem");
//! assert_eq!(config.breakpoint("mobile").unwrap().query.as_deref(), Some("(max-width: 480px)"));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named breakpoint that `screen` conditions refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Name used as the value of the `screen` dimension.
    pub name: String,
    /// Media query predicate. `None` emits the rule unconditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Breakpoint {
    /// A breakpoint bound to a media query.
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: Some(query.into()),
        }
    }

    /// A breakpoint that applies everywhere (the widest layout).
    pub fn unconditional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: None,
        }
    }
}

/// Configuration for declaration compilation and stylesheet emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unit appended to numeric literals of length properties.
    pub length_unit: String,
    /// Attribute carrying the entity id on the rendering surface.
    pub entity_attribute: String,
    /// Attribute carrying the entity's type/component identifier.
    pub type_attribute: String,
    /// Attribute on the host element that names the active theme.
    pub theme_attribute: String,
    /// Attribute used for interaction states with no matching pseudo-class.
    pub state_attribute: String,
    /// Known breakpoints, in declaration order.
    pub breakpoints: Vec<Breakpoint>,
    /// Qualify rules without a theme condition with the active theme.
    pub qualify_active_theme: bool,
    /// Attach prior values to mutation events.
    pub capture_pre_images: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            length_unit: "px".to_string(),
            entity_attribute: "data-entity-id".to_string(),
            type_attribute: "data-type".to_string(),
            theme_attribute: "data-theme".to_string(),
            state_attribute: "data-state".to_string(),
            breakpoints: vec![
                Breakpoint::unconditional("desktop"),
                Breakpoint::new("tablet", "(max-width: 1024px)"),
                Breakpoint::new("mobile", "(max-width: 640px)"),
            ],
            qualify_active_theme: true,
            capture_pre_images: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Look up a breakpoint by name.
    pub fn breakpoint(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.name == name)
    }

    /// Replace the breakpoint table.
    pub fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = breakpoints;
        self
    }
}
