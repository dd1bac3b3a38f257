//! Entity identity as seen by the style engine.
//!
//! The engine does not own the document tree. It only needs each entity's
//! id, its type/component identifier and its class set, supplied through
//! [`StyledEntity`].

/// Borrowed snapshot of an entity's identity used during matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityContext<'a> {
    /// Unique entity id.
    pub id: &'a str,
    /// Type/component identifier (e.g. "Button", "Section").
    pub type_name: &'a str,
    /// Classes applied to the entity.
    pub classes: &'a [String],
}

impl EntityContext<'_> {
    /// Check if the entity carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Trait for document entities that can be styled.
///
/// # Example
///
/// ```ignore
/// struct Node {
///     id: String,
///     component: String,
///     classes: Vec<String>,
/// }
///
/// impl StyledEntity for Node {
///     fn entity_id(&self) -> &str {
///         &self.id
///     }
///
///     fn type_name(&self) -> &str {
///         &self.component
///     }
///
///     fn classes(&self) -> &[String] {
///         &self.classes
///     }
/// }
/// ```
pub trait StyledEntity {
    /// Get the entity's unique id.
    fn entity_id(&self) -> &str;

    /// Get the entity's type/component identifier.
    fn type_name(&self) -> &str;

    /// Get the entity's classes.
    fn classes(&self) -> &[String];

    /// Check if the entity has a specific class.
    fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    /// Snapshot used by the matchers.
    fn match_context(&self) -> EntityContext<'_> {
        EntityContext {
            id: self.entity_id(),
            type_name: self.type_name(),
            classes: self.classes(),
        }
    }
}

impl StyledEntity for EntityContext<'_> {
    fn entity_id(&self) -> &str {
        self.id
    }

    fn type_name(&self) -> &str {
        self.type_name
    }

    fn classes(&self) -> &[String] {
        self.classes
    }
}

/// Owned entity description, handy for tests and for callers that don't
/// have a node type of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: String,
    type_name: String,
    classes: Vec<String>,
}

impl Entity {
    /// Create an entity with no classes.
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            classes: vec![],
        }
    }

    /// Add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

impl StyledEntity for Entity {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_context_snapshot() {
        let entity = Entity::new("n1", "Button").with_class("primary");
        let ctx = entity.match_context();

        assert_eq!(ctx.id, "n1");
        assert_eq!(ctx.type_name, "Button");
        assert!(ctx.has_class("primary"));
        assert!(!ctx.has_class("secondary"));
    }

    #[test]
    fn context_is_itself_a_styled_entity() {
        let classes = vec!["card".to_string()];
        let ctx = EntityContext {
            id: "n2",
            type_name: "Section",
            classes: &classes,
        };

        assert_eq!(ctx.match_context(), ctx);
        assert!(StyledEntity::has_class(&ctx, "card"));
    }
}
