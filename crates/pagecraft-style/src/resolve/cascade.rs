//! Declaration cascading logic.

use crate::rules::{Declaration, StyleRule};

/// Cascade source declarations onto target.
///
/// Keys present in `source` overwrite the same keys in `target`; all other
/// keys in `target` are left alone.
pub fn cascade_declarations(target: &mut Declaration, source: &Declaration) {
    target.merge(source);
}

/// Fold rules' declarations left to right. Later rules win on conflicts.
pub fn fold_rules<'a>(rules: impl IntoIterator<Item = &'a StyleRule>) -> Declaration {
    let mut effective = Declaration::new();
    for rule in rules {
        cascade_declarations(&mut effective, &rule.declarations);
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{Selector, VariantMap};

    #[test]
    fn cascade_overwrites_present_keys() {
        let mut target = Declaration::new().with("color", "black").with("opacity", 1);
        let source = Declaration::new().with("color", "red");

        cascade_declarations(&mut target, &source);

        assert_eq!(target.get("color"), Some(&"red".into()));
        assert_eq!(target.get("opacity"), Some(&1.into()));
    }

    #[test]
    fn later_rules_win() {
        let first = StyleRule::new("a", Selector::type_selector("Button"), VariantMap::new())
            .with_declarations(Declaration::new().with("paddingX", 16).with("bg", "#fff"));
        let second = StyleRule::new("b", Selector::class("primary"), VariantMap::new())
            .with_declarations(Declaration::new().with("bg", "#00f"));

        let effective = fold_rules([&first, &second]);

        assert_eq!(effective.get("paddingX"), Some(&16.into()));
        assert_eq!(effective.get("bg"), Some(&"#00f".into()));
    }

    #[test]
    fn no_rules_is_empty() {
        assert!(fold_rules(std::iter::empty()).is_empty());
    }
}
