//! Style rules, sheets and the rule store.

mod declaration;
mod rule;
mod store;
mod stylesheet;

pub use declaration::{Declaration, DeclarationValue, PriorValues};
pub use rule::{RuleId, StyleRule};
pub use store::{DEFAULT_SHEET, Mutation, MutationHook, RuleStore, SheetRef};
pub use stylesheet::{SheetId, StyleSheet};
