//! Tracing targets used by the style engine.
//!
//! The engine never installs a subscriber. Applications that want to see
//! engine logs install one themselves and can filter by the targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("pagecraft_style::compile=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Rule store mutations.
    pub const STORE: &str = "pagecraft_style::store";
    /// Direct resolution and cascade inspection.
    pub const RESOLVE: &str = "pagecraft_style::resolve";
    /// Declaration compilation and stylesheet emission.
    pub const COMPILE: &str = "pagecraft_style::compile";
    /// Cached writes to rendering sinks.
    pub const INJECT: &str = "pagecraft_style::inject";
}

