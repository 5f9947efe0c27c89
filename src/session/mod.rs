//! Context-oriented API tying store, registry, resolver and engine together.

/// The scaling context.
pub mod context;
