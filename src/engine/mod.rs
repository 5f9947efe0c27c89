//! Scale metric computation, memoization and baseline restoration.

/// Append-only metrics cache keyed on exact inputs.
pub mod cache;
/// Computed metrics value type.
pub mod metrics;
/// The scaling engine.
pub mod scaling;
