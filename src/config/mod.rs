//! Scaling policy, device profile, the configuration store and the JSON manifest.

/// JSON manifest loader.
pub mod manifest;
/// Scaling policy flags.
pub mod policy;
/// Device profile and configuration change notifications.
pub mod profile;
/// Configuration store.
pub mod store;
