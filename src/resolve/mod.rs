//! Per-surface decision of which design parameters apply.
//!
//! Precedence, first match wins: external cancel, external override, self-declared override,
//! self-declared cancel, global default.

/// Surface identity and self-declared capabilities.
pub mod capability;
/// Thread-safe registry of externally registered overrides.
pub mod registry;
/// Strategy, hooks and the precedence state machine.
pub mod resolver;
