use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::foundation::core::DesignSpec;
use crate::resolve::capability::SurfaceKey;

/// Externally registered decision for one surface type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverrideRecord {
    /// Do not scale this surface.
    Cancel,
    /// Scale this surface with its own design spec.
    Custom(DesignSpec),
}

#[derive(Debug, Default)]
struct RegistryTables {
    cancel: HashSet<SurfaceKey>,
    overrides: HashMap<SurfaceKey, DesignSpec>,
}

/// Overrides for surfaces whose source cannot declare capabilities (third-party screens).
///
/// Registration usually happens once during bootstrap, possibly from several threads, so every
/// mutation and lookup goes through one lock. The engaged flag is read without the lock: when
/// nothing was ever registered, callers skip lookups entirely.
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    engaged: AtomicBool,
    tables: Mutex<RegistryTables>,
}

impl OverrideRegistry {
    /// Empty, disengaged registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as cancelled.
    pub fn add_cancel(&self, key: impl Into<SurfaceKey>) -> &Self {
        let key = key.into();
        let mut tables = self.tables.lock();
        tracing::debug!(surface = %key, "registered external cancel");
        tables.cancel.insert(key);
        self.engaged.store(true, Ordering::Release);
        self
    }

    /// Register a custom design spec for `key`, replacing any earlier one.
    pub fn add_override(&self, key: impl Into<SurfaceKey>, spec: DesignSpec) -> &Self {
        let key = key.into();
        let mut tables = self.tables.lock();
        tracing::debug!(surface = %key, ?spec, "registered external override");
        tables.overrides.insert(key, spec);
        self.engaged.store(true, Ordering::Release);
        self
    }

    /// Return `true` once anything was registered. Never resets.
    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Acquire)
    }

    /// Return `true` if `key` is in the cancel set.
    pub fn is_cancelled(&self, key: &SurfaceKey) -> bool {
        self.tables.lock().cancel.contains(key)
    }

    /// Custom design spec registered for `key`.
    pub fn lookup(&self, key: &SurfaceKey) -> Option<DesignSpec> {
        self.tables.lock().overrides.get(key).copied()
    }

    /// Effective record for `key` under one lock; cancel wins over a custom spec.
    pub fn record(&self, key: &SurfaceKey) -> Option<OverrideRecord> {
        let tables = self.tables.lock();
        if tables.cancel.contains(key) {
            return Some(OverrideRecord::Cancel);
        }
        tables.overrides.get(key).copied().map(OverrideRecord::Custom)
    }

    /// Number of registered keys across both tables.
    pub fn len(&self) -> usize {
        let tables = self.tables.lock();
        tables.cancel.len() + tables.overrides.len()
    }

    /// Return `true` when no key is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/registry.rs"]
mod tests;
