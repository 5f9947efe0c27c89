use std::thread::{self, ThreadId};

use crate::foundation::error::{AutoscaleError, AutoscaleResult};

/// Identity of the single thread allowed to run engine operations.
///
/// Mirrors UI-thread affinity: the owner is recorded at construction and every guarded
/// operation is checked against it instead of being serialized internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinationThread {
    owner: ThreadId,
}

impl CoordinationThread {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// Return `true` when called from the owning thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Fail with [`AutoscaleError::ConcurrencyViolation`] when called off the owning thread.
    pub fn check(&self, op: &str) -> AutoscaleResult<()> {
        if self.is_current() {
            return Ok(());
        }
        Err(AutoscaleError::concurrency_violation(format!(
            "{op} must run on the coordination thread {:?} (called from {:?})",
            self.owner,
            thread::current().id()
        )))
    }
}

impl Default for CoordinationThread {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/affinity.rs"]
mod tests;
