use std::fmt;

use crate::foundation::core::DesignSpec;

/// Stable identity of a surface type, typically its fully qualified type name.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SurfaceKey(String);

impl SurfaceKey {
    /// Key from an explicit identity string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key derived from a Rust type's name.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SurfaceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// What a surface declares about itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SurfaceCapability {
    /// Nothing declared: use the global configuration.
    #[default]
    None,
    /// The surface opts out of scaling.
    Cancel,
    /// The surface supplies its own design spec (`size_in_dp <= 0` means global size).
    Custom(DesignSpec),
}

/// One surface-becomes-visible event.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceActivation {
    /// Identity of the surface type.
    pub key: SurfaceKey,
    /// Capability the surface declares.
    pub capability: SurfaceCapability,
}

impl SurfaceActivation {
    /// Activation without a declared capability.
    pub fn new(key: impl Into<SurfaceKey>) -> Self {
        Self {
            key: key.into(),
            capability: SurfaceCapability::None,
        }
    }

    /// Activation keyed by the name of `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(SurfaceKey::of::<T>())
    }

    /// Attach a declared capability.
    pub fn with_capability(mut self, capability: SurfaceCapability) -> Self {
        self.capability = capability;
        self
    }
}
