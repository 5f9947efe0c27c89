use std::fmt;
use std::sync::Arc;

use crate::config::store::ConfigurationStore;
use crate::foundation::core::DesignSpec;
use crate::foundation::error::AutoscaleResult;
use crate::resolve::capability::{SurfaceActivation, SurfaceCapability};
use crate::resolve::registry::{OverrideRecord, OverrideRegistry};

/// Who asked for a cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CancelSource {
    /// The surface key is in the external cancel set.
    External,
    /// The surface declared [`SurfaceCapability::Cancel`].
    SelfDeclared,
}

/// Outcome of resolving one surface activation.
///
/// Every variant but `Cancel` carries a positive design spec ready for the engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Resolution {
    /// Restore baseline metrics.
    Cancel(CancelSource),
    /// Design spec registered externally for this surface type.
    ExternalOverride(DesignSpec),
    /// Design spec declared by the surface itself.
    SelfOverride(DesignSpec),
    /// Global design size along the global axis.
    GlobalDefault(DesignSpec),
}

impl Resolution {
    /// Design spec to compute with, `None` for cancellation.
    pub fn design_spec(&self) -> Option<DesignSpec> {
        match self {
            Self::Cancel(_) => None,
            Self::ExternalOverride(spec) | Self::SelfOverride(spec) | Self::GlobalDefault(spec) => {
                Some(*spec)
            }
        }
    }

    /// Return `true` for [`Resolution::Cancel`].
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel(_))
    }
}

/// Signature of a host-supplied resolution strategy.
pub type StrategyFn = dyn Fn(
        &SurfaceActivation,
        &OverrideRegistry,
        &ConfigurationStore,
    ) -> AutoscaleResult<Resolution>
    + Send
    + Sync;

/// How activations are turned into resolutions.
#[derive(Clone, Default)]
pub enum AdaptStrategy {
    /// Built-in precedence rules, see [`default_resolution`].
    #[default]
    Default,
    /// Host-supplied rules. They may call [`default_resolution`] to fall back.
    Custom(Arc<StrategyFn>),
}

impl AdaptStrategy {
    /// Wrap a closure as a custom strategy.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(
                &SurfaceActivation,
                &OverrideRegistry,
                &ConfigurationStore,
            ) -> AutoscaleResult<Resolution>
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    fn resolve(
        &self,
        activation: &SurfaceActivation,
        registry: &OverrideRegistry,
        store: &ConfigurationStore,
    ) -> AutoscaleResult<Resolution> {
        match self {
            Self::Default => default_resolution(activation, registry, store),
            Self::Custom(f) => f(activation, registry, store),
        }
    }
}

impl fmt::Debug for AdaptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Instrumentation callbacks around each decision. They never change the outcome.
pub trait AdaptHook: Send + Sync {
    /// Called before the strategy runs.
    fn before_adapt(&self, _activation: &SurfaceActivation) {}
    /// Called after the strategy produced a resolution.
    fn after_adapt(&self, _activation: &SurfaceActivation, _resolution: &Resolution) {}
}

/// Strategy plus an ordered hook list; evaluated once per surface activation.
#[derive(Clone, Default)]
pub struct OverrideResolver {
    strategy: AdaptStrategy,
    hooks: Vec<Arc<dyn AdaptHook>>,
}

impl OverrideResolver {
    /// Resolver with the given strategy and no hooks.
    pub fn new(strategy: AdaptStrategy) -> Self {
        Self {
            strategy,
            hooks: Vec::new(),
        }
    }

    /// Replace the strategy.
    pub fn set_strategy(&mut self, strategy: AdaptStrategy) {
        self.strategy = strategy;
    }

    /// Active strategy.
    pub fn strategy(&self) -> &AdaptStrategy {
        &self.strategy
    }

    /// Append a hook; hooks run in insertion order.
    pub fn add_hook(&mut self, hook: Arc<dyn AdaptHook>) {
        self.hooks.push(hook);
    }

    /// Resolve `activation`, bracketed by the hooks.
    pub fn resolve(
        &self,
        activation: &SurfaceActivation,
        registry: &OverrideRegistry,
        store: &ConfigurationStore,
    ) -> AutoscaleResult<Resolution> {
        for hook in &self.hooks {
            hook.before_adapt(activation);
        }
        let resolution = self.strategy.resolve(activation, registry, store)?;
        for hook in &self.hooks {
            hook.after_adapt(activation, &resolution);
        }
        Ok(resolution)
    }
}

impl fmt::Debug for OverrideResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideResolver")
            .field("strategy", &self.strategy)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Built-in precedence rules.
///
/// The registry is only consulted once engaged, so hosts that never register overrides pay no
/// lookup cost.
pub fn default_resolution(
    activation: &SurfaceActivation,
    registry: &OverrideRegistry,
    store: &ConfigurationStore,
) -> AutoscaleResult<Resolution> {
    let surface = activation.key.as_str();

    if registry.is_engaged() {
        match registry.record(&activation.key) {
            Some(OverrideRecord::Cancel) => {
                tracing::debug!(surface, "canceled the adaptation (external)");
                return Ok(Resolution::Cancel(CancelSource::External));
            }
            Some(OverrideRecord::Custom(spec)) => {
                let spec = store.with_global_fallback(spec)?;
                tracing::debug!(surface, ?spec, "used an external override");
                return Ok(Resolution::ExternalOverride(spec));
            }
            None => {}
        }
    }

    match activation.capability {
        SurfaceCapability::Custom(spec) => {
            let spec = store.with_global_fallback(spec)?;
            tracing::debug!(surface, ?spec, "used its own design spec");
            Ok(Resolution::SelfOverride(spec))
        }
        SurfaceCapability::Cancel => {
            tracing::debug!(surface, "canceled the adaptation");
            Ok(Resolution::Cancel(CancelSource::SelfDeclared))
        }
        SurfaceCapability::None => {
            let spec = store.global_design_spec()?;
            tracing::debug!(surface, ?spec, "used the global configuration");
            Ok(Resolution::GlobalDefault(spec))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
