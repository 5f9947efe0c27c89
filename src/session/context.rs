use std::sync::Arc;

use crate::config::policy::ScalingPolicyConfig;
use crate::config::profile::{ConfigurationChange, DeviceProfile};
use crate::config::store::ConfigurationStore;
use crate::engine::metrics::ComputedMetrics;
use crate::engine::scaling::ScalingEngine;
use crate::foundation::core::DesignSpec;
use crate::foundation::error::{AutoscaleError, AutoscaleResult};
use crate::resolve::capability::SurfaceActivation;
use crate::resolve::registry::OverrideRegistry;
use crate::resolve::resolver::{AdaptHook, AdaptStrategy, OverrideResolver, Resolution};
use crate::sink::display::MetricsSink;

/// Snapshot of the context lifecycle flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunningState {
    /// A device profile was captured.
    pub initialized: bool,
    /// Something was registered in the override registry (never resets).
    pub registry_engaged: bool,
    /// Adaptation is paused until [`ScalingContext::restart`].
    pub stopped: bool,
}

/// What one activation decided and which metrics were written.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AdaptOutcome {
    /// Resolver decision.
    pub resolution: Resolution,
    /// Metrics pushed to the sinks.
    pub metrics: ComputedMetrics,
}

/// Explicitly constructed scaling context; one per process in practice, any number in tests.
///
/// Owns the configuration store, the engine (and its cache) and the resolver. The override
/// registry is shared through an [`Arc`] so registration can happen on any thread, while all
/// compute/apply work stays on the thread that created the context.
#[derive(Debug)]
pub struct ScalingContext {
    store: ConfigurationStore,
    engine: ScalingEngine,
    registry: Arc<OverrideRegistry>,
    resolver: OverrideResolver,
    stopped: bool,
}

impl ScalingContext {
    /// New uninitialized context bound to the calling thread.
    pub fn new(policy: ScalingPolicyConfig) -> Self {
        Self {
            store: ConfigurationStore::new(policy),
            engine: ScalingEngine::new(),
            registry: Arc::new(OverrideRegistry::new()),
            resolver: OverrideResolver::default(),
            stopped: false,
        }
    }

    /// Capture the device profile; fails with `AlreadyInitialized` the second time.
    pub fn init(&mut self, profile: DeviceProfile) -> AutoscaleResult<()> {
        self.store.init(profile)?;
        tracing::debug!(policy = ?self.store.policy(), "scaling context initialized");
        Ok(())
    }

    /// Configuration store.
    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    /// Mutable configuration store for setters.
    pub fn store_mut(&mut self) -> &mut ConfigurationStore {
        &mut self.store
    }

    /// Scaling engine (cache introspection).
    pub fn engine(&self) -> &ScalingEngine {
        &self.engine
    }

    /// Shared override registry handle.
    pub fn registry(&self) -> &Arc<OverrideRegistry> {
        &self.registry
    }

    /// Replace the adapt strategy.
    pub fn set_strategy(&mut self, strategy: AdaptStrategy) {
        self.resolver.set_strategy(strategy);
    }

    /// Append a before/after hook.
    pub fn add_hook(&mut self, hook: Arc<dyn AdaptHook>) {
        self.resolver.add_hook(hook);
    }

    /// Current lifecycle flags.
    pub fn running_state(&self) -> RunningState {
        RunningState {
            initialized: self.store.is_initialized(),
            registry_engaged: self.registry.is_engaged(),
            stopped: self.stopped,
        }
    }

    /// Handle one surface-becomes-visible event: resolve, compute, apply.
    ///
    /// Returns `None` while the context is stopped.
    #[tracing::instrument(
        level = "debug",
        skip(self, activation, sinks),
        fields(surface = %activation.key)
    )]
    pub fn activate(
        &mut self,
        activation: &SurfaceActivation,
        sinks: &mut [&mut dyn MetricsSink],
    ) -> AutoscaleResult<Option<AdaptOutcome>> {
        self.ensure_initialized()?;
        self.engine.coordination_thread().check("activate")?;
        if self.stopped {
            tracing::trace!("adaptation stopped, activation ignored");
            return Ok(None);
        }

        let resolution = self
            .resolver
            .resolve(activation, &self.registry, &self.store)?;
        let metrics = match resolution.design_spec() {
            Some(spec) => self.compute(spec)?,
            None => self.engine.cancel(self.store.profile()?, self.store.policy())?,
        };
        self.engine
            .apply_metrics(sinks, &metrics, self.store.policy())?;
        Ok(Some(AdaptOutcome {
            resolution,
            metrics,
        }))
    }

    /// Scale against an explicit design spec, bypassing the resolver.
    pub fn adapt_with(
        &mut self,
        spec: DesignSpec,
        sinks: &mut [&mut dyn MetricsSink],
    ) -> AutoscaleResult<ComputedMetrics> {
        let metrics = self.compute(spec)?;
        self.engine
            .apply_metrics(sinks, &metrics, self.store.policy())?;
        Ok(metrics)
    }

    /// Scale with the global design size along the global axis.
    pub fn adapt_global(
        &mut self,
        sinks: &mut [&mut dyn MetricsSink],
    ) -> AutoscaleResult<ComputedMetrics> {
        let spec = self.store.global_design_spec()?;
        self.adapt_with(spec, sinks)
    }

    /// Restore baseline metrics on `sinks`.
    pub fn cancel_adapt(
        &mut self,
        sinks: &mut [&mut dyn MetricsSink],
    ) -> AutoscaleResult<ComputedMetrics> {
        let metrics = self
            .engine
            .cancel(self.store.profile()?, self.store.policy())?;
        self.engine
            .apply_metrics(sinks, &metrics, self.store.policy())?;
        Ok(metrics)
    }

    /// Apply a configuration change from the environment. Cached metrics are kept.
    pub fn on_configuration_changed(
        &mut self,
        change: &ConfigurationChange,
    ) -> AutoscaleResult<()> {
        self.store.refresh(change)?;
        tracing::debug!(?change, "device profile refreshed");
        Ok(())
    }

    /// Restore baselines on `sinks` and ignore activations until [`Self::restart`].
    pub fn stop(&mut self, sinks: &mut [&mut dyn MetricsSink]) -> AutoscaleResult<()> {
        self.ensure_initialized()?;
        if !self.stopped {
            self.cancel_adapt(sinks)?;
            self.stopped = true;
            tracing::debug!("adaptation stopped");
        }
        Ok(())
    }

    /// Resume handling activations after [`Self::stop`].
    pub fn restart(&mut self) -> AutoscaleResult<()> {
        self.ensure_initialized()?;
        if self.stopped {
            self.stopped = false;
            tracing::debug!("adaptation restarted");
        }
        Ok(())
    }

    fn compute(&mut self, spec: DesignSpec) -> AutoscaleResult<ComputedMetrics> {
        self.engine
            .compute_for_design_spec(spec, self.store.profile()?, self.store.policy())
    }

    fn ensure_initialized(&self) -> AutoscaleResult<()> {
        if self.store.is_initialized() {
            return Ok(());
        }
        Err(AutoscaleError::not_initialized(
            "call ScalingContext::init before adapting surfaces",
        ))
    }
}

impl Default for ScalingContext {
    fn default() -> Self {
        Self::new(ScalingPolicyConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/context.rs"]
mod tests;
