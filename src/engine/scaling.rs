use crate::config::policy::ScalingPolicyConfig;
use crate::config::profile::DeviceProfile;
use crate::config::store::ConfigurationStore;
use crate::engine::cache::{CacheKey, MetricsCache};
use crate::engine::metrics::ComputedMetrics;
use crate::foundation::affinity::CoordinationThread;
use crate::foundation::core::DesignSpec;
use crate::foundation::error::{AutoscaleError, AutoscaleResult};
use crate::sink::display::MetricsSink;

/// Density value that corresponds to 1.0 px per dp.
const DENSITY_DPI_PER_UNIT: f32 = 160.0;

/// Turns a design spec plus device facts into concrete scale metrics.
///
/// Results are memoized for the lifetime of the engine. A cache hit is returned as stored,
/// even when the device profile or policy changed after the entry was created.
///
/// All operations are bound to the thread that created the engine and fail with
/// [`AutoscaleError::ConcurrencyViolation`] anywhere else.
#[derive(Debug, Default)]
pub struct ScalingEngine {
    cache: MetricsCache,
    thread: CoordinationThread,
}

impl ScalingEngine {
    /// New engine bound to the calling thread.
    pub fn new() -> Self {
        Self {
            cache: MetricsCache::new(),
            thread: CoordinationThread::current(),
        }
    }

    /// Compute (or fetch from cache) the metrics that make `spec` span the screen.
    #[tracing::instrument(level = "debug", skip(self, profile, policy))]
    pub fn compute_for_design_spec(
        &mut self,
        spec: DesignSpec,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<ComputedMetrics> {
        self.thread.check("compute_for_design_spec")?;
        spec.validate()?;

        let key = Self::key_for(spec, profile, policy)?;
        if let Some(hit) = self.cache.lookup(&key) {
            tracing::trace!(?key, "metrics cache hit");
            return Ok(hit);
        }

        let computed = Self::compute_uncached(spec, profile, policy)?;
        Ok(self.cache.insert(key, computed))
    }

    /// Compute metrics for the global design size along the policy axis.
    pub fn compute_global_metrics(
        &mut self,
        store: &ConfigurationStore,
    ) -> AutoscaleResult<ComputedMetrics> {
        let spec = store.global_design_spec()?;
        self.compute_for_design_spec(spec, store.profile()?, store.policy())
    }

    /// Baseline metrics that undo scaling, with xdpi expressed per active subunit.
    pub fn cancel(
        &self,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<ComputedMetrics> {
        self.thread.check("cancel")?;
        Ok(ComputedMetrics::baseline(profile, policy.subunit))
    }

    /// Write `metrics` to every sink, honoring the policy's unit gates.
    pub fn apply_metrics(
        &self,
        sinks: &mut [&mut dyn MetricsSink],
        metrics: &ComputedMetrics,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<()> {
        self.thread.check("apply_metrics")?;
        let xdpi = policy
            .subunit
            .is_active()
            .then(|| metrics.xdpi * policy.subunit.per_inch());

        for sink in sinks.iter_mut() {
            if policy.support_dp {
                sink.set_density(metrics.density, metrics.density_dpi);
            }
            if policy.support_sp {
                sink.set_scaled_density(metrics.scaled_density);
            }
            if let Some(xdpi) = xdpi {
                sink.set_xdpi(xdpi);
            }
            if policy.support_dp && policy.support_screen_size_dp {
                sink.set_screen_size_dp(metrics.screen_width_dp, metrics.screen_height_dp);
            }
        }
        Ok(())
    }

    /// Cached metrics for these inputs, if any, without computing.
    pub fn cached(
        &self,
        spec: DesignSpec,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> Option<ComputedMetrics> {
        let key = Self::key_for(spec, profile, policy).ok()?;
        self.cache.peek(&key).copied()
    }

    /// Thread the engine is bound to.
    pub fn coordination_thread(&self) -> CoordinationThread {
        self.thread
    }

    /// Number of memoized entries.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// `(hits, misses)` of the metrics cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    fn key_for(
        spec: DesignSpec,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<CacheKey> {
        let screen_size = Self::screen_size(spec, profile, policy)?;
        Ok(CacheKey::new(
            spec.size_in_dp,
            Self::subunit_design_size(spec, policy),
            screen_size,
            profile.baseline_scaled_density,
            spec.is_base_on_width(),
            policy.use_device_size,
        ))
    }

    fn subunit_design_size(spec: DesignSpec, policy: &ScalingPolicyConfig) -> f32 {
        policy
            .subunit_design_size(spec.base_on)
            .unwrap_or(spec.size_in_dp)
    }

    fn screen_size(
        spec: DesignSpec,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<u32> {
        let px = profile.screen_size_px(spec.base_on, policy.use_device_size);
        if px == 0 {
            return Err(AutoscaleError::invalid_argument(format!(
                "screen size along {:?} must be > 0",
                spec.base_on
            )));
        }
        Ok(px)
    }

    fn font_factor(profile: &DeviceProfile, policy: &ScalingPolicyConfig) -> f32 {
        if policy.private_font_scale > 0.0 {
            policy.private_font_scale
        } else if policy.exclude_font_scale {
            1.0
        } else {
            profile.system_font_scale()
        }
    }

    fn compute_uncached(
        spec: DesignSpec,
        profile: &DeviceProfile,
        policy: &ScalingPolicyConfig,
    ) -> AutoscaleResult<ComputedMetrics> {
        let screen_size = Self::screen_size(spec, profile, policy)? as f32;
        let subunit_design_size = Self::subunit_design_size(spec, policy);

        let density = screen_size / spec.size_in_dp;
        let scaled_density = density * Self::font_factor(profile, policy);
        let density_dpi = (density * DENSITY_DPI_PER_UNIT).round() as u32;
        let screen_width_dp = (profile.screen_width_px as f32 / density).floor() as u32;
        let screen_height_dp = (profile.screen_height_px as f32 / density).floor() as u32;
        let xdpi = screen_size / subunit_design_size;

        tracing::debug!(
            density,
            scaled_density,
            density_dpi,
            xdpi,
            "computed scale metrics"
        );

        Ok(ComputedMetrics {
            density,
            density_dpi,
            scaled_density,
            xdpi,
            screen_width_dp,
            screen_height_dp,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scaling.rs"]
mod tests;
