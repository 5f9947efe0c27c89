//! autoscale renders a layout authored against one design size at the same relative size on
//! any screen, by recomputing the device's base length-unit scale each time a surface
//! becomes visible.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `SurfaceActivation -> Resolution` (global default, self-declared override,
//!    external override, or cancellation)
//! 2. **Compute**: `DesignSpec + DeviceProfile + ScalingPolicyConfig -> ComputedMetrics`
//!    (memoized for the lifetime of the engine)
//! 3. **Apply**: `ComputedMetrics -> [MetricsSink]`, gated by the policy's unit switches
//!
//! [`ScalingContext`] drives all three steps. It is an explicitly constructed value: there is
//! no global state, and independent contexts never share caches or registries.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: for a fixed cache state, computation is a pure function of its inputs.
//! - **Single coordination thread**: compute/cancel/apply fail with
//!   [`AutoscaleError::ConcurrencyViolation`] off the thread that created the context.
//!   Override registration is lock-protected and may happen from any thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod engine;
mod foundation;
mod resolve;
mod session;
mod sink;

pub mod units;

pub use config::manifest::{ExternalOverrides, ScalingManifest};
pub use config::policy::ScalingPolicyConfig;
pub use config::profile::{ConfigurationChange, DeviceProfile};
pub use config::store::{ConfigurationStore, DEFAULT_DESIGN_SIZE_DP, DEFAULT_SUBUNIT_DESIGN_SIZE};
pub use engine::cache::{CacheKey, MetricsCache};
pub use engine::metrics::ComputedMetrics;
pub use engine::scaling::ScalingEngine;
pub use foundation::affinity::CoordinationThread;
pub use foundation::core::{Axis, DesignSpec, Orientation, Subunit};
pub use foundation::error::{AutoscaleError, AutoscaleResult};
pub use resolve::capability::{SurfaceActivation, SurfaceCapability, SurfaceKey};
pub use resolve::registry::{OverrideRecord, OverrideRegistry};
pub use resolve::resolver::{
    AdaptHook, AdaptStrategy, CancelSource, OverrideResolver, Resolution, StrategyFn,
    default_resolution,
};
pub use session::context::{AdaptOutcome, RunningState, ScalingContext};
pub use sink::display::{DisplayMetrics, MetricsSink};
pub use units::{Unit, to_px, to_px_f32};
