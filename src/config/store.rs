use crate::config::policy::ScalingPolicyConfig;
use crate::config::profile::{ConfigurationChange, DeviceProfile};
use crate::foundation::core::{Axis, DesignSpec, Orientation, Subunit, ensure_positive_px};
use crate::foundation::error::{AutoscaleError, AutoscaleResult};

/// Global design size used when nothing was configured and no subunit is active.
pub const DEFAULT_DESIGN_SIZE_DP: (u32, u32) = (360, 640);
/// Global design size used when nothing was configured and a subunit is active (px-style).
pub const DEFAULT_SUBUNIT_DESIGN_SIZE: (u32, u32) = (1080, 1920);

/// Policy, device profile and global design size for one scaling context.
///
/// The profile is set exactly once through [`ConfigurationStore::init`]; afterwards it is only
/// refreshed in place. Setters are last-writer-wins and only validate positivity. They affect
/// future computations but never invalidate metrics that were already cached.
#[derive(Clone, Debug, Default)]
pub struct ConfigurationStore {
    policy: ScalingPolicyConfig,
    profile: Option<DeviceProfile>,
    design_width_in_dp: Option<u32>,
    design_height_in_dp: Option<u32>,
}

impl ConfigurationStore {
    /// Uninitialized store with the given policy.
    pub fn new(policy: ScalingPolicyConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Capture the device profile. Fails with `AlreadyInitialized` on the second call.
    pub fn init(&mut self, profile: DeviceProfile) -> AutoscaleResult<()> {
        if self.profile.is_some() {
            return Err(AutoscaleError::already_initialized(
                "ConfigurationStore::init can only be called once",
            ));
        }
        profile.validate()?;
        self.profile = Some(profile);
        Ok(())
    }

    /// Return `true` once a profile was captured.
    pub fn is_initialized(&self) -> bool {
        self.profile.is_some()
    }

    /// Device profile; `NotInitialized` before [`Self::init`].
    pub fn profile(&self) -> AutoscaleResult<&DeviceProfile> {
        self.profile
            .as_ref()
            .ok_or_else(|| AutoscaleError::not_initialized("call ConfigurationStore::init first"))
    }

    fn profile_mut(&mut self) -> AutoscaleResult<&mut DeviceProfile> {
        self.profile
            .as_mut()
            .ok_or_else(|| AutoscaleError::not_initialized("call ConfigurationStore::init first"))
    }

    /// Active scaling policy.
    pub fn policy(&self) -> &ScalingPolicyConfig {
        &self.policy
    }

    /// Mutable access to the policy for flag toggles.
    pub fn policy_mut(&mut self) -> &mut ScalingPolicyConfig {
        &mut self.policy
    }

    /// Replace the whole policy after validating it.
    pub fn set_policy(&mut self, policy: ScalingPolicyConfig) -> AutoscaleResult<()> {
        policy.validate()?;
        self.policy = policy;
        Ok(())
    }

    /// Global design width; `MissingDesignSize` until configured.
    pub fn design_width_in_dp(&self) -> AutoscaleResult<u32> {
        self.design_width_in_dp.ok_or_else(|| {
            AutoscaleError::missing_design_size("design_width_in_dp must be configured > 0")
        })
    }

    /// Global design height; `MissingDesignSize` until configured.
    pub fn design_height_in_dp(&self) -> AutoscaleResult<u32> {
        self.design_height_in_dp.ok_or_else(|| {
            AutoscaleError::missing_design_size("design_height_in_dp must be configured > 0")
        })
    }

    /// Global design size along `axis`, as a float ready for the engine.
    pub fn design_size_for(&self, axis: Axis) -> AutoscaleResult<f32> {
        let dp = match axis {
            Axis::Width => self.design_width_in_dp()?,
            Axis::Height => self.design_height_in_dp()?,
        };
        Ok(dp as f32)
    }

    /// Design spec of the global default: configured size along the policy axis.
    pub fn global_design_spec(&self) -> AutoscaleResult<DesignSpec> {
        let axis = self.policy.axis();
        Ok(DesignSpec {
            base_on: axis,
            size_in_dp: self.design_size_for(axis)?,
        })
    }

    /// Replace a non-positive override size with the global size for its axis.
    pub fn with_global_fallback(&self, spec: DesignSpec) -> AutoscaleResult<DesignSpec> {
        if !spec.needs_global_size() {
            return Ok(spec);
        }
        Ok(DesignSpec {
            base_on: spec.base_on,
            size_in_dp: self.design_size_for(spec.base_on)?,
        })
    }

    /// Set the global design width in dp.
    pub fn set_design_width_in_dp(&mut self, width: u32) -> AutoscaleResult<()> {
        self.design_width_in_dp = Some(ensure_positive_px(width, "design_width_in_dp")?);
        Ok(())
    }

    /// Set the global design height in dp.
    pub fn set_design_height_in_dp(&mut self, height: u32) -> AutoscaleResult<()> {
        self.design_height_in_dp = Some(ensure_positive_px(height, "design_height_in_dp")?);
        Ok(())
    }

    /// Fill unset design dimensions with the stock defaults for the active subunit.
    pub fn apply_default_design_size(&mut self) {
        let (w, h) = if self.policy.subunit == Subunit::None {
            DEFAULT_DESIGN_SIZE_DP
        } else {
            DEFAULT_SUBUNIT_DESIGN_SIZE
        };
        self.design_width_in_dp.get_or_insert(w);
        self.design_height_in_dp.get_or_insert(h);
    }

    /// Screen height used for height-based scaling under the current policy.
    pub fn effective_screen_height(&self) -> AutoscaleResult<u32> {
        Ok(self
            .profile()?
            .effective_height_px(self.policy.use_device_size))
    }

    /// Override the screen width in px.
    pub fn set_screen_width(&mut self, width: u32) -> AutoscaleResult<()> {
        let width = ensure_positive_px(width, "screen_width_px")?;
        self.profile_mut()?.screen_width_px = width;
        Ok(())
    }

    /// Override the screen height in px.
    pub fn set_screen_height(&mut self, height: u32) -> AutoscaleResult<()> {
        let height = ensure_positive_px(height, "screen_height_px")?;
        self.profile_mut()?.screen_height_px = height;
        Ok(())
    }

    /// Override the status bar height in px; `0` for a hidden status bar.
    pub fn set_status_bar_height(&mut self, height: u32) -> AutoscaleResult<()> {
        self.profile_mut()?.status_bar_height_px = height;
        Ok(())
    }

    /// Override the recorded orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) -> AutoscaleResult<()> {
        self.profile_mut()?.orientation = orientation;
        Ok(())
    }

    /// Apply a configuration change notification to the profile.
    pub fn refresh(&mut self, change: &ConfigurationChange) -> AutoscaleResult<()> {
        self.profile_mut()?.apply_change(change)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/store.rs"]
mod tests;
