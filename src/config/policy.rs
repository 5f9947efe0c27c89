use crate::foundation::core::{Axis, Subunit, ensure_positive};
use crate::foundation::error::{AutoscaleError, AutoscaleResult};

/// Scaling policy: which axis drives scaling, which units are rewritten, and how fonts
/// follow the system scale.
///
/// All fields default to the behavior of a freshly installed host: width-based scaling over
/// the full device size, dp and sp rewritten, no subunit, screen dp untouched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScalingPolicyConfig {
    /// Global axis: `true` scales against width, `false` against height.
    pub base_on_width: bool,
    /// Use the raw screen height instead of subtracting the status bar.
    pub use_device_size: bool,
    /// Ignore the system font scale (sp follows dp exactly).
    pub exclude_font_scale: bool,
    /// App-private font scale; `0` disables it.
    pub private_font_scale: f32,
    /// Secondary unit carried through xdpi.
    pub subunit: Subunit,
    /// Rewrite density/density_dpi on sinks.
    pub support_dp: bool,
    /// Rewrite scaled_density on sinks.
    pub support_sp: bool,
    /// Rewrite screen width/height in dp on sinks (requires `support_dp`).
    pub support_screen_size_dp: bool,
    /// Design width used for the subunit only, usually in px.
    pub subunit_design_width: Option<f32>,
    /// Design height used for the subunit only, usually in px.
    pub subunit_design_height: Option<f32>,
}

impl Default for ScalingPolicyConfig {
    fn default() -> Self {
        Self {
            base_on_width: true,
            use_device_size: true,
            exclude_font_scale: false,
            private_font_scale: 0.0,
            subunit: Subunit::None,
            support_dp: true,
            support_sp: true,
            support_screen_size_dp: false,
            subunit_design_width: None,
            subunit_design_height: None,
        }
    }
}

impl ScalingPolicyConfig {
    /// Global axis derived from `base_on_width`.
    pub fn axis(&self) -> Axis {
        Axis::from_base_on_width(self.base_on_width)
    }

    /// Subunit design size for `axis`, only when configured and positive.
    pub fn subunit_design_size(&self, axis: Axis) -> Option<f32> {
        let size = match axis {
            Axis::Width => self.subunit_design_width,
            Axis::Height => self.subunit_design_height,
        };
        size.filter(|s| *s > 0.0)
    }

    /// Set the app-private font scale; `0` turns it off.
    pub fn set_private_font_scale(&mut self, scale: f32) -> AutoscaleResult<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(AutoscaleError::invalid_argument(format!(
                "private_font_scale must be finite and >= 0 (got {scale})"
            )));
        }
        self.private_font_scale = scale;
        Ok(())
    }

    /// Set the subunit design width.
    pub fn set_subunit_design_width(&mut self, width: f32) -> AutoscaleResult<()> {
        self.subunit_design_width = Some(ensure_positive(width, "subunit_design_width")?);
        Ok(())
    }

    /// Set the subunit design height.
    pub fn set_subunit_design_height(&mut self, height: f32) -> AutoscaleResult<()> {
        self.subunit_design_height = Some(ensure_positive(height, "subunit_design_height")?);
        Ok(())
    }

    /// Validate values that may have arrived through deserialization.
    pub fn validate(&self) -> AutoscaleResult<()> {
        if !self.private_font_scale.is_finite() || self.private_font_scale < 0.0 {
            return Err(AutoscaleError::invalid_argument(
                "private_font_scale must be finite and >= 0",
            ));
        }
        for (name, value) in [
            ("subunit_design_width", self.subunit_design_width),
            ("subunit_design_height", self.subunit_design_height),
        ] {
            if let Some(v) = value {
                ensure_positive(v, name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/policy.rs"]
mod tests;
