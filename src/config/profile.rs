use crate::foundation::core::{Axis, Orientation, ensure_positive, ensure_positive_px};
use crate::foundation::error::AutoscaleResult;

/// Physical screen facts plus the unscaled baseline display metrics captured at startup.
///
/// Baselines are the cancellation target: restoring them undoes any scaling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceProfile {
    /// Full screen width in px.
    pub screen_width_px: u32,
    /// Full screen height in px, status bar included.
    pub screen_height_px: u32,
    /// Status bar height in px.
    #[serde(default)]
    pub status_bar_height_px: u32,
    /// Factory density (px per dp).
    pub baseline_density: f32,
    /// Factory density in dpi.
    pub baseline_density_dpi: u32,
    /// Factory scaled density (px per sp), includes the system font scale.
    pub baseline_scaled_density: f32,
    /// Factory horizontal dpi.
    pub baseline_xdpi: f32,
    /// Factory screen width in dp.
    pub baseline_screen_width_dp: u32,
    /// Factory screen height in dp.
    pub baseline_screen_height_dp: u32,
    /// Current orientation.
    #[serde(default)]
    pub orientation: Orientation,
}

/// Configuration change notification from the environment (rotation, resize, font scale).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigurationChange {
    /// New screen width in px.
    pub screen_width_px: u32,
    /// New screen height in px.
    pub screen_height_px: u32,
    /// New orientation.
    pub orientation: Orientation,
    /// New status bar height in px, present when it changed; `0` means hidden.
    #[serde(default)]
    pub status_bar_height_px: Option<u32>,
    /// New system scaled density, present when the font scale changed.
    #[serde(default)]
    pub scaled_density: Option<f32>,
}

impl DeviceProfile {
    /// Screen height minus the status bar, unless `use_device_size` asks for the raw height.
    pub fn effective_height_px(&self, use_device_size: bool) -> u32 {
        if use_device_size {
            self.screen_height_px
        } else {
            self.screen_height_px.saturating_sub(self.status_bar_height_px)
        }
    }

    /// Pixel length of `axis` used as the scaling numerator.
    pub fn screen_size_px(&self, axis: Axis, use_device_size: bool) -> u32 {
        match axis {
            Axis::Width => self.screen_width_px,
            Axis::Height => self.effective_height_px(use_device_size),
        }
    }

    /// Ratio of the system font scale baked into the baselines.
    pub fn system_font_scale(&self) -> f32 {
        self.baseline_scaled_density / self.baseline_density
    }

    /// Validate screen and baseline values.
    pub fn validate(&self) -> AutoscaleResult<()> {
        ensure_positive_px(self.screen_width_px, "screen_width_px")?;
        ensure_positive_px(self.screen_height_px, "screen_height_px")?;
        ensure_positive(self.baseline_density, "baseline_density")?;
        ensure_positive(self.baseline_scaled_density, "baseline_scaled_density")?;
        ensure_positive(self.baseline_xdpi, "baseline_xdpi")?;
        Ok(())
    }

    /// Refresh screen, orientation and (when reported) status bar and scaled density in place.
    pub fn apply_change(&mut self, change: &ConfigurationChange) -> AutoscaleResult<()> {
        ensure_positive_px(change.screen_width_px, "screen_width_px")?;
        ensure_positive_px(change.screen_height_px, "screen_height_px")?;
        if let Some(sd) = change.scaled_density.filter(|sd| *sd > 0.0) {
            self.baseline_scaled_density = ensure_positive(sd, "scaled_density")?;
        }
        if let Some(height) = change.status_bar_height_px {
            self.status_bar_height_px = height;
        }
        self.screen_width_px = change.screen_width_px;
        self.screen_height_px = change.screen_height_px;
        self.orientation = change.orientation;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/profile.rs"]
mod tests;
