use crate::config::profile::DeviceProfile;

/// Writable display metrics target.
///
/// Each setter corresponds to one policy gate in
/// [`ScalingEngine::apply_metrics`](crate::ScalingEngine::apply_metrics); a sink never sees
/// a write the policy disabled.
pub trait MetricsSink {
    /// Write px-per-dp density and its dpi form (gated by `support_dp`).
    fn set_density(&mut self, density: f32, density_dpi: u32);
    /// Write px-per-sp density (gated by `support_sp`).
    fn set_scaled_density(&mut self, scaled_density: f32);
    /// Write horizontal dpi, already re-multiplied for the active subunit.
    fn set_xdpi(&mut self, xdpi: f32);
    /// Write screen size in dp (gated by `support_dp && support_screen_size_dp`).
    fn set_screen_size_dp(&mut self, width_dp: u32, height_dp: u32);
}

/// Plain display metrics value; the in-memory sink used by hosts, tests and the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayMetrics {
    /// Px per dp.
    pub density: f32,
    /// Density in dpi.
    pub density_dpi: u32,
    /// Px per sp.
    pub scaled_density: f32,
    /// Horizontal dpi.
    pub xdpi: f32,
    /// Screen width in dp.
    pub screen_width_dp: u32,
    /// Screen height in dp.
    pub screen_height_dp: u32,
}

impl DisplayMetrics {
    /// Metrics as the device reported them before any scaling.
    pub fn baseline(profile: &DeviceProfile) -> Self {
        Self {
            density: profile.baseline_density,
            density_dpi: profile.baseline_density_dpi,
            scaled_density: profile.baseline_scaled_density,
            xdpi: profile.baseline_xdpi,
            screen_width_dp: profile.baseline_screen_width_dp,
            screen_height_dp: profile.baseline_screen_height_dp,
        }
    }
}

impl MetricsSink for DisplayMetrics {
    fn set_density(&mut self, density: f32, density_dpi: u32) {
        self.density = density;
        self.density_dpi = density_dpi;
    }

    fn set_scaled_density(&mut self, scaled_density: f32) {
        self.scaled_density = scaled_density;
    }

    fn set_xdpi(&mut self, xdpi: f32) {
        self.xdpi = xdpi;
    }

    fn set_screen_size_dp(&mut self, width_dp: u32, height_dp: u32) {
        self.screen_width_dp = width_dp;
        self.screen_height_dp = height_dp;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/display.rs"]
mod tests;
