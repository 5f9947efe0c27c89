use crate::config::profile::DeviceProfile;
use crate::foundation::core::Subunit;

/// Result of one scaling computation; the cache payload.
///
/// `xdpi` is stored per subunit (px per pt / in / mm), not per inch. Sinks receive it
/// re-multiplied for the active subunit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComputedMetrics {
    /// Px per dp.
    pub density: f32,
    /// `round(density * 160)`.
    pub density_dpi: u32,
    /// Px per sp.
    pub scaled_density: f32,
    /// Px per subunit.
    pub xdpi: f32,
    /// `floor(screen_width_px / density)`.
    pub screen_width_dp: u32,
    /// `floor(screen_height_px / density)`.
    pub screen_height_dp: u32,
}

impl ComputedMetrics {
    /// Baseline metrics with xdpi expressed per `subunit`.
    pub fn baseline(profile: &DeviceProfile, subunit: Subunit) -> Self {
        Self {
            density: profile.baseline_density,
            density_dpi: profile.baseline_density_dpi,
            scaled_density: profile.baseline_scaled_density,
            xdpi: profile.baseline_xdpi / subunit.per_inch(),
            screen_width_dp: profile.baseline_screen_width_dp,
            screen_height_dp: profile.baseline_screen_height_dp,
        }
    }

    /// Bit-level equality, stricter than `PartialEq` for floats.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.density.to_bits() == other.density.to_bits()
            && self.density_dpi == other.density_dpi
            && self.scaled_density.to_bits() == other.scaled_density.to_bits()
            && self.xdpi.to_bits() == other.xdpi.to_bits()
            && self.screen_width_dp == other.screen_width_dp
            && self.screen_height_dp == other.screen_height_dp
    }
}
