//! Length unit conversion against live display metrics.

use crate::sink::display::DisplayMetrics;

/// Layout length units understood by [`to_px`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
pub enum Unit {
    /// Raw pixels.
    Px,
    /// Density-independent pixels.
    Dp,
    /// Scale-independent pixels (text).
    Sp,
    /// Points, 1/72 inch.
    Pt,
    /// Inches.
    In,
    /// Millimeters.
    Mm,
}

/// Convert `value` in `unit` to unrounded pixels.
pub fn to_px_f32(value: f32, unit: Unit, metrics: &DisplayMetrics) -> f32 {
    match unit {
        Unit::Px => value,
        Unit::Dp => value * metrics.density,
        Unit::Sp => value * metrics.scaled_density,
        Unit::Pt => value * metrics.xdpi / 72.0,
        Unit::In => value * metrics.xdpi,
        Unit::Mm => value * metrics.xdpi / 25.4,
    }
}

/// Convert `value` in `unit` to whole pixels, rounding half up (`+0.5` then truncate).
pub fn to_px(value: f32, unit: Unit, metrics: &DisplayMetrics) -> i32 {
    (to_px_f32(value, unit, metrics) + 0.5) as i32
}

#[cfg(test)]
#[path = "../tests/unit/units.rs"]
mod tests;
