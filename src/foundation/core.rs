use crate::foundation::error::{AutoscaleError, AutoscaleResult};

/// Screen axis a design size is matched against.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Axis {
    /// Scale so the design width spans the screen width.
    #[default]
    Width,
    /// Scale so the design height spans the (effective) screen height.
    Height,
}

impl Axis {
    /// Map the legacy `base_on_width` flag to an axis.
    pub fn from_base_on_width(base_on_width: bool) -> Self {
        if base_on_width {
            Self::Width
        } else {
            Self::Height
        }
    }

    /// Return `true` for [`Axis::Width`].
    pub fn is_width(self) -> bool {
        self == Self::Width
    }
}

/// One reference dimension of a layout, in dp.
///
/// Construction is unchecked because override records may carry `size_in_dp <= 0` to mean
/// "use the global design size for this axis". Engine entry points validate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignSpec {
    /// Axis the size refers to.
    pub base_on: Axis,
    /// Design size in dp along `base_on`.
    #[serde(default)]
    pub size_in_dp: f32,
}

impl DesignSpec {
    /// Design spec matched against the screen width.
    pub fn width(size_in_dp: f32) -> Self {
        Self {
            base_on: Axis::Width,
            size_in_dp,
        }
    }

    /// Design spec matched against the screen height.
    pub fn height(size_in_dp: f32) -> Self {
        Self {
            base_on: Axis::Height,
            size_in_dp,
        }
    }

    /// Return `true` if this design spec is matched against the screen width.
    pub fn is_base_on_width(&self) -> bool {
        self.base_on.is_width()
    }

    /// Return `true` when the size is non-positive and must fall back to the global size.
    pub fn needs_global_size(&self) -> bool {
        self.size_in_dp.is_nan() || self.size_in_dp <= 0.0
    }

    /// Validate that the size is finite and strictly positive.
    pub fn validate(&self) -> AutoscaleResult<()> {
        ensure_positive(self.size_in_dp, "size_in_dp").map(|_| ())
    }
}

/// Secondary length unit used to carry scaling without touching dp/sp.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Subunit {
    /// No secondary unit.
    #[default]
    None,
    /// Points (1/72 inch).
    Pt,
    /// Inches.
    In,
    /// Millimeters.
    Mm,
}

impl Subunit {
    /// Return `true` unless this is [`Subunit::None`].
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Number of subunits per inch; xdpi is divided by this when restoring baselines and
    /// multiplied by it when writing to sinks.
    pub fn per_inch(self) -> f32 {
        match self {
            Self::None | Self::In => 1.0,
            Self::Pt => 72.0,
            Self::Mm => 25.4,
        }
    }
}

/// Screen orientation reported by the environment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// Return `true` for portrait.
    pub fn is_vertical(self) -> bool {
        self == Self::Portrait
    }
}

pub(crate) fn ensure_positive(value: f32, what: &str) -> AutoscaleResult<f32> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AutoscaleError::invalid_argument(format!(
            "{what} must be finite and > 0 (got {value})"
        )));
    }
    Ok(value)
}

pub(crate) fn ensure_positive_px(value: u32, what: &str) -> AutoscaleResult<u32> {
    if value == 0 {
        return Err(AutoscaleError::invalid_argument(format!("{what} must be > 0")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
