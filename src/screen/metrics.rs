//! Screen metric computation
//!
//! Pure conversion from raw probe output into validated [`ScreenInfo`].
//! No I/O happens here; the probe that gathers the raw values lives in
//! [`crate::screen::probe`].

use crate::error::MetricsError;
use serde::{Deserialize, Serialize};

/// Raw values reported by the display probe, unvalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDisplayMetrics {
    /// Physical width in pixels
    pub width: i64,
    /// Physical height in pixels
    pub height: i64,
    /// OS DPI scale as a percentage (100 = no scaling)
    pub scale_percent: i64,
}

/// Validated screen metrics for the primary display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    /// Physical width in pixels
    pub width: u32,
    /// Physical height in pixels
    pub height: u32,
    /// DPI scale factor (1.0 = 100%)
    pub scale_factor: f64,
}

impl ScreenInfo {
    /// Validate raw probe output and derive the scale factor.
    ///
    /// Rejects non-positive dimensions and non-positive scale percentages
    /// rather than defaulting: a zero scale factor would make the effective
    /// dimensions undefined.
    pub fn compute(raw: RawDisplayMetrics) -> Result<Self, MetricsError> {
        if raw.width <= 0 || raw.height <= 0 {
            return Err(MetricsError::InvalidDimensions {
                width: raw.width,
                height: raw.height,
            });
        }
        if raw.scale_percent <= 0 {
            return Err(MetricsError::InvalidScale(raw.scale_percent));
        }

        Ok(Self {
            width: raw.width as u32,
            height: raw.height as u32,
            scale_factor: raw.scale_percent as f64 / 100.0,
        })
    }

    /// Width at which UI layout logically operates (floor of physical / scale)
    pub fn effective_width(&self) -> u32 {
        (self.width as f64 / self.scale_factor) as u32
    }

    /// Height at which UI layout logically operates (floor of physical / scale)
    pub fn effective_height(&self) -> u32 {
        (self.height as f64 / self.scale_factor) as u32
    }
}

impl std::fmt::Display for ScreenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} @ {:.0}%",
            self.width,
            self.height,
            self.scale_factor * 100.0
        )
    }
}
