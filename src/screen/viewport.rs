//! Viewport policy
//!
//! Turns validated screen metrics into the browser viewport size. The policy
//! is an explicit configuration choice: earlier deployments sized the viewport
//! to the display's effective resolution, later ones pinned it to FullHD.
//! Making the mode explicit keeps that decision visible at the call site.

use crate::error::ViewportError;
use crate::screen::ScreenInfo;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the browser's rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSpec {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl std::fmt::Display for ViewportSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The standard FullHD pin target
pub const FULL_HD: (u32, u32) = (1920, 1080);

/// How the viewport is derived from the detected screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportPolicy {
    /// Viewport tracks the display's effective (DPI-adjusted) resolution
    #[default]
    Effective,
    /// Viewport pinned to a fixed target, ignoring the detected screen
    FixedTarget {
        /// Target width before offset
        width: u32,
        /// Target height before offset
        height: u32,
    },
}

impl ViewportPolicy {
    /// The FullHD pinning policy used by fixed-frame deployments
    pub fn full_hd() -> Self {
        ViewportPolicy::FixedTarget {
            width: FULL_HD.0,
            height: FULL_HD.1,
        }
    }

    /// Resolve the viewport for a screen, shrunk by `(dx, dy)`.
    ///
    /// The offset accounts for window chrome (title bar, taskbar) that eats
    /// into the usable frame. Underflow is an error, never a wrap.
    pub fn resolve(
        &self,
        screen: &ScreenInfo,
        offset: (u32, u32),
    ) -> Result<ViewportSpec, ViewportError> {
        let (base_width, base_height) = match *self {
            ViewportPolicy::Effective => (screen.effective_width(), screen.effective_height()),
            ViewportPolicy::FixedTarget { width, height } => (width, height),
        };
        let (dx, dy) = offset;

        let degenerate = || ViewportError::Degenerate {
            width: base_width,
            height: base_height,
            dx,
            dy,
        };

        let width = base_width.checked_sub(dx).ok_or_else(degenerate)?;
        let height = base_height.checked_sub(dy).ok_or_else(degenerate)?;

        if width == 0 || height == 0 {
            return Err(degenerate());
        }

        Ok(ViewportSpec { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::RawDisplayMetrics;

    fn screen(width: i64, height: i64, scale_percent: i64) -> ScreenInfo {
        ScreenInfo::compute(RawDisplayMetrics {
            width,
            height,
            scale_percent,
        })
        .unwrap()
    }

    #[test]
    fn test_effective_policy_with_offset() {
        let s = screen(3840, 2160, 200);
        let vp = ViewportPolicy::Effective.resolve(&s, (0, 100)).unwrap();
        assert_eq!(vp, ViewportSpec { width: 1920, height: 980 });
    }

    #[test]
    fn test_effective_policy_no_offset() {
        let s = screen(1920, 1080, 125);
        let vp = ViewportPolicy::Effective.resolve(&s, (0, 0)).unwrap();
        assert_eq!(vp, ViewportSpec { width: 1536, height: 864 });
    }

    #[test]
    fn test_fixed_target_ignores_screen() {
        let policy = ViewportPolicy::full_hd();
        for s in [screen(3840, 2160, 200), screen(1280, 720, 100), screen(5120, 2880, 150)] {
            let vp = policy.resolve(&s, (0, 0)).unwrap();
            assert_eq!(vp, ViewportSpec { width: 1920, height: 1080 });
        }
    }

    #[test]
    fn test_fixed_target_applies_offset() {
        let policy = ViewportPolicy::FixedTarget { width: 1920, height: 1080 };
        let vp = policy.resolve(&screen(3840, 2160, 200), (20, 120)).unwrap();
        assert_eq!(vp, ViewportSpec { width: 1900, height: 960 });
    }

    #[test]
    fn test_offset_underflow_is_degenerate() {
        let s = screen(1920, 1080, 100);
        let err = ViewportPolicy::Effective.resolve(&s, (0, 2000));
        assert!(matches!(err, Err(ViewportError::Degenerate { .. })));
    }

    #[test]
    fn test_zero_sized_viewport_is_degenerate() {
        let s = screen(1920, 1080, 100);
        let err = ViewportPolicy::Effective.resolve(&s, (1920, 0));
        assert!(matches!(err, Err(ViewportError::Degenerate { .. })));
    }

    #[test]
    fn test_default_policy_is_effective() {
        assert_eq!(ViewportPolicy::default(), ViewportPolicy::Effective);
    }
}
