//! Property-based tests for screen metric computation and viewport
//! resolution.
//!
//! Uses proptest to cover the whole valid input space: the scale factor is
//! always exactly scale_percent/100, effective dimensions always floor, and
//! invalid probe values are always rejected.

use fitview::screen::{RawDisplayMetrics, ScreenInfo, ViewportPolicy};
use proptest::prelude::*;

fn arb_valid_metrics() -> impl Strategy<Value = RawDisplayMetrics> {
    (1i64..=16384, 1i64..=16384, 1i64..=1000).prop_map(|(width, height, scale_percent)| {
        RawDisplayMetrics {
            width,
            height,
            scale_percent,
        }
    })
}

proptest! {
    #[test]
    fn scale_factor_is_exactly_percent_over_hundred(raw in arb_valid_metrics()) {
        let info = ScreenInfo::compute(raw).unwrap();
        prop_assert_eq!(info.scale_factor, raw.scale_percent as f64 / 100.0);
    }

    #[test]
    fn effective_dimensions_floor_the_division(raw in arb_valid_metrics()) {
        let info = ScreenInfo::compute(raw).unwrap();
        let scale = raw.scale_percent as f64 / 100.0;
        prop_assert_eq!(info.effective_width() as f64, (raw.width as f64 / scale).floor());
        prop_assert_eq!(info.effective_height() as f64, (raw.height as f64 / scale).floor());
    }

    #[test]
    fn effective_never_exceeds_physical_at_scale_above_100(
        (width, height) in (1i64..=16384, 1i64..=16384),
        scale_percent in 100i64..=1000,
    ) {
        let info = ScreenInfo::compute(RawDisplayMetrics { width, height, scale_percent }).unwrap();
        prop_assert!(info.effective_width() <= width as u32);
        prop_assert!(info.effective_height() <= height as u32);
    }

    #[test]
    fn non_positive_scale_is_rejected(
        (width, height) in (1i64..=16384, 1i64..=16384),
        scale_percent in -1000i64..=0,
    ) {
        let result = ScreenInfo::compute(RawDisplayMetrics { width, height, scale_percent });
        prop_assert!(result.is_err());
    }

    #[test]
    fn non_positive_dimensions_are_rejected(
        width in -4096i64..=0,
        height in 1i64..=16384,
        scale_percent in 1i64..=400,
    ) {
        let bad_width = ScreenInfo::compute(RawDisplayMetrics { width, height, scale_percent });
        prop_assert!(bad_width.is_err());
        let bad_height = ScreenInfo::compute(RawDisplayMetrics {
            width: height,
            height: width,
            scale_percent,
        });
        prop_assert!(bad_height.is_err());
    }

    #[test]
    fn fixed_target_ignores_screen_entirely(
        raw in arb_valid_metrics(),
        (tw, th) in (1u32..=8192, 1u32..=8192),
    ) {
        let screen = ScreenInfo::compute(raw).unwrap();
        let viewport = ViewportPolicy::FixedTarget { width: tw, height: th }
            .resolve(&screen, (0, 0))
            .unwrap();
        prop_assert_eq!(viewport.width, tw);
        prop_assert_eq!(viewport.height, th);
    }

    #[test]
    fn effective_policy_subtracts_offset_or_fails(
        raw in arb_valid_metrics(),
        (dx, dy) in (0u32..=4096, 0u32..=4096),
    ) {
        let screen = ScreenInfo::compute(raw).unwrap();
        match ViewportPolicy::Effective.resolve(&screen, (dx, dy)) {
            Ok(viewport) => {
                prop_assert_eq!(viewport.width, screen.effective_width() - dx);
                prop_assert_eq!(viewport.height, screen.effective_height() - dy);
                prop_assert!(viewport.width > 0 && viewport.height > 0);
            }
            Err(_) => {
                prop_assert!(dx >= screen.effective_width() || dy >= screen.effective_height());
            }
        }
    }
}
