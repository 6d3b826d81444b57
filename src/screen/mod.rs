//! Screen detection and viewport derivation
//!
//! This module turns a raw display probe into a validated [`ScreenInfo`] and
//! derives the browser viewport from it via an explicit [`ViewportPolicy`].

pub mod metrics;
pub mod probe;
pub mod viewport;

pub use metrics::{RawDisplayMetrics, ScreenInfo};
pub use probe::{parse_probe_output, PowerShellProbe};
pub use viewport::{ViewportPolicy, ViewportSpec, FULL_HD};
