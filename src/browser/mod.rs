//! Browser automation module
//!
//! High-level session control through ChromiumOxide: scoped lifecycle,
//! single-attempt navigation, screenshot capture, and the fixed locale
//! profile applied at session creation.

pub mod capture;
pub mod locale;
pub mod navigation;
pub mod session;

pub use capture::{timestamp_filename, write_screenshot};
pub use locale::LocaleProfile;
pub use navigation::{NavigationOptions, NavigationResult, WaitUntil};
pub use session::{LaunchConfig, LaunchConfigBuilder, Session};
