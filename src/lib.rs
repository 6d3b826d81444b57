//! fitview - DPI-aware browser launch and screenshot capture
//!
//! This crate launches Chromium at a viewport matched to the host display's
//! effective (DPI-adjusted) resolution, navigates to a URL with optional
//! HTTP basic-auth, and captures screenshots once or through an interactive
//! key-driven loop.
//!
//! # Architecture
//!
//! ```text
//! Display Probe ──▶ ScreenInfo ──▶ ViewportPolicy ──▶ Session (CDP)
//!                                                        │
//!                                    ┌───────────────────┤
//!                                    ▼                   ▼
//!                             single screenshot   InteractiveCapture
//!                                                 (key-driven loop)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fitview::browser::{LaunchConfig, Session};
//! use fitview::screen::{PowerShellProbe, ScreenInfo, ViewportPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raw = PowerShellProbe::default().probe().await?;
//!     let screen = ScreenInfo::compute(raw)?;
//!     let viewport = ViewportPolicy::Effective.resolve(&screen, (0, 0))?;
//!
//!     let session = Session::launch(viewport, LaunchConfig::default()).await?;
//!     session.navigate("https://example.com").await?;
//!     session.screenshot("page.png".as_ref(), false).await?;
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod browser;
pub mod error;
pub mod interactive;
pub mod screen;

// Re-exports for convenience
pub use auth::{resolve_credentials, split_credentials, Credentials};
pub use browser::{LaunchConfig, Session};
pub use error::{Error, Result};
pub use interactive::{CaptureConfig, CaptureEvent, CaptureState, InteractiveCapture};
pub use screen::{ScreenInfo, ViewportPolicy, ViewportSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
