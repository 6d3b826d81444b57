//! Error types for fitview
//!
//! This module provides the error type hierarchy using `thiserror`,
//! one enum per failure domain composed into a top-level [`Error`].

use thiserror::Error;

/// The main error type for fitview operations
#[derive(Error, Debug)]
pub enum Error {
    /// Display probe errors
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Screen metric computation errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Viewport resolution errors
    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Capture errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Interactive input source errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Display probe errors: the external display query failed or lied
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Probe command could not be spawned
    #[error("Failed to spawn display probe `{command}`: {message}")]
    Spawn {
        /// Command that failed to start
        command: String,
        /// Underlying spawn failure
        message: String,
    },

    /// Probe command exited non-zero
    #[error("Display probe exited with {status}: {stderr}")]
    CommandFailed {
        /// Exit status description
        status: String,
        /// Captured stderr
        stderr: String,
    },

    /// Probe produced fewer than three integer lines
    #[error("Malformed display probe output: {0}")]
    MalformedOutput(String),
}

/// Screen metric computation errors
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Physical dimensions out of range
    #[error("Invalid display dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Reported physical width
        width: i64,
        /// Reported physical height
        height: i64,
    },

    /// Scale percentage out of range
    #[error("Invalid display scale {0}%: must be positive")]
    InvalidScale(i64),
}

/// Viewport resolution errors
#[derive(Error, Debug)]
pub enum ViewportError {
    /// Offset subtraction left no usable viewport
    #[error("Degenerate viewport {width}x{height} after offset ({dx},{dy})")]
    Degenerate {
        /// Base width before offset
        width: u32,
        /// Base height before offset
        height: u32,
        /// Horizontal offset
        dx: u32,
        /// Vertical offset
        dy: u32,
    },
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create the session page
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),
}

/// Capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    /// CDP screenshot failed (page closed, render target invalidated, ...)
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    /// Image bytes could not be written to disk
    #[error("Failed to write screenshot to {path}: {message}")]
    WriteFailed {
        /// Destination path
        path: String,
        /// Underlying I/O failure
        message: String,
    },
}

/// Interactive input source errors (transient by contract)
#[derive(Error, Debug)]
pub enum InputError {
    /// Terminal raw mode could not be entered or restored
    #[error("Terminal raw mode error: {0}")]
    RawMode(String),

    /// A single read from the input source failed; the source stays usable
    #[error("Input read failed: {0}")]
    ReadFailed(String),
}

/// Result type alias for fitview operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Browser(BrowserError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_probe_error() {
        let err = ProbeError::MalformedOutput("expected 3 lines, got 1".to_string());
        assert!(err.to_string().contains("Malformed display probe output"));
    }

    #[test]
    fn test_metrics_error() {
        let err = MetricsError::InvalidScale(0);
        assert_eq!(err.to_string(), "Invalid display scale 0%: must be positive");
    }

    #[test]
    fn test_viewport_error() {
        let err = ViewportError::Degenerate {
            width: 1920,
            height: 1080,
            dx: 0,
            dy: 2000,
        };
        assert!(err.to_string().contains("Degenerate viewport"));
        assert!(err.to_string().contains("(0,2000)"));
    }

    #[test]
    fn test_navigation_error() {
        let err = NavigationError::Timeout(30000);
        assert!(err.to_string().contains("30000"));
    }

    #[test]
    fn test_capture_error_wraps_into_top_level() {
        let err: Error = CaptureError::ScreenshotFailed("target gone".to_string()).into();
        assert!(err.to_string().contains("Capture error"));
    }
}
