//! Page navigation
//!
//! Single-attempt navigation with timeout and a readiness wait. There is no
//! retry logic anywhere in this program: a failed navigation is final, and
//! every retry-like behavior is a human pressing a key again.

use crate::error::{Error, NavigationError, Result};
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Options for page navigation
#[derive(Debug, Clone)]
pub struct NavigationOptions {
    /// Timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Readiness condition to wait for (default: load + network settle)
    pub wait_until: WaitUntil,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            wait_until: WaitUntil::NetworkSettle,
        }
    }
}

/// Condition to wait for after navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Wait until the load event fires
    Load,
    /// Wait until DOMContentLoaded fires
    DomContentLoaded,
    /// Wait until load, then a short settle window for late requests
    NetworkSettle,
}

/// Result of a navigation
#[derive(Debug)]
pub struct NavigationResult {
    /// Final URL after any redirects
    pub final_url: String,
    /// Page title, if any
    pub title: Option<String>,
    /// Navigation duration in milliseconds
    pub duration_ms: u64,
}

/// Navigate `page` to `url` and wait for readiness.
#[instrument(skip(page))]
pub async fn goto(page: &Page, url: &str, options: &NavigationOptions) -> Result<NavigationResult> {
    validate_url(url)?;

    info!("Navigating to: {}", url);
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(options.timeout_ms);

    tokio::time::timeout(timeout, page.goto(url))
        .await
        .map_err(|_| NavigationError::Timeout(options.timeout_ms))?
        .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

    tokio::time::timeout(timeout, wait_for_ready(page, options.wait_until))
        .await
        .map_err(|_| NavigationError::Timeout(options.timeout_ms))??;

    let final_url = page
        .url()
        .await
        .map_err(|e| Error::cdp(e.to_string()))?
        .unwrap_or_else(|| url.to_string());

    let title = page
        .evaluate("document.title")
        .await
        .ok()
        .and_then(|v| v.into_value::<String>().ok())
        .filter(|t| !t.is_empty());

    let duration_ms = start.elapsed().as_millis() as u64;
    debug!("Navigation complete: {} -> {} ({}ms)", url, final_url, duration_ms);

    Ok(NavigationResult {
        final_url,
        title,
        duration_ms,
    })
}

/// Validate a URL scheme for navigation
pub fn validate_url(url: &str) -> std::result::Result<(), NavigationError> {
    if url.is_empty() {
        return Err(NavigationError::InvalidUrl("URL cannot be empty".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") && !url.starts_with("file://") {
        return Err(NavigationError::InvalidUrl(format!(
            "URL must start with http://, https://, or file://: {}",
            url
        )));
    }
    Ok(())
}

/// Wait for the page to satisfy the readiness condition
async fn wait_for_ready(page: &Page, wait_until: WaitUntil) -> Result<()> {
    let script = match wait_until {
        WaitUntil::Load => {
            r#"
                new Promise(resolve => {
                    if (document.readyState === 'complete') {
                        resolve(true);
                    } else {
                        window.addEventListener('load', () => resolve(true));
                    }
                })
            "#
        }
        WaitUntil::DomContentLoaded => {
            r#"
                new Promise(resolve => {
                    if (document.readyState !== 'loading') {
                        resolve(true);
                    } else {
                        document.addEventListener('DOMContentLoaded', () => resolve(true));
                    }
                })
            "#
        }
        WaitUntil::NetworkSettle => {
            r#"
                new Promise(resolve => {
                    if (document.readyState === 'complete') {
                        setTimeout(() => resolve(true), 500);
                    } else {
                        window.addEventListener('load', () => {
                            setTimeout(() => resolve(true), 500);
                        });
                    }
                })
            "#
        }
    };

    page.evaluate(script)
        .await
        .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_http_https_file() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/path?q=1").is_ok());
        assert!(validate_url("file:///tmp/page.html").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            validate_url(""),
            Err(NavigationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(NavigationError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("example.com"),
            Err(NavigationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_options() {
        let opts = NavigationOptions::default();
        assert_eq!(opts.timeout_ms, 30000);
        assert_eq!(opts.wait_until, WaitUntil::NetworkSettle);
    }
}
