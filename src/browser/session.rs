//! Browser session lifecycle
//!
//! A [`Session`] owns exactly one browser process and one page for its whole
//! scope: launch acquires both, [`Session::close`] releases them in order
//! (page before process, each exactly once). Locale and basic-auth overrides
//! are applied at creation time and never mutated mid-session.

use crate::auth::Credentials;
use crate::browser::locale::LocaleProfile;
use crate::browser::navigation::{self, NavigationOptions, WaitUntil};
use crate::error::{BrowserError, Error, Result};
use crate::screen::ViewportSpec;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::cdp::browser_protocol::security::SetIgnoreCertificateErrorsParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Configuration for launching a session
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Run in headless mode (default: false; interactive sessions are
    /// meant to be visible)
    pub headless: bool,
    /// HTTP basic-auth credentials, applied as an extra header at creation
    pub credentials: Option<Credentials>,
    /// Path to an alternate Chrome/Chromium binary (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Ignore TLS certificate errors (default: false)
    pub ignore_https_errors: bool,
    /// Enable the Chromium sandbox (default: true)
    pub sandbox: bool,
    /// Navigation timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Readiness condition for navigations (default: load + network settle)
    pub wait_until: WaitUntil,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            headless: false,
            credentials: None,
            chrome_path: None,
            ignore_https_errors: false,
            sandbox: true,
            timeout_ms: 30000,
            wait_until: WaitUntil::NetworkSettle,
            extra_args: Vec::new(),
        }
    }
}

impl LaunchConfig {
    /// Create a new config builder
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder::default()
    }
}

/// Builder for [`LaunchConfig`]
#[derive(Default)]
pub struct LaunchConfigBuilder {
    config: LaunchConfig,
}

impl LaunchConfigBuilder {
    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Set basic-auth credentials
    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Set an alternate browser binary
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Ignore TLS certificate errors
    pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_https_errors = ignore;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set navigation timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the readiness condition navigations wait for
    pub fn wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.config.wait_until = wait_until;
        self
    }

    /// Add an extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> LaunchConfig {
        self.config
    }
}

/// A launched browser session: one process, one page, one scope
pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    config: LaunchConfig,
}

impl Session {
    /// Launch a browser sized to `viewport` and open the session page.
    ///
    /// The fixed locale profile and any basic-auth credentials are applied
    /// here, before the first navigation.
    #[instrument(skip(config))]
    pub async fn launch(viewport: ViewportSpec, config: LaunchConfig) -> Result<Self> {
        info!(
            "Launching browser: viewport {}, headless={}",
            viewport, config.headless
        );

        let profile = LocaleProfile::default();

        let mut builder = CdpBrowserConfig::builder();

        builder = builder.viewport(chromiumoxide::handler::viewport::Viewport {
            width: viewport.width,
            height: viewport.height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        });

        builder = builder
            .arg(format!(
                "--window-size={},{}",
                viewport.width, viewport.height
            ))
            .arg(format!("--lang={}", profile.browser_lang_arg()));

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.arg("--no-sandbox");
        }

        if config.ignore_https_errors {
            builder = builder.arg("--ignore-certificate-errors");
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        for arg in &config.extra_args {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| BrowserError::ConfigError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        let session = Self {
            browser,
            handler: handler_task,
            page,
            config,
        };

        session.configure_page(&profile).await?;

        info!("Browser launched");
        Ok(session)
    }

    /// Apply the locale profile and auth headers to the session page.
    /// Runs once, at creation; the overrides are uniform for the session.
    async fn configure_page(&self, profile: &LocaleProfile) -> Result<()> {
        profile.apply(&self.page).await?;

        // One header map per session: SetExtraHttpHeaders replaces the whole
        // set, so Accept-Language and Authorization travel together.
        let mut headers = serde_json::Map::new();
        headers.insert(
            "Accept-Language".to_string(),
            serde_json::Value::String(profile.accept_language.to_string()),
        );
        if let Some(ref credentials) = self.config.credentials {
            debug!("Configuring basic-auth for user {}", credentials.username);
            headers.insert(
                "Authorization".to_string(),
                serde_json::Value::String(credentials.basic_header_value()),
            );
        }

        self.page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(
                serde_json::Value::Object(headers),
            )))
            .await
            .map_err(|e| Error::cdp(format!("Failed to set session headers: {}", e)))?;

        if self.config.ignore_https_errors {
            self.page
                .execute(SetIgnoreCertificateErrorsParams::new(true))
                .await
                .map_err(|e| Error::cdp(format!("Failed to relax TLS checks: {}", e)))?;
        }

        Ok(())
    }

    /// Navigate the session page to `url`. No retries; a failure is final.
    #[instrument(skip(self))]
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let options = NavigationOptions {
            timeout_ms: self.config.timeout_ms,
            wait_until: self.config.wait_until,
        };
        navigation::goto(&self.page, url, &options).await?;
        Ok(())
    }

    /// Capture the session page to `path`, creating parent directories.
    #[instrument(skip(self))]
    pub async fn screenshot(&self, path: &Path, full_page: bool) -> Result<()> {
        super::capture::write_screenshot(&self.page, path, full_page).await
    }

    /// Get the launch configuration
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Close the session: page first, then the browser process, each once.
    ///
    /// Consumes the session; it is not reusable afterwards. A page-close
    /// failure is logged but never skips the process close.
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        info!("Closing session");

        if let Err(e) = self.page.close().await {
            warn!("Page close failed (continuing to browser close): {}", e);
        }

        self.browser
            .close()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;

        let _ = tokio::time::timeout(Duration::from_secs(5), self.handler).await;

        info!("Session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_config_default() {
        let config = LaunchConfig::default();
        assert!(!config.headless);
        assert!(config.credentials.is_none());
        assert!(config.chrome_path.is_none());
        assert!(!config.ignore_https_errors);
        assert!(config.sandbox);
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.wait_until, WaitUntil::NetworkSettle);
    }

    #[test]
    fn test_launch_config_builder() {
        let config = LaunchConfig::builder()
            .headless(true)
            .credentials(Some(Credentials::new("u", "p")))
            .chrome_path("/usr/bin/google-chrome")
            .ignore_https_errors(true)
            .sandbox(false)
            .timeout_ms(60000)
            .wait_until(WaitUntil::Load)
            .arg("--disable-gpu")
            .build();

        assert!(config.headless);
        assert_eq!(config.credentials, Some(Credentials::new("u", "p")));
        assert_eq!(
            config.chrome_path,
            Some("/usr/bin/google-chrome".to_string())
        );
        assert!(config.ignore_https_errors);
        assert!(!config.sandbox);
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.wait_until, WaitUntil::Load);
        assert_eq!(config.extra_args, vec!["--disable-gpu"]);
    }
}
