//! Fixed locale profile
//!
//! Sessions run with a single target locale profile (Japanese UI, Tokyo
//! timezone and coordinates) applied uniformly at page creation over CDP.
//! The profile is deliberately not configurable per call.

use crate::error::{Error, Result};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetGeolocationOverrideParams, SetLocaleOverrideParams, SetTimezoneOverrideParams,
};
use chromiumoxide::Page;
use tracing::{debug, instrument};

/// Locale, timezone, and geolocation overrides for a session
#[derive(Debug, Clone)]
pub struct LocaleProfile {
    /// BCP 47 locale tag
    pub locale: &'static str,
    /// IANA timezone identifier
    pub timezone: &'static str,
    /// Override latitude
    pub latitude: f64,
    /// Override longitude
    pub longitude: f64,
    /// Override accuracy in meters
    pub accuracy: f64,
    /// Accept-Language header value
    pub accept_language: &'static str,
}

impl Default for LocaleProfile {
    /// The target deployment profile: ja-JP, Tokyo
    fn default() -> Self {
        Self {
            locale: "ja-JP",
            timezone: "Asia/Tokyo",
            latitude: 35.681236,
            longitude: 139.767125,
            accuracy: 100.0,
            accept_language: "ja-JP,ja;q=0.9,en;q=0.8",
        }
    }
}

impl LocaleProfile {
    /// Value for Chromium's `--lang` argument
    pub fn browser_lang_arg(&self) -> String {
        format!("{},{}", self.locale, self.locale.split('-').next().unwrap_or(self.locale))
    }

    /// Apply the profile's CDP emulation overrides to a page
    #[instrument(skip(self, page))]
    pub async fn apply(&self, page: &Page) -> Result<()> {
        debug!("Applying locale profile: {} / {}", self.locale, self.timezone);

        page.execute(
            SetLocaleOverrideParams::builder()
                .locale(self.locale)
                .build(),
        )
        .await
        .map_err(|e| Error::cdp(format!("Failed to override locale: {}", e)))?;

        page.execute(SetTimezoneOverrideParams::new(self.timezone))
            .await
            .map_err(|e| Error::cdp(format!("Failed to override timezone: {}", e)))?;

        page.execute(
            SetGeolocationOverrideParams::builder()
                .latitude(self.latitude)
                .longitude(self.longitude)
                .accuracy(self.accuracy)
                .build(),
        )
        .await
        .map_err(|e| Error::cdp(format!("Failed to override geolocation: {}", e)))?;

        debug!("Locale profile applied");
        Ok(())
    }
}
