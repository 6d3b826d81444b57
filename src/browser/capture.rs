//! Screenshot capture to disk
//!
//! PNG capture over CDP plus the file-side conventions: parent directories
//! are created on demand and interactive captures get timestamp-derived
//! names.

use crate::error::{CaptureError, Result};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use chrono::{DateTime, Local};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Capture `page` as PNG and write it to `path`.
///
/// Parent directories are created if absent. Capture failures (page closed,
/// render target invalidated mid-capture) and write failures are reported
/// separately so interactive callers can tell them apart in logs.
#[instrument(skip(page))]
pub async fn write_screenshot(page: &Page, path: &Path, full_page: bool) -> Result<()> {
    info!("Capturing screenshot to {}", path.display());

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .from_surface(true)
        .capture_beyond_viewport(full_page)
        .build();

    let data = page
        .screenshot(params)
        .await
        .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

    debug!("Screenshot captured: {} bytes", data.len());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CaptureError::WriteFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
        }
    }

    tokio::fs::write(path, &data)
        .await
        .map_err(|e| CaptureError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    info!("Screenshot saved: {}", path.display());
    Ok(())
}

/// Filename for an interactive capture taken at `now`:
/// `screenshot_YYYYMMDD_HHMMSS.png`
pub fn timestamp_filename(now: DateTime<Local>) -> String {
    format!("screenshot_{}.png", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_filename_format() {
        let at = Local.with_ymd_and_hms(2026, 8, 26, 14, 3, 9).unwrap();
        assert_eq!(timestamp_filename(at), "screenshot_20260826_140309.png");
    }

    #[test]
    fn test_timestamp_filename_shape() {
        let name = timestamp_filename(Local::now());
        assert!(name.starts_with("screenshot_"));
        assert!(name.ends_with(".png"));
        // screenshot_ + 8 digits + _ + 6 digits + .png
        assert_eq!(name.len(), "screenshot_".len() + 8 + 1 + 6 + ".png".len());
    }
}
