//! Display probe
//!
//! Queries the host OS for the primary display's physical resolution and DPI
//! scale by shelling out to PowerShell. The probe is the only impure part of
//! screen detection; parsing its output is a pure function so it can be
//! tested without a Windows host.

use crate::error::{ProbeError, Result};
use crate::screen::RawDisplayMetrics;
use tokio::process::Command;
use tracing::{debug, instrument};

/// PowerShell script emitting physical width, physical height, and scale
/// percentage, one integer per line. Scale falls back to 100 only when the
/// video controller reports no effective resolution at all; a malformed
/// emission is still rejected by the parser.
const PROBE_SCRIPT: &str = r#"
Add-Type -AssemblyName System.Windows.Forms
$screen = [System.Windows.Forms.Screen]::PrimaryScreen
$physicalWidth = $screen.Bounds.Width
$physicalHeight = $screen.Bounds.Height

$videoController = Get-CimInstance Win32_VideoController | Select-Object -First 1
$effectiveWidth = $videoController.CurrentHorizontalResolution

if ($effectiveWidth -and $effectiveWidth -gt 0) {
    $scale = [math]::Round($physicalWidth / $effectiveWidth * 100)
} else {
    $scale = 100
}

Write-Output $physicalWidth
Write-Output $physicalHeight
Write-Output $scale
"#;

/// Probe backed by `powershell.exe` (works from WSL and native Windows)
#[derive(Debug, Clone)]
pub struct PowerShellProbe {
    command: String,
}

impl Default for PowerShellProbe {
    fn default() -> Self {
        Self {
            command: "powershell.exe".to_string(),
        }
    }
}

impl PowerShellProbe {
    /// Probe using an alternate PowerShell binary (e.g. `pwsh`)
    pub fn with_command<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Run the probe and return the raw, unvalidated display metrics.
    ///
    /// Fails on spawn error, non-zero exit, or malformed output; never
    /// substitutes defaults for values the host did not report.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> Result<RawDisplayMetrics> {
        debug!("Running display probe: {}", self.command);

        let output = Command::new(&self.command)
            .args(["-NoProfile", "-Command", PROBE_SCRIPT])
            .output()
            .await
            .map_err(|e| ProbeError::Spawn {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let raw = parse_probe_output(&stdout)?;
        debug!(
            "Probe reported {}x{} at {}%",
            raw.width, raw.height, raw.scale_percent
        );
        Ok(raw)
    }
}

/// Parse probe stdout: exactly three well-formed integer lines, in order
/// physical width, physical height, scale percent. Blank lines and
/// surrounding whitespace (CRLF from PowerShell) are tolerated.
pub fn parse_probe_output(stdout: &str) -> std::result::Result<RawDisplayMetrics, ProbeError> {
    let values: Vec<i64> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<i64>().map_err(|_| {
                ProbeError::MalformedOutput(format!("non-integer line: {:?}", line))
            })
        })
        .collect::<std::result::Result<_, _>>()?;

    if values.len() < 3 {
        return Err(ProbeError::MalformedOutput(format!(
            "expected 3 integer lines, got {}",
            values.len()
        )));
    }

    Ok(RawDisplayMetrics {
        width: values[0],
        height: values[1],
        scale_percent: values[2],
    })
}
