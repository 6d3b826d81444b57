//! Interactive key-driven capture loop
//!
//! A small state machine over an abstract event source: `Screenshot` events
//! capture the page and return to polling, `Quit` stops the loop. Capture
//! failures and transient input errors are logged and the loop keeps
//! polling; only `Quit` (or the caller unwinding) ends a session.

use crate::browser::{timestamp_filename, Session};
use crate::error::{InputError, Result};
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// An action requested by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Capture a screenshot, then keep polling
    Screenshot,
    /// Stop the loop cleanly
    Quit,
}

/// Loop state, observable for tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for the next event
    Polling,
    /// A capture is in flight (at most one at a time)
    Capturing,
    /// Terminal state after a `Quit`
    Stopped,
}

/// Source of capture events: a lazy, infinite sequence.
///
/// `Ok(None)` means no event arrived within the source's poll window.
/// `Err` is a transient read failure; the source must remain usable
/// afterwards (restartable contract).
pub trait EventSource {
    /// Poll for the next event
    fn next_event(&mut self) -> std::result::Result<Option<CaptureEvent>, InputError>;
}

/// Something screenshots can be written through (the session, in production)
pub trait ScreenshotSink {
    /// Capture to `path`
    fn capture(
        &self,
        path: &Path,
        full_page: bool,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl ScreenshotSink for Session {
    async fn capture(&self, path: &Path, full_page: bool) -> Result<()> {
        self.screenshot(path, full_page).await
    }
}

/// Configuration for the interactive loop
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Directory for timestamp-named screenshots
    pub output_dir: PathBuf,
    /// Capture the full page instead of the viewport
    pub full_page: bool,
    /// Idle delay after an empty poll or transient error
    pub idle_delay: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("screenshots"),
            full_page: false,
            idle_delay: Duration::from_millis(100),
        }
    }
}

/// The interactive capture loop
pub struct InteractiveCapture {
    config: CaptureConfig,
    state: CaptureState,
}

impl InteractiveCapture {
    /// Create a loop in the `Polling` state
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            state: CaptureState::Polling,
        }
    }

    /// Current loop state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Run until a `Quit` event. Teardown of the sink is the caller's job.
    ///
    /// Events are handled strictly in order; a capture completes before the
    /// next event is polled, so there is never more than one in flight.
    #[instrument(skip(self, sink, source))]
    pub async fn run<K: ScreenshotSink, E: EventSource>(
        &mut self,
        sink: &K,
        source: &mut E,
    ) -> Result<()> {
        info!(
            "Interactive capture started (output dir: {})",
            self.config.output_dir.display()
        );

        loop {
            match source.next_event() {
                Ok(Some(CaptureEvent::Screenshot)) => {
                    self.state = CaptureState::Capturing;
                    let path = self
                        .config
                        .output_dir
                        .join(timestamp_filename(Local::now()));
                    match sink.capture(&path, self.config.full_page).await {
                        Ok(()) => info!("Captured {}", path.display()),
                        Err(e) => warn!("Capture failed, still polling: {}", e),
                    }
                    self.state = CaptureState::Polling;
                }
                Ok(Some(CaptureEvent::Quit)) => {
                    self.state = CaptureState::Stopped;
                    info!("Quit requested, stopping capture loop");
                    return Ok(());
                }
                Ok(None) => {
                    if !self.config.idle_delay.is_zero() {
                        tokio::time::sleep(self.config.idle_delay).await;
                    }
                }
                Err(e) => {
                    // Transient by contract: log, re-poll, stay alive
                    warn!("Input source error, re-polling: {}", e);
                    if !self.config.idle_delay.is_zero() {
                        tokio::time::sleep(self.config.idle_delay).await;
                    }
                }
            }
        }
    }
}

/// Map a terminal key event to a capture event.
///
/// `s`, Space, and Enter capture; `q`, Esc, and Ctrl-C quit; everything
/// else is ignored. Release/repeat events are filtered by the caller.
pub fn map_key_event(key: &KeyEvent) -> Option<CaptureEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(CaptureEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(CaptureEvent::Quit),
        KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => Some(CaptureEvent::Screenshot),
        _ => None,
    }
}

/// Raw-terminal key source. Raw mode is entered on construction and
/// restored on drop, whatever exit path the loop takes.
pub struct TerminalKeys {
    poll_window: Duration,
}

impl TerminalKeys {
    /// Enter raw mode and create the source
    pub fn new() -> std::result::Result<Self, InputError> {
        terminal::enable_raw_mode().map_err(|e| InputError::RawMode(e.to_string()))?;
        debug!("Terminal raw mode enabled");
        Ok(Self {
            poll_window: Duration::from_millis(100),
        })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

impl EventSource for TerminalKeys {
    fn next_event(&mut self) -> std::result::Result<Option<CaptureEvent>, InputError> {
        // The poll window is the loop's bounded idle wait; read() itself
        // then returns immediately.
        if !event::poll(self.poll_window).map_err(|e| InputError::ReadFailed(e.to_string()))? {
            return Ok(None);
        }
        match event::read().map_err(|e| InputError::ReadFailed(e.to_string()))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key_event(&key)),
            _ => Ok(None),
        }
    }
}
