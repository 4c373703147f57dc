//! Recovery alert signalling
//!
//! The orchestrator requests visual alert sequences here; the display task
//! owns the shift register and plays them. A signal suffices because at most
//! one recovery sequence runs at a time.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

/// Alert played when the line has been lost past the fault threshold
pub const LOST_LINE: AlertPattern = AlertPattern {
    flashes: 10,
    period: Duration::from_millis(100),
};

/// Alert played when the stop marker has been confirmed
pub const STOP_MARKER: AlertPattern = AlertPattern {
    flashes: 2,
    period: Duration::from_millis(1000),
};

/// Signal for pending alert sequences
pub static ALERT: Signal<CriticalSectionRawMutex, AlertPattern> = Signal::new();

/// Requests an alert sequence from the display task
pub fn send(pattern: AlertPattern) {
    ALERT.signal(pattern);
}

/// Waits for the next alert request
pub async fn wait() -> AlertPattern {
    ALERT.wait().await
}

/// A full-array blink sequence
#[derive(Debug, Clone, Copy)]
pub struct AlertPattern {
    /// Number of on/off flashes
    pub flashes: u8,
    /// Duration of each on and each off phase
    pub period: Duration,
}

impl AlertPattern {
    /// Wall-clock duration of the whole sequence
    pub fn total(&self) -> Duration {
        self.period * (2 * self.flashes as u32)
    }
}
