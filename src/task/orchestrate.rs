//! Orchestrator Module
//!
//! Central coordinator and the only writer of the go latch. Consumes system
//! events: confirmed button presses toggle the latch and start or pause the
//! delivery run on the resulting edge; fault threshold crossings trigger the
//! matching recovery sequence.
//!
//! Both recovery paths end in an idle-equivalent reset: latch cleared,
//! counters cleared, wheels stopped. Resuming always takes an explicit go
//! press. After a stop-marker recovery the motor driver additionally enters
//! standby and the system sits fully idle until the next button event, the
//! async analogue of the original's power-down sleep with event-driven wake.

use crate::system::{
    alert,
    drive_command::{self, Command},
    event::{self, Events},
    fault::FaultKind,
    state::SYSTEM_STATE,
};
use defmt::{info, warn};
use embassy_time::Timer;

/// Main orchestrator task
#[embassy_executor::task]
pub async fn orchestrate() {
    info!("Orchestrator started");
    loop {
        match event::wait().await {
            Events::GoButtonPressed => handle_go_press().await,
            Events::FaultThresholdCrossed(kind) => recover(kind).await,
        }
    }
}

/// Toggles the go latch and acts on the resulting edge, if any
async fn handle_go_press() {
    let edge = {
        let mut state = SYSTEM_STATE.lock().await;
        state.standby = false;
        state.toggle_go();
        state.go_edge()
    };

    match edge {
        Some(true) => start_delivery().await,
        Some(false) => pause_delivery().await,
        None => {}
    }
}

/// Starts a delivery run. The wheels start turning with the next control
/// period, which also wakes the motor driver if it was in standby.
async fn start_delivery() {
    info!("Delivery started");
}

/// Pauses the delivery run and brings the wheels to rest
async fn pause_delivery() {
    info!("Delivery paused");
    drive_command::send(Command::Brake).await;
}

/// Runs one recovery sequence for the given fault
async fn recover(kind: FaultKind) {
    warn!("Fault recovery: {}", kind);

    // Clear the latch first so the control task stops issuing duty while the
    // sequence runs, then stop the wheels.
    {
        let mut state = SYSTEM_STATE.lock().await;
        state.clear_go();
        // Consume the forced pause transition here, so the next go press
        // reads as a fresh start edge.
        state.go_edge();
    }
    pause_delivery().await;

    // Visual alert, played by the display task.
    let pattern = match kind {
        FaultKind::LostLine => alert::LOST_LINE,
        FaultKind::StopMarker => alert::STOP_MARKER,
    };
    alert::send(pattern);
    Timer::after(pattern.total()).await;

    if kind == FaultKind::StopMarker {
        drive_command::send(Command::TurnAround).await;
    }

    {
        let mut state = SYSTEM_STATE.lock().await;
        state.faults.clear();
        state.standby = kind == FaultKind::StopMarker;
    }

    if kind == FaultKind::StopMarker {
        drive_command::send(Command::Standby).await;
        info!("Standing by until the next go press");
    }
}
