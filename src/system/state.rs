//! System State Management
//!
//! Holds the control-plane state shared between the control task and the
//! orchestrator: the go latch with its previous value (actions run on
//! transitions, not levels), the fault counters and the standby flag.
//!
//! The state is protected by a mutex so concurrent access from tasks on both
//! executors stays safe. Each field still has a single designated writer:
//! the orchestrator owns the latch and the standby flag, the control task is
//! the only one incrementing fault counters, and the orchestrator only
//! clears them as part of a recovery it alone runs.
//!
//! Latch writes and edge consumption are separate steps: button presses and
//! recoveries move `running`, and `go_edge` compares it against the
//! previously consumed value so start/pause actions fire once per
//! transition. Two latch flips before the edge is consumed cancel out and
//! trigger nothing.

use crate::system::fault::FaultCounters;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};

/// Global system state protected by a mutex
///
/// Initialized paused: the original hardware sleeps right after init and
/// waits for the first button press before moving.
pub static SYSTEM_STATE: Mutex<CriticalSectionRawMutex, SystemState> = Mutex::new(SystemState {
    running: false,
    previous_running: false,
    faults: FaultCounters::new(),
    standby: false,
});

/// Control-plane state for the delivery run
pub struct SystemState {
    /// Go latch: true while a delivery run is active
    pub running: bool,
    /// Previous latch value, used to detect edges
    pub previous_running: bool,
    /// Consecutive-fault counters evaluated every control period
    pub faults: FaultCounters,
    /// Low-power standby after a stop-marker recovery
    pub standby: bool,
}

impl SystemState {
    /// Inverts the go latch. The resulting action, if any, is derived
    /// separately through [`Self::go_edge`].
    pub fn toggle_go(&mut self) {
        self.running = !self.running;
    }

    /// Forces the latch back to paused, as recovery actions do. The previous
    /// value is left alone so the pending transition can still be consumed.
    pub fn clear_go(&mut self) {
        self.running = false;
    }

    /// Detects and consumes a pending latch transition.
    ///
    /// Returns `Some(new_value)` once per transition and `None` while the
    /// latch holds its level, so level-triggered actions never replay.
    pub fn go_edge(&mut self) -> Option<bool> {
        if self.running != self.previous_running {
            self.previous_running = self.running;
            Some(self.running)
        } else {
            None
        }
    }

    /// True while the control task may steer: a delivery run is latched and
    /// the system is not in post-stop standby.
    pub fn is_active(&self) -> bool {
        self.running && !self.standby
    }
}
