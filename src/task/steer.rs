//! Steering control
//!
//! Once per control period, classifies the latest published line pattern and
//! either applies the resulting duty pair or books a fault period. The whole
//! body is skipped while the go latch is paused or the system stands by, so
//! a stopped robot neither drives nor accumulates lost-line periods while
//! standing next to the line.

use crate::system::{
    drive_command::{self, Command},
    event::{self, Events},
    line,
    state::SYSTEM_STATE,
    steering::{self, Steering},
};
use defmt::{debug, info};
use embassy_time::{Duration, Ticker};

/// Control cadence for steering and fault evaluation
const CONTROL_PERIOD: Duration = Duration::from_millis(100);

/// Periodic steering and fault-accounting task
#[embassy_executor::task]
pub async fn steer() {
    let mut ticker = Ticker::every(CONTROL_PERIOD);
    info!("Steering control started");

    loop {
        ticker.next().await;

        let active = { SYSTEM_STATE.lock().await.is_active() };
        if !active {
            continue;
        }

        let pattern = line::latest();
        let steering = steering::classify(pattern);
        debug!("Control period: pattern {=u8:b} -> {}", pattern, steering);

        // Book the period against the fault counters; a crossing is reported
        // exactly once per fault run.
        let crossing = {
            let mut state = SYSTEM_STATE.lock().await;
            state.faults.record(&steering)
        };

        if let Steering::Normal { right, left } = steering {
            // Duty values are only ever applied on a normal classification.
            drive_command::send(Command::duty(right, left)).await;
        }

        if let Some(kind) = crossing {
            info!("Fault threshold crossed: {}", kind);
            event::send(Events::FaultThresholdCrossed(kind)).await;
        }
    }
}
