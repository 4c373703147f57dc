//! Go button handling
//!
//! Filters the single raw push-button line into clean press events. Any edge
//! arms the debounce filter with the level seen right after the edge; a
//! one-shot timer re-samples the line one debounce period later. While the
//! timer runs the task is not watching the pin, so the filter cannot be
//! re-armed mid-debounce. Only a confirmed press produces an event; a
//! confirmed release or a reversal during the settling window is dropped.

use crate::system::{
    debounce::{DebounceFilter, Verdict},
    event::{self, Events},
    resources::GoButtonResources,
};
use defmt::{debug, info};
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};

/// Settling period for the mechanical switch
const DEBOUNCE_PERIOD: Duration = Duration::from_millis(20);

/// Debounced go-button task
#[embassy_executor::task]
pub async fn go_button(r: GoButtonResources) {
    let mut button = Input::new(r.button_pin, Pull::Down);
    let mut filter = DebounceFilter::new();
    info!("Go button handling started");

    loop {
        button.wait_for_any_edge().await;
        filter.arm(button.is_high());

        // One-shot settling timer; edges during this window are ignored.
        Timer::after(DEBOUNCE_PERIOD).await;

        match filter.expire(button.is_high()) {
            Verdict::Confirmed { pressed: true } => {
                info!("Go button press confirmed");
                event::send(Events::GoButtonPressed).await;
            }
            Verdict::Confirmed { pressed: false } => {
                debug!("Go button release confirmed");
            }
            Verdict::Noise => {
                debug!("Go button edge discarded as noise");
            }
        }
    }
}
