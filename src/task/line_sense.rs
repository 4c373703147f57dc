//! Line sensor sampling
//!
//! Drives the round-robin scan over the three IR sensors at the observation
//! cadence. Each tick starts one ADC conversion on whichever channel the
//! scanner's mux cursor points at and feeds the result back into the state
//! machine; completed patterns are published for the control task and the
//! binarized bits are mirrored for the status display.
//!
//! The task runs unconditionally, also while a recovery sequence or standby
//! is active. Patterns published during those windows are simply never
//! consumed, and the pipeline needs no re-arming after recovery.

use crate::system::{
    line::{self, LineScanner},
    resources::{get_adc, LineSensorResources},
};
use defmt::{debug, info};
use embassy_rp::{adc::Channel, gpio::Pull};
use embassy_time::{Duration, Ticker};

/// Observation cadence: one ADC conversion per tick, a full scan of the
/// array (2 conversions per sensor) every 60ms
const OBSERVE_PERIOD: Duration = Duration::from_millis(10);

/// Round-robin sampling task feeding the line scanner
#[embassy_executor::task]
pub async fn line_sense(r: LineSensorResources) {
    // Channel order must match the sensor records' channel indices.
    let mut channels = [
        Channel::new_pin(r.left_pin, Pull::None),
        Channel::new_pin(r.center_pin, Pull::None),
        Channel::new_pin(r.right_pin, Pull::None),
    ];

    let mut scanner = LineScanner::new();
    let mut ticker = Ticker::every(OBSERVE_PERIOD);
    info!("Line sensing started");

    loop {
        ticker.next().await;

        let raw = {
            let mut adc_guard = get_adc().lock().await;
            let adc = adc_guard.as_mut().unwrap();
            adc.read(&mut channels[scanner.channel()]).await.unwrap_or(0)
        };

        if let Some(pattern) = scanner.on_sample(raw) {
            line::publish(pattern);
            debug!("Line pattern published: {=u8:b}", pattern);
        }
        line::set_sensor_bits(scanner.display_bits());
    }
}
