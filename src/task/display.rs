//! Status display driver
//!
//! Refreshes the LED array behind a 74HC595 shift register at the display
//! cadence. The status byte combines an alive-blink bit with the live
//! binarized sensor bits, so a glance at the array shows both that the
//! firmware is running and what the sensors currently see.
//!
//! Recovery alert sequences requested by the orchestrator preempt the normal
//! refresh for their duration: the whole array flashes on and off with the
//! requested period and count.

use crate::system::{alert, line, resources::DisplayResources};
use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config, Spi};
use embassy_time::{block_for, Duration, Ticker, Timer};

/// Display refresh cadence
const DISPLAY_PERIOD: Duration = Duration::from_millis(50);

/// Refresh ticks between alive-bit toggles (500ms blink)
const ALIVE_TICKS: u32 = 10;

/// Bit position of the alive blink in the status byte
const ALIVE_BIT: u8 = 7;

/// Start-up light show: two slow full-array flashes
const STARTUP_FLASHES: u8 = 2;
const STARTUP_FLASH_PERIOD: Duration = Duration::from_millis(500);

/// One byte wide shift-register display
struct ShiftRegister {
    spi: Spi<'static, SPI0, Blocking>,
    latch: Output<'static>,
}

impl ShiftRegister {
    /// Shifts one byte out and pulses the storage latch
    fn load_byte(&mut self, byte: u8) {
        let _ = self.spi.blocking_write(&[byte]);
        self.latch.set_high();
        block_for(Duration::from_micros(1));
        self.latch.set_low();
    }
}

/// Display refresh and alert task
#[embassy_executor::task]
pub async fn display(r: DisplayResources) {
    let mut config = Config::default();
    config.frequency = 1_000_000;
    let spi = Spi::new_blocking_txonly(r.spi, r.clk_pin, r.mosi_pin, config);
    let latch = Output::new(r.latch_pin, Level::Low);
    let mut display = ShiftRegister { spi, latch };

    // Start-up light show before the system settles into idle.
    for _ in 0..STARTUP_FLASHES {
        display.load_byte(0xFF);
        Timer::after(STARTUP_FLASH_PERIOD).await;
        display.load_byte(0x00);
        Timer::after(STARTUP_FLASH_PERIOD).await;
    }
    info!("Display refresh started");

    let mut ticker = Ticker::every(DISPLAY_PERIOD);
    let mut tick: u32 = 0;
    let mut alive = false;

    loop {
        match select(ticker.next(), alert::wait()).await {
            Either::First(()) => {
                tick = tick.wrapping_add(1);
                if tick % ALIVE_TICKS == 0 {
                    alive = !alive;
                }
                let byte = ((alive as u8) << ALIVE_BIT) | line::sensor_bits();
                display.load_byte(byte);
            }
            Either::Second(pattern) => {
                info!(
                    "Playing alert: {=u8} flashes of {=u64}ms",
                    pattern.flashes,
                    pattern.period.as_millis()
                );
                for _ in 0..pattern.flashes {
                    display.load_byte(0xFF);
                    Timer::after(pattern.period).await;
                    display.load_byte(0x00);
                    Timer::after(pattern.period).await;
                }
                // The playback outlasts several refresh deadlines; realign
                // the ticker so it does not burst to catch up.
                ticker.reset();
            }
        }
    }
}
