//! Hardware Resource Management
//!
//! Manages and allocates hardware resources (pins, peripherals) to different
//! system components. Each task owns its pin group exclusively; the only
//! shared peripheral is the ADC, which the three line sensors take turns on
//! and which is therefore kept behind a mutex.

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::adc::{Adc, Async as AdcAsync};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, ADC};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Global ADC (Analog-to-Digital Converter) instance protected by a mutex.
///
/// The line sampling task multiplexes the converter over the three IR
/// sensors; the mutex keeps any later analog consumer from colliding with a
/// conversion in flight.
static ADC: Mutex<CriticalSectionRawMutex, Option<Adc<'static, AdcAsync>>> = Mutex::new(None);

/// Initializes the ADC peripheral.
///
/// This should only be called once during system initialization in main.rs,
/// before any tasks are spawned.
pub fn init_adc(adc: ADC) {
    let adc = Adc::new(adc, Irqs, embassy_rp::adc::Config::default());
    critical_section::with(|_| {
        *ADC.try_lock().unwrap() = Some(adc);
    });
}

/// Returns a reference to the protected ADC instance.
pub fn get_adc() -> &'static Mutex<CriticalSectionRawMutex, Option<Adc<'static, AdcAsync>>> {
    &ADC
}

assign_resources! {
    /// Downward-facing IR line sensors, one ADC-capable pin each.
    /// Left/center/right as seen in the driving direction.
    line_sensors: LineSensorResources {
        left_pin: PIN_26,
        center_pin: PIN_27,
        right_pin: PIN_28,
    },
    /// Left wheel quadrature encoder
    left_encoder: LeftEncoderResources {
        a_pin: PIN_6,
        b_pin: PIN_7,
    },
    /// Right wheel quadrature encoder
    right_encoder: RightEncoderResources {
        a_pin: PIN_8,
        b_pin: PIN_9,
    },
    /// Go push-button
    go_button: GoButtonResources {
        button_pin: PIN_16,
    },
    /// 74HC595 shift register driving the status LED array
    display: DisplayResources {
        spi: SPI0,
        clk_pin: PIN_2,
        mosi_pin: PIN_3,
        latch_pin: PIN_5,
    },
    /// TB6612FNG dual motor driver pins and PWM channels
    motor_driver: MotorDriverResources {
        standby_pin: PIN_22,
        // Motor drive PWM
        left_slice: PWM_SLICE7,
        left_pwm_pin: PIN_14,
        left_forward_pin: PIN_21,
        left_backward_pin: PIN_20,
        // Motor drive PWM
        right_slice: PWM_SLICE6,
        right_pwm_pin: PIN_12,
        right_forward_pin: PIN_19,
        right_backward_pin: PIN_18,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});
