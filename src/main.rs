//! Robot firmware entry point
//!
//! Initializes system and spawns control tasks across two priority levels.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

#[cfg(not(test))]
use crate::task::{
    display::display,
    drive::drive,
    encoder_read::{encoder_read_left, encoder_read_right},
    go_button::go_button,
    line_sense::line_sense,
    orchestrate::orchestrate,
    steer::steer,
};
#[cfg(not(test))]
use embassy_executor::{InterruptExecutor, Spawner};
#[cfg(not(test))]
use embassy_rp::block::ImageDef;
#[cfg(not(test))]
use embassy_rp::config::Config;
#[cfg(not(test))]
use embassy_rp::interrupt;
#[cfg(not(test))]
use embassy_rp::interrupt::{InterruptExt, Priority};
#[cfg(not(test))]
use system::resources::{
    self, AssignedResources, DisplayResources, GoButtonResources, LeftEncoderResources,
    LineSensorResources, MotorDriverResources, RightEncoderResources,
};
#[cfg(not(test))]
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[cfg(not(test))]
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
#[cfg(not(test))]
mod task;

/// High-priority executor, driven by a software interrupt.
///
/// Runs the display refresh and the go-button debounce so their timing stays
/// tight regardless of what the thread-mode control tasks are doing.
#[cfg(not(test))]
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[cfg(not(test))]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Firmware entry point
#[cfg(not(test))]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Initialize the global ADC instance before spawning any tasks, so the
    // line sampling task finds it ready on its first conversion.
    resources::init_adc(p.ADC);

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // High-priority tasks preempt everything spawned on the thread executor.
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(display(r.display)).unwrap();
    high.spawn(go_button(r.go_button)).unwrap();

    // Low-priority tasks on the thread-mode executor.
    spawner.spawn(orchestrate()).unwrap();
    spawner.spawn(line_sense(r.line_sensors)).unwrap();
    spawner.spawn(encoder_read_left(r.left_encoder)).unwrap();
    spawner.spawn(encoder_read_right(r.right_encoder)).unwrap();
    // Spawn the motor driver before the control task so the first duty
    // command finds a consumer.
    spawner.spawn(drive(r.motor_driver)).unwrap();
    spawner.spawn(steer()).unwrap();
}
