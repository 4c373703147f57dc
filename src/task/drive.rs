//! Motor driver task
//!
//! Owns the TB6612FNG dual motor driver and executes the commands produced
//! by the steering control and the orchestrator. Duty values arrive on the
//! proportional 0-50 scale and are mapped onto the driver's percent range
//! here; the turn-around maneuver is a fixed-length spin in place.

use crate::system::drive_command::{self, Command};
use crate::system::steering::DUTY_MAX;
use defmt::info;
use embassy_rp::gpio;
use embassy_rp::pwm;
use embassy_time::{Duration, Timer};
use tb6612fng::{DriveCommand, Motor, Tb6612fng};

use crate::system::resources::MotorDriverResources;

/// Length of the in-place turn-around spin
const TURN_AROUND_DURATION: Duration = Duration::from_millis(1200);

/// Spin speed for the turn-around maneuver (percent)
const TURN_AROUND_SPEED: u8 = 60;

/// Settling time after waking the driver from standby
const STANDBY_WAKE_DELAY: Duration = Duration::from_millis(100);

/// Maps a 0-50 proportional duty onto the driver's 0-100 percent scale
fn duty_to_percent(duty: u8) -> u8 {
    duty.min(DUTY_MAX) * 2
}

#[embassy_executor::task]
pub async fn drive(r: MotorDriverResources) {
    // Configure PWM for motor control
    // We use 10kHz frequency as cheaper DC motors often work better at lower frequencies
    let desired_freq_hz = 10_000;
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq(); // 150MHz
    let divider = ((clock_freq_hz / desired_freq_hz) / 65535 + 1) as u8;
    let period = (clock_freq_hz / (desired_freq_hz * divider as u32)) as u16 - 1;

    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = divider.into();
    pwm_config.top = period;

    // Initialize TB6612FNG motor driver pins
    let stby = gpio::Output::new(r.standby_pin, gpio::Level::Low);

    // motor A, here defined to be the left motor
    let left_fwd = gpio::Output::new(r.left_forward_pin, gpio::Level::Low);
    let left_bckw = gpio::Output::new(r.left_backward_pin, gpio::Level::Low);
    let left_pwm = pwm::Pwm::new_output_a(r.left_slice, r.left_pwm_pin, pwm_config.clone());
    let left_motor = Motor::new(left_fwd, left_bckw, left_pwm).unwrap();

    // motor B, here defined to be the right motor
    let right_fwd = gpio::Output::new(r.right_forward_pin, gpio::Level::Low);
    let right_bckw = gpio::Output::new(r.right_backward_pin, gpio::Level::Low);
    let right_pwm = pwm::Pwm::new_output_a(r.right_slice, r.right_pwm_pin, pwm_config.clone());
    let right_motor = Motor::new(right_fwd, right_bckw, right_pwm).unwrap();

    // Create motor driver controller instance, starting in standby
    let mut control = Tb6612fng::new(left_motor, right_motor, stby).unwrap();

    loop {
        let command = drive_command::wait().await;

        // Wake up from standby if movement is requested
        let is_standby = control.current_standby().unwrap();
        if is_standby {
            match command {
                Command::Duty { .. } | Command::TurnAround => {
                    control.disable_standby().unwrap();
                    Timer::after(STANDBY_WAKE_DELAY).await;
                }
                _ => {}
            }
        }

        match command {
            Command::Duty { right, left } => {
                control
                    .motor_a
                    .drive(DriveCommand::Forward(duty_to_percent(left)))
                    .unwrap();
                control
                    .motor_b
                    .drive(DriveCommand::Forward(duty_to_percent(right)))
                    .unwrap();
            }
            Command::TurnAround => {
                info!("turn around");
                control
                    .motor_a
                    .drive(DriveCommand::Forward(TURN_AROUND_SPEED))
                    .unwrap();
                control
                    .motor_b
                    .drive(DriveCommand::Backward(TURN_AROUND_SPEED))
                    .unwrap();
                Timer::after(TURN_AROUND_DURATION).await;
                control.motor_a.drive(DriveCommand::Brake).unwrap();
                control.motor_b.drive(DriveCommand::Brake).unwrap();
                Timer::after(STANDBY_WAKE_DELAY).await;
                control.motor_a.drive(DriveCommand::Stop).unwrap();
                control.motor_b.drive(DriveCommand::Stop).unwrap();
            }
            Command::Brake => {
                info!("brake");
                control.motor_a.drive(DriveCommand::Brake).unwrap();
                control.motor_b.drive(DriveCommand::Brake).unwrap();
            }
            Command::Standby => {
                if !is_standby {
                    info!("motor driver entering standby");
                    control.motor_a.drive(DriveCommand::Brake).unwrap();
                    control.motor_b.drive(DriveCommand::Brake).unwrap();
                    Timer::after(STANDBY_WAKE_DELAY).await;
                    control.motor_a.drive(DriveCommand::Stop).unwrap();
                    control.motor_b.drive(DriveCommand::Stop).unwrap();
                    Timer::after(STANDBY_WAKE_DELAY).await;
                    control.enable_standby().unwrap();
                }
            }
        }
    }
}
