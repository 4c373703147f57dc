//! Drive Command Module
//!
//! Carries motor commands from the control task and the orchestrator to the
//! motor driver task. A small channel rather than a signal, because recovery
//! sequences issue short command bursts (turn around, then standby) that must
//! all reach the driver in order.

use crate::system::steering::DUTY_MAX;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel for drive commands
pub static DRIVE_CHANNEL: Channel<CriticalSectionRawMutex, Command, 4> = Channel::new();

/// Sends a new drive command
pub async fn send(command: Command) {
    DRIVE_CHANNEL.sender().send(command).await;
}

/// Waits for the next drive command
pub async fn wait() -> Command {
    DRIVE_CHANNEL.receiver().receive().await
}

/// Commands understood by the motor driver task
#[derive(Debug, Clone)]
pub enum Command {
    /// Apply a proportional duty pair on the 0-50 scale
    Duty { right: u8, left: u8 },
    /// Execute the fixed turn-around maneuver
    TurnAround,
    /// Stop both motors immediately
    Brake,
    /// Put the motor driver into standby
    Standby,
}

impl Command {
    /// Clamps a duty pair onto the proportional scale
    pub fn duty(right: u8, left: u8) -> Self {
        Command::Duty {
            right: right.min(DUTY_MAX),
            left: left.min(DUTY_MAX),
        }
    }
}
