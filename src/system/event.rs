//! System Events
//!
//! Defines events and channels for inter-task communication.

use crate::system::fault::FaultKind;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Multi-producer, single-consumer event channel with capacity of 10
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, 10> = Channel::new();

/// Sends an event to the system channel
pub async fn send(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Receives the next event from the system channel
pub async fn wait() -> Events {
    EVENT_CHANNEL.receiver().receive().await
}

/// System-wide events
#[derive(Debug, Clone)]
pub enum Events {
    /// The go button saw a debounced, confirmed press
    GoButtonPressed,
    /// A fault counter crossed the recovery threshold
    FaultThresholdCrossed(FaultKind),
}
