//! Inter-task communication channels
//!
//! The trainer loop is the only owner of the exercise state; other tasks
//! only see the events it publishes here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use repsense_core::state::Event;

/// Channel capacity for trainer events
const EVENT_CHANNEL_SIZE: usize = 16;

/// Workout events (for logging)
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();
