//! Topic-based event bus for runtime events.
//!
//! Session notifications are published to a topic derived from their kind,
//! and consumers subscribe only to the topics they need.

mod bus;

pub use bus::{BusObserver, Event, EventBus, Topic};
