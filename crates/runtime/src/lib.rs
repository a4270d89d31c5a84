//! Async runtime hosting a turn-based tactics session.
//!
//! The synchronous [`tactics_core::TurnCoordinator`] lives inside a single
//! worker task. Clients talk to it through a cloneable [`RuntimeHandle`] and
//! follow the session through the topic-based [`EventBus`]. The worker also
//! owns the session clock, so delayed phase transitions fire in real time.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{BusObserver, Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
