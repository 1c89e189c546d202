//! Batohi in-process event bus.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the event envelope, e.g. "new rows were imported".

pub mod bus;

pub use bus::{EventBus, PlatformEvent, EVENT_ENTITY_IMPORTED};
