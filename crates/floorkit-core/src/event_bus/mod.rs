//! Editor event bus
//!
//! Each editor instance owns its own [`EventBus`]; UI bindings subscribe to
//! change notifications instead of polling shared global state.

mod bus;
mod events;

pub use bus::{EventBus, EventBusError, EventFilter, SubscriptionId};
pub use events::{EditorEvent, EventCategory};
