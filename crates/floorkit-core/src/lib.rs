//! # Floorkit Core
//!
//! Core types shared by every Floorkit crate:
//! - the error taxonomy (model, document, export)
//! - the unit system, snap grid steps and length formatting
//! - the editor event bus used to notify UI bindings of state changes

pub mod error;
pub mod event_bus;
pub mod units;

pub use error::{DocumentError, Error, ExportError, ModelError, Result};

pub use event_bus::{EditorEvent, EventBus, EventCategory, EventFilter, SubscriptionId};

pub use units::{format_length, parse_length, Units};
