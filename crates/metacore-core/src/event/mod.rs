//! Event broadcasting.
//!
//! - `EventKind` - built-in and registered event names
//! - `Event` - a broadcast signal with its payload
//! - `EventBus` - synchronous publish/subscribe in registration order

mod bus;
mod kind;

pub use bus::*;
pub use kind::*;
