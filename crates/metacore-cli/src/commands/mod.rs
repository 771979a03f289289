//! Command implementations.

pub mod events;
pub mod hooks;
pub mod replay;
