//! Gameplay and menu state.
//!
//! - `SessionState` - per-play counters, replaced at every gameplay scene
//! - `SelectionState` - menu selection, independent of gameplay
//! - `LifecycleTracker` - scene/session phase machine
//! - `SlowTasks` - song-clock driven periodic work
//! - `SessionSummary` - snapshot taken when a level finishes
//! - `Shared` - read handle listeners keep onto live state

mod lifecycle;
mod periodic;
mod selection;
mod session;
mod shared;
mod stats;
mod summary;

pub use lifecycle::*;
pub use periodic::*;
pub use selection::*;
pub use session::*;
pub use shared::*;
pub use stats::*;
pub use summary::*;
