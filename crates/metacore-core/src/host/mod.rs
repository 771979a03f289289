//! Host abstractions.
//!
//! The host game owns the objects the interception points observe. This
//! module describes the slice of them the engine reads:
//! - `EnergyCounter`, `SongClock` - live gameplay objects
//! - `BeatmapSource` - level lookup and asynchronous data loads
//! - `MainThread` - the host's cooperative main-thread scheduler
//! - `ObjectSignals` - per-object enable/disable/destroy bookkeeping

mod main_thread;
pub mod mock;
mod objects;

pub use main_thread::*;
// Re-export mocks for convenient access in tests
pub use mock::{MockBeatmapSource, MockClock, MockEnergy};
pub use objects::*;

use crate::error::Result;
use crate::game::{BeatmapData, BeatmapKey, BeatmapLevel, LevelData, Sprite};

/// Player energy as seen around an energy change
pub trait EnergyCounter {
    /// True once energy has hit zero during this play
    fn did_reach_zero(&self) -> bool;

    fn energy(&self) -> f32;
}

/// Audio-synchronized song position
pub trait SongClock {
    fn song_time(&self) -> f32;
}

/// Level lookup and asynchronous asset loads.
///
/// Loads return immediately; the host completes the returned slot later on
/// the main thread.
pub trait BeatmapSource {
    fn find_level(&self, level_id: &str) -> Option<BeatmapLevel>;

    fn load_level_data(&self, level_id: &str) -> Pending<Result<LevelData>>;

    fn load_beatmap_data(
        &self,
        level_data: &LevelData,
        key: &BeatmapKey,
        beats_per_minute: f32,
    ) -> Pending<Option<BeatmapData>>;

    fn load_cover(&self, level: &BeatmapLevel) -> Pending<Option<Sprite>>;
}
