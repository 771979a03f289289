//! Song data access.
//!
//! - `BeatmapRequests` - de-duplicated beatmap data loads
//! - `get_song_cover` - asynchronous cover lookup

mod requests;

pub use requests::*;

use tracing::warn;

use crate::game::{BeatmapLevel, Sprite};
use crate::host::{BeatmapSource, MainThread};

/// Load `level`'s cover and hand it to `callback` on the main thread.
///
/// The callback runs exactly once, with `None` if the cover is unavailable.
pub fn get_song_cover<F>(
    source: &dyn BeatmapSource,
    main: &MainThread,
    level: &BeatmapLevel,
    callback: F,
) where
    F: FnOnce(Option<Sprite>) + 'static,
{
    let level_id = level.level_id.clone();
    main.await_pending(source.load_cover(level), move |cover| {
        if cover.is_none() {
            warn!("failed to load cover for {}", level_id);
        }
        callback(cover);
    });
}
