//! Host gameplay types.
//!
//! This module contains the plain-data view of the host objects that reach
//! the interception points:
//! - `NoteData`, `NoteCutInfo` - notes and cuts
//! - `ScoringElement`, `CutScoreBuffer` - score and swing reports
//! - `BeatmapKey`, `BeatmapLevel`, `LevelPack` - level selection
//! - `SceneTransition`, `GameplaySetup` - scene descriptors
//! - `Policy` - requester-keyed host behaviour switches

mod beatmap;
mod note;
mod policy;
mod scene;
mod scoring;

pub use beatmap::*;
pub use note::*;
pub use policy::*;
pub use scene::*;
pub use scoring::*;
