//! State tracking and event broadcasting for a rhythm game's interception
//! points.
//!
//! The host calls into [`MetaCore`] from its hooks, passing the original
//! implementation along. The core keeps session, selection and lifecycle
//! state current and broadcasts [`EventKind`]s to subscribed listeners.

pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod hooks;
pub mod host;
pub mod input;
pub mod songs;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{Emitter, Event, EventBus, EventData, EventKind};
pub use game::{
    BeatmapData, BeatmapKey, BeatmapLevel, ColorType, CutScoreBuffer, Difficulty, GameplaySetup,
    GameplayType, Hand, LevelCompletionResults, LevelEndAction, LevelPack, NoteCutInfo, NoteData,
    Policy, SceneTransition, ScoringElement, ScoringType,
};
pub use hooks::{HookPoint, MetaCore};
pub use host::{BeatmapSource, EnergyCounter, InstanceId, MainThread, SongClock};
pub use input::{Button, Controller, InputSource};
pub use state::{Phase, Scope, SelectionState, SessionState, SessionSummary, Shared};
