//! JSON-lines host call traces and the scripted host that replays them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use metacore_core::game::{
    BeatmapKey, BeatmapLevel, CutScoreBuffer, DisconnectedReason, LevelCompletionResults,
    LevelPack, MissionCompletionResults, MultiplayerResultsData, NoteCutInfo, NoteData,
    SceneTransition, ScoringElement,
};
use metacore_core::host::{MockClock, MockEnergy};
use metacore_core::{Button, Controller, Error, InputSource, InstanceId, MetaCore, Result};
use serde::Deserialize;
use tracing::debug;

/// One intercepted host call, as recorded in a trace
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    ScenesPushed {
        transition: SceneTransition,
    },
    ScenesReplacedAfterLoad {
        transition: SceneTransition,
    },
    ScenesPopped,
    ScenesReplacedAfterUnload,
    SongStarted {
        #[serde(default)]
        offset: f32,
    },
    AudioUpdate {
        song_time: f32,
    },
    PauseMenuShown,
    PauseMenuResumed,
    MultiplayerMenuShown,
    MultiplayerMenuHidden,
    StandardLevelFinished {
        results: LevelCompletionResults,
    },
    MissionLevelFinished {
        results: MissionCompletionResults,
    },
    MultiplayerLevelFinished {
        #[serde(default)]
        results: MultiplayerResultsData,
    },
    MultiplayerLevelDisconnected {
        #[serde(default)]
        reason: DisconnectedReason,
    },
    SoftRestart,
    ScoringElementDespawned {
        element: ScoringElement,
    },
    NoteWasCut {
        info: NoteCutInfo,
    },
    NoteWasMissed {
        note: NoteData,
    },
    SwingRatingFinished {
        buffer: CutScoreBuffer,
    },
    HeadEnteredObstacle,
    EnergyChanged {
        delta: f32,
    },
    LevelDetailContentSet {
        view: InstanceId,
        key: BeatmapKey,
        #[serde(default)]
        level: Option<BeatmapLevel>,
    },
    CollectionSelected {
        view: InstanceId,
        #[serde(default)]
        pack: Option<LevelPack>,
    },
    ViewEnabled {
        view: InstanceId,
    },
    ViewDisabled {
        view: InstanceId,
    },
    /// Buttons held down this frame
    Input {
        #[serde(default)]
        pressed: Vec<Button>,
    },
    ObjectDestroyed {
        id: InstanceId,
    },
    Tick {
        dt: f32,
    },
}

/// Parse a trace; blank lines and `#` comments are skipped
pub fn parse_trace(content: &str) -> Result<Vec<HostCall>> {
    let mut calls = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let call = serde_json::from_str(line).map_err(|e| Error::InvalidTrace {
            line: index + 1,
            message: e.to_string(),
        })?;
        calls.push(call);
    }
    Ok(calls)
}

pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<HostCall>> {
    let content = fs::read_to_string(path)?;
    parse_trace(&content)
}

struct PressedButtons(BTreeSet<Button>);

impl InputSource for PressedButtons {
    fn is_pressed(&self, _controller: Controller, button: Button) -> bool {
        self.0.contains(&button)
    }
}

/// Stand-in for the game objects a trace does not carry.
///
/// Energy starts at the gameplay default and follows `energy_changed`
/// deltas; the song clock follows `audio_update`.
pub struct ScriptedHost {
    energy: MockEnergy,
    clock: MockClock,
    pressed: PressedButtons,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            energy: MockEnergy::new(0.5),
            clock: MockClock::default(),
            pressed: PressedButtons(BTreeSet::new()),
        }
    }
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn energy(&self) -> f32 {
        self.energy.energy
    }

    /// Feed one call through the matching interception point
    pub fn apply(&mut self, core: &mut MetaCore, call: &HostCall) {
        debug!("replaying {:?}", call);
        match call {
            HostCall::ScenesPushed { transition } => {
                self.reset_energy(transition);
                core.scenes_pushed(transition, || {});
            }
            HostCall::ScenesReplacedAfterLoad { transition } => {
                self.reset_energy(transition);
                core.scenes_replaced_after_load(transition, || {});
            }
            HostCall::ScenesPopped => core.scenes_popped(|| {}),
            HostCall::ScenesReplacedAfterUnload => core.scenes_replaced_after_unload(|| {}),
            HostCall::SongStarted { offset } => core.song_started(*offset, |_| {}),
            HostCall::AudioUpdate { song_time } => {
                let song_time = *song_time;
                core.audio_update(&mut self.clock, |clock| clock.0 = song_time);
            }
            HostCall::PauseMenuShown => core.pause_menu_shown(|| {}),
            HostCall::PauseMenuResumed => core.pause_menu_resumed(|| {}),
            HostCall::MultiplayerMenuShown => core.multiplayer_menu_shown(|| {}),
            HostCall::MultiplayerMenuHidden => core.multiplayer_menu_hidden(|| {}),
            HostCall::StandardLevelFinished { results } => {
                core.standard_level_finished(results, |_| {})
            }
            HostCall::MissionLevelFinished { results } => {
                core.mission_level_finished(results, |_| {})
            }
            HostCall::MultiplayerLevelFinished { results } => {
                core.multiplayer_level_finished(results, |_| {})
            }
            HostCall::MultiplayerLevelDisconnected { reason } => {
                core.multiplayer_level_disconnected(reason, |_| {})
            }
            HostCall::SoftRestart => core.soft_restart(|| {}),
            HostCall::ScoringElementDespawned { element } => {
                core.despawn_scoring_element(element, |_| {})
            }
            HostCall::NoteWasCut { info } => core.note_was_cut(info, |_| {}),
            HostCall::NoteWasMissed { note } => core.note_was_missed(note, |_| {}),
            HostCall::SwingRatingFinished { buffer } => {
                let mut buffer = *buffer;
                core.swing_rating_finished(&mut buffer, |b| b.finished = true);
            }
            HostCall::HeadEnteredObstacle => core.head_entered_obstacle(|| {}),
            HostCall::EnergyChanged { delta } => {
                core.process_energy_change(&mut self.energy, *delta, |energy, delta| {
                    energy.change(delta)
                });
            }
            HostCall::LevelDetailContentSet { view, key, level } => {
                core.level_detail_content_set(*view, key, level.as_ref(), || {})
            }
            HostCall::CollectionSelected { view, pack } => {
                core.collection_selected(*view, pack.as_ref(), |_| {})
            }
            HostCall::ViewEnabled { view } => core.view_enabled(*view),
            HostCall::ViewDisabled { view } => core.view_disabled(*view),
            HostCall::Input { pressed } => {
                self.pressed = PressedButtons(pressed.iter().copied().collect());
                core.input_update(&self.pressed, || {});
            }
            HostCall::ObjectDestroyed { id } => core.object_destroyed(*id, |_| {}),
            HostCall::Tick { dt } => core.tick(*dt),
        }
    }

    fn reset_energy(&mut self, transition: &SceneTransition) {
        if let Some(setup) = transition.gameplay_setup() {
            self.energy = MockEnergy::new(setup.starting_health);
        }
    }
}
