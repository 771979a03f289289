use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::game::{BeatmapData, BeatmapKey, Hand};

/// Gameplay parameters carried by a gameplay scene transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySetup {
    pub beatmap: BeatmapKey,
    /// Counting notes per hand; when absent they are taken from `beatmap_data`
    pub left_notes: Option<u32>,
    pub right_notes: Option<u32>,
    pub beatmap_data: Option<BeatmapData>,
    pub song_length: f32,
    pub starting_health: f32,
    pub no_fail: bool,
    pub positive_modifiers: f32,
    pub negative_modifiers: f32,
}

impl Default for GameplaySetup {
    fn default() -> Self {
        Self {
            beatmap: BeatmapKey::default(),
            left_notes: None,
            right_notes: None,
            beatmap_data: None,
            song_length: 0.0,
            starting_health: 0.5,
            no_fail: false,
            positive_modifiers: 0.0,
            negative_modifiers: 0.0,
        }
    }
}

impl GameplaySetup {
    pub fn notes_for(&self, hand: Hand) -> u32 {
        let explicit = match hand {
            Hand::Left => self.left_notes,
            Hand::Right => self.right_notes,
        };
        explicit
            .or_else(|| self.beatmap_data.as_ref().map(|d| d.counted_notes(hand)))
            .unwrap_or(0)
    }
}

/// Scene transition descriptor, classified when the transition is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneTransition {
    Gameplay(GameplaySetup),
    Menu,
    Other,
}

impl SceneTransition {
    pub fn gameplay_setup(&self) -> Option<&GameplaySetup> {
        match self {
            SceneTransition::Gameplay(setup) => Some(setup),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum LevelEndAction {
    #[default]
    None,
    Quit,
    Restart,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum LevelEndStateType {
    #[default]
    Incomplete,
    Cleared,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelCompletionResults {
    pub level_end_action: LevelEndAction,
    #[serde(default)]
    pub level_end_state: LevelEndStateType,
    #[serde(default)]
    pub modified_score: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissionCompletionResults {
    pub level_completion_results: LevelCompletionResults,
    #[serde(default)]
    pub mission_cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiplayerResultsData {
    #[serde(default)]
    pub game_id: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum DisconnectedReason {
    #[default]
    Unknown,
    UserInitiated,
    Timeout,
    Kicked,
    ServerShutDown,
}

/// Normalizes each level-finish payload into a single end action
pub trait FinishResult {
    fn end_action(&self) -> LevelEndAction;
}

impl FinishResult for LevelCompletionResults {
    fn end_action(&self) -> LevelEndAction {
        self.level_end_action
    }
}

impl FinishResult for MissionCompletionResults {
    fn end_action(&self) -> LevelEndAction {
        self.level_completion_results.level_end_action
    }
}

impl FinishResult for MultiplayerResultsData {
    fn end_action(&self) -> LevelEndAction {
        LevelEndAction::None
    }
}

impl FinishResult for DisconnectedReason {
    fn end_action(&self) -> LevelEndAction {
        LevelEndAction::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ColorType, GameplayType, NoteData};

    #[test]
    fn test_classification() {
        assert!(SceneTransition::Gameplay(GameplaySetup::default())
            .gameplay_setup()
            .is_some());
        assert!(SceneTransition::Menu.gameplay_setup().is_none());
        assert!(SceneTransition::Other.gameplay_setup().is_none());
    }

    #[test]
    fn test_end_action_normalization() {
        let standard = LevelCompletionResults {
            level_end_action: LevelEndAction::Restart,
            ..Default::default()
        };
        assert_eq!(standard.end_action(), LevelEndAction::Restart);

        let mission = MissionCompletionResults {
            level_completion_results: LevelCompletionResults {
                level_end_action: LevelEndAction::Quit,
                ..Default::default()
            },
            mission_cleared: false,
        };
        assert_eq!(mission.end_action(), LevelEndAction::Quit);

        assert_eq!(
            MultiplayerResultsData::default().end_action(),
            LevelEndAction::None
        );
        assert_eq!(DisconnectedReason::Timeout.end_action(), LevelEndAction::Quit);
    }

    #[test]
    fn test_note_counts_prefer_explicit() {
        let setup = GameplaySetup {
            left_notes: Some(10),
            beatmap_data: Some(BeatmapData {
                notes: vec![
                    NoteData::new(GameplayType::Normal, ColorType::ColorA),
                    NoteData::new(GameplayType::Normal, ColorType::ColorB),
                ],
                obstacle_count: 0,
            }),
            ..Default::default()
        };
        assert_eq!(setup.notes_for(Hand::Left), 10);
        assert_eq!(setup.notes_for(Hand::Right), 1);
    }

    #[test]
    fn test_transition_json_tagging() {
        let json = r#"{ "kind": "gameplay", "no_fail": true, "left_notes": 3 }"#;
        let transition: SceneTransition = serde_json::from_str(json).unwrap();
        let setup = transition.gameplay_setup().unwrap();
        assert!(setup.no_fail);
        assert_eq!(setup.left_notes, Some(3));
        assert!((setup.starting_health - 0.5).abs() < f32::EPSILON);
    }
}
