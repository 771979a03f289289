use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{BeatmapKey, LevelEndAction};
use crate::state::{Scope, SessionState};

/// Result of a single play, captured when the level finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub timestamp: DateTime<Utc>,
    pub beatmap: Option<BeatmapKey>,
    pub end_action: LevelEndAction,
    pub score: u32,
    pub max_score: u32,
    pub score_percent: f64,
    pub full_combo_percent: f64,
    pub highest_combo: u32,
    pub notes_missed: u32,
    pub notes_bad_cut: u32,
    pub bombs_hit: u32,
    pub walls_hit: u32,
    /// True if the player survived on no-fail after running out of energy
    pub no_fail_penalized: bool,
}

impl SessionSummary {
    pub fn capture(state: &SessionState, end_action: LevelEndAction) -> Self {
        Self {
            timestamp: Utc::now(),
            beatmap: state.beatmap().cloned(),
            end_action,
            score: state.score(Scope::Both),
            max_score: state.max_score(Scope::Both),
            score_percent: state.score_percent(Scope::Both),
            full_combo_percent: state.full_combo_percent(Scope::Both),
            highest_combo: state.highest_combo(),
            notes_missed: state.notes_missed(Scope::Both),
            notes_bad_cut: state.notes_bad_cut(Scope::Both),
            bombs_hit: state.bombs_hit(Scope::Both),
            walls_hit: state.walls_hit(),
            no_fail_penalized: state.no_fail_penalized(),
        }
    }

    /// No misses, bad cuts, bombs or walls
    pub fn is_full_combo(&self) -> bool {
        self.notes_missed == 0 && self.notes_bad_cut == 0 && self.bombs_hit == 0 && self.walls_hit == 0
    }

    pub fn was_restarted(&self) -> bool {
        self.end_action == LevelEndAction::Restart
    }
}
