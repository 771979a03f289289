use serde::{Deserialize, Serialize};

use crate::game::{Hand, NoteCutInfo, NoteData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiplierEventType {
    #[default]
    Neutral,
    Positive,
    Negative,
}

/// A resolved note, reported once when the host despawns it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringElement {
    pub note: NoteData,
    pub cut_score: u32,
    pub multiplier: u32,
    pub max_possible_cut_score: u32,
    pub max_multiplier: u32,
    pub multiplier_event_type: MultiplierEventType,
    pub would_be_correct_cut_best_possible_multiplier_event_type: MultiplierEventType,
}

/// How a despawned element affects the per-hand score buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutOutcome {
    pub hand: Hand,
    pub cut_score: u32,
    pub max_cut_score: u32,
    /// Score lost for good (missing entirely from FC estimates)
    pub missed_max_score: u32,
    /// Score lost that a full combo would have recovered
    pub missed_fixed_score: u32,
}

impl ScoringElement {
    /// Realized score, multiplier applied
    pub fn total_cut_score(&self) -> u32 {
        self.cut_score * self.multiplier
    }

    /// Best achievable score, max multiplier applied
    pub fn max_cut_score(&self) -> u32 {
        self.max_possible_cut_score * self.max_multiplier
    }

    /// A cut that broke the multiplier where a correct cut would have
    /// built it, scoring nothing out of a positive maximum.
    pub fn is_bad_cut(&self) -> bool {
        self.multiplier_event_type == MultiplierEventType::Negative
            && self.would_be_correct_cut_best_possible_multiplier_event_type
                == MultiplierEventType::Positive
            && self.total_cut_score() == 0
            && self.max_cut_score() > 0
    }

    pub fn outcome(&self) -> CutOutcome {
        let cut_score = self.total_cut_score();
        let max_cut_score = self.max_cut_score();
        let mut outcome = CutOutcome {
            hand: self.note.hand(),
            cut_score,
            max_cut_score,
            missed_max_score: 0,
            missed_fixed_score: 0,
        };

        if self.is_bad_cut() {
            if self.note.has_fixed_score() {
                outcome.missed_fixed_score = max_cut_score;
            } else {
                outcome.missed_max_score = max_cut_score;
            }
        } else {
            outcome.missed_fixed_score =
                (self.cut_score * self.max_multiplier).saturating_sub(cut_score);
        }
        outcome
    }
}

/// Swing ratings for a single cut, finalized once all raters report
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CutScoreBuffer {
    pub note_cut_info: NoteCutInfo,
    pub before_cut_score: u32,
    pub after_cut_score: u32,
    pub center_distance_cut_score: u32,
    pub max_after_cut_score: u32,
    /// Set by the host when the rating counter finishes
    #[serde(default)]
    pub finished: bool,
}
