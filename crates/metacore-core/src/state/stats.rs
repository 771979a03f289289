//! Statistics derived from the session state.

use serde::{Deserialize, Serialize};

use crate::game::Hand;
use crate::state::{HandStats, SessionState};

/// Which sabers a derived statistic covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    Left,
    Right,
    #[default]
    Both,
}

impl From<Hand> for Scope {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => Scope::Left,
            Hand::Right => Scope::Right,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl SessionState {
    fn sum<T, F>(&self, scope: Scope, field: F) -> T
    where
        T: std::ops::Add<Output = T>,
        F: Fn(&HandStats) -> T,
    {
        match scope {
            Scope::Left => field(&self.left),
            Scope::Right => field(&self.right),
            Scope::Both => field(&self.left) + field(&self.right),
        }
    }

    pub fn score(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.score)
    }

    pub fn max_score(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.max_score)
    }

    pub fn notes_cut(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.notes_cut)
    }

    pub fn notes_missed(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.notes_missed)
    }

    pub fn notes_bad_cut(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.notes_bad_cut)
    }

    pub fn bombs_hit(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.bombs_hit)
    }

    pub fn remaining_notes(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.remaining_notes)
    }

    pub fn total_notes(&self, scope: Scope) -> u32 {
        self.sum(scope, |h| h.total_notes)
    }

    /// Combo for one hand, or the global combo for `Both`
    pub fn combo_for(&self, scope: Scope) -> u32 {
        match scope {
            Scope::Left => self.left.combo,
            Scope::Right => self.right.combo,
            Scope::Both => self.combo,
        }
    }

    pub fn highest_combo_for(&self, scope: Scope) -> u32 {
        match scope {
            Scope::Left => self.left.highest_combo,
            Scope::Right => self.right.highest_combo,
            Scope::Both => self.highest_combo,
        }
    }

    /// Score multiplier from gameplay modifiers, never below zero
    pub fn modifier_multiplier(&self) -> f32 {
        (1.0 + self.positive_mods + self.negative_mods).max(0.0)
    }

    /// Modified score as a percentage of the max score so far.
    ///
    /// Reads 100 before anything has been scored.
    pub fn score_percent(&self, scope: Scope) -> f64 {
        let max = self.max_score(scope);
        if max == 0 {
            return 100.0;
        }
        let score = f64::from(self.score(scope)) * f64::from(self.modifier_multiplier());
        100.0 * score / f64::from(max)
    }

    /// Percentage the play would reach with a full combo.
    ///
    /// Multiplier losses are recovered; bad cuts are left out entirely,
    /// except on fixed-score notes whose value is known.
    pub fn full_combo_percent(&self, scope: Scope) -> f64 {
        let score = self.score(scope) + self.sum(scope, |h| h.missed_fixed_score);
        let max = self
            .max_score(scope)
            .saturating_sub(self.sum(scope, |h| h.missed_max_score));
        if max == 0 {
            return 100.0;
        }
        let score = f64::from(score) * f64::from(self.modifier_multiplier());
        100.0 * score / f64::from(max)
    }

    pub fn average_pre_swing(&self, scope: Scope) -> f64 {
        ratio(
            self.sum(scope, |h| h.pre_swing),
            f64::from(self.notes_cut(scope)),
        )
    }

    pub fn average_post_swing(&self, scope: Scope) -> f64 {
        ratio(
            self.sum(scope, |h| h.post_swing),
            f64::from(self.sum(scope, |h| h.post_swing_notes)),
        )
    }

    pub fn average_accuracy(&self, scope: Scope) -> f64 {
        ratio(
            self.sum(scope, |h| h.accuracy),
            f64::from(self.notes_cut(scope)),
        )
    }

    pub fn average_time_dependence(&self, scope: Scope) -> f64 {
        ratio(
            self.sum(scope, |h| h.time_dependence),
            f64::from(self.notes_cut(scope)),
        )
    }

    /// Average total swing score (pre + post + accuracy)
    pub fn average_cut_score(&self, scope: Scope) -> f64 {
        self.average_pre_swing(scope) + self.average_post_swing(scope) + self.average_accuracy(scope)
    }

    /// Fraction of the song played, `0.0..=1.0`
    pub fn song_progress(&self) -> f32 {
        if self.song_length <= 0.0 {
            return 0.0;
        }
        (self.song_time / self.song_length).clamp(0.0, 1.0)
    }
}
