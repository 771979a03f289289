use serde::Serialize;
use tracing::{debug, warn};

use crate::game::{
    BeatmapKey, CutOutcome, CutScoreBuffer, GameplaySetup, Hand, LevelEndAction, NoteCutInfo,
    NoteData, ScoringElement,
};

/// Running statistics for one saber
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HandStats {
    pub score: u32,
    pub max_score: u32,
    /// Score lost on bad cuts, unknown what a good cut would have earned
    pub missed_max_score: u32,
    /// Score a full combo would have recovered
    pub missed_fixed_score: u32,
    pub combo: u32,
    pub highest_combo: u32,
    pub notes_cut: u32,
    pub notes_missed: u32,
    pub notes_bad_cut: u32,
    pub bombs_hit: u32,
    /// Successful cuts on notes that do not count (chain links)
    pub uncounted_notes_cut: u32,
    pub total_notes: u32,
    pub remaining_notes: u32,
    pub pre_swing: f64,
    pub post_swing: f64,
    /// Cuts contributing to `post_swing`
    pub post_swing_notes: u32,
    pub accuracy: f64,
    pub time_dependence: f64,
}

impl HandStats {
    fn with_notes(total_notes: u32) -> Self {
        Self {
            total_notes,
            remaining_notes: total_notes,
            ..Default::default()
        }
    }

    fn hit(&mut self) {
        self.combo += 1;
        self.highest_combo = self.highest_combo.max(self.combo);
    }

    fn resolve_note(&mut self, hand: Hand) {
        if self.remaining_notes == 0 {
            warn!("{} hand resolved more notes than the map holds", hand);
            return;
        }
        self.remaining_notes -= 1;
    }
}

/// How a note cut was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutResolution {
    /// Fake note, nothing changed
    Ignored,
    Good,
    BadCut,
    BombHit,
}

/// How a finished swing rating was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingResolution {
    /// Failed cut or fake note
    Skipped,
    Counted,
    Uncounted,
}

/// State of the current gameplay scene.
///
/// Replaced wholesale whenever a gameplay scene starts; handlers mutate it
/// through the `apply_*` methods and consumers read it through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub(crate) beatmap: Option<BeatmapKey>,
    pub(crate) left: HandStats,
    pub(crate) right: HandStats,
    pub(crate) combo: u32,
    pub(crate) highest_combo: u32,
    pub(crate) walls_hit: u32,
    pub(crate) health: f32,
    pub(crate) no_fail: bool,
    pub(crate) positive_mods: f32,
    pub(crate) negative_mods: f32,
    pub(crate) no_fail_penalized: bool,
    pub(crate) song_time: f32,
    pub(crate) song_length: f32,
    pub(crate) state_valid: bool,
    pub(crate) map_was_quit: bool,
    pub(crate) map_was_restarted: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            beatmap: None,
            left: HandStats::default(),
            right: HandStats::default(),
            combo: 0,
            highest_combo: 0,
            walls_hit: 0,
            health: 1.0,
            no_fail: false,
            positive_mods: 0.0,
            negative_mods: 0.0,
            no_fail_penalized: false,
            song_time: 0.0,
            song_length: 0.0,
            state_valid: false,
            map_was_quit: false,
            map_was_restarted: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state for a gameplay scene; marks the state valid
    pub fn from_setup(setup: &GameplaySetup) -> Self {
        Self {
            beatmap: Some(setup.beatmap.clone()),
            left: HandStats::with_notes(setup.notes_for(Hand::Left)),
            right: HandStats::with_notes(setup.notes_for(Hand::Right)),
            health: setup.starting_health,
            no_fail: setup.no_fail,
            positive_mods: setup.positive_modifiers,
            negative_mods: setup.negative_modifiers,
            song_length: setup.song_length,
            state_valid: true,
            ..Default::default()
        }
    }

    pub fn beatmap(&self) -> Option<&BeatmapKey> {
        self.beatmap.as_ref()
    }

    pub fn hand(&self, hand: Hand) -> &HandStats {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    pub(crate) fn hand_mut(&mut self, hand: Hand) -> &mut HandStats {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn highest_combo(&self) -> u32 {
        self.highest_combo
    }

    pub fn walls_hit(&self) -> u32 {
        self.walls_hit
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn no_fail(&self) -> bool {
        self.no_fail
    }

    pub fn positive_mods(&self) -> f32 {
        self.positive_mods
    }

    pub fn negative_mods(&self) -> f32 {
        self.negative_mods
    }

    /// True once the no-fail penalty has been applied this session
    pub fn no_fail_penalized(&self) -> bool {
        self.no_fail_penalized
    }

    pub fn song_time(&self) -> f32 {
        self.song_time
    }

    pub fn song_length(&self) -> f32 {
        self.song_length
    }

    pub fn state_valid(&self) -> bool {
        self.state_valid
    }

    pub fn map_was_quit(&self) -> bool {
        self.map_was_quit
    }

    pub fn map_was_restarted(&self) -> bool {
        self.map_was_restarted
    }

    fn hit(&mut self, hand: Hand) {
        self.combo += 1;
        self.highest_combo = self.highest_combo.max(self.combo);
        self.hand_mut(hand).hit();
    }

    fn break_combo(&mut self, hand: Option<Hand>) {
        self.combo = 0;
        if let Some(hand) = hand {
            self.hand_mut(hand).combo = 0;
        }
    }

    /// Accumulate a despawned scoring element into its hand's buckets
    pub fn apply_scoring_element(&mut self, element: &ScoringElement) -> CutOutcome {
        let outcome = element.outcome();
        let stats = self.hand_mut(outcome.hand);
        stats.score += outcome.cut_score;
        stats.max_score += outcome.max_cut_score;
        stats.missed_max_score += outcome.missed_max_score;
        stats.missed_fixed_score += outcome.missed_fixed_score;
        outcome
    }

    /// Apply combo and cut counters for a note touched by a saber
    pub fn apply_note_cut(&mut self, info: &NoteCutInfo) -> CutResolution {
        let note = &info.note;
        if note.is_fake() {
            return CutResolution::Ignored;
        }

        let hand = info.hand();
        if note.counts() {
            self.hand_mut(note.hand()).resolve_note(note.hand());
        }

        if info.all_is_ok {
            self.hit(hand);
            return CutResolution::Good;
        }

        self.break_combo(Some(hand));
        let stats = self.hand_mut(hand);
        if note.is_bomb() {
            stats.bombs_hit += 1;
            CutResolution::BombHit
        } else {
            stats.notes_bad_cut += 1;
            CutResolution::BadCut
        }
    }

    /// Apply a note passing the player; returns false for bombs and fake notes
    pub fn apply_note_missed(&mut self, note: &NoteData) -> bool {
        if note.is_bomb() || note.is_fake() {
            return false;
        }

        let hand = note.hand();
        self.break_combo(Some(hand));
        let stats = self.hand_mut(hand);
        stats.notes_missed += 1;
        if note.counts() {
            stats.resolve_note(hand);
        }
        true
    }

    /// Fold a finished swing rating into the running swing sums.
    ///
    /// `fixed_after_cut_score` is credited to notes without an after-cut
    /// rating; `None` leaves them out of the post-swing sum.
    pub fn apply_swing_rating(
        &mut self,
        buffer: &CutScoreBuffer,
        fixed_after_cut_score: Option<u32>,
    ) -> SwingResolution {
        let info = &buffer.note_cut_info;
        if !info.all_is_ok {
            return SwingResolution::Skipped;
        }

        let stats = self.hand_mut(info.hand());
        if info.note.counts() {
            let after = if buffer.max_after_cut_score == 0 {
                fixed_after_cut_score
            } else {
                Some(buffer.after_cut_score)
            };

            stats.notes_cut += 1;
            stats.pre_swing += f64::from(buffer.before_cut_score);
            if let Some(after) = after {
                stats.post_swing += f64::from(after);
                stats.post_swing_notes += 1;
            }
            stats.accuracy += f64::from(buffer.center_distance_cut_score);
            stats.time_dependence += f64::from(info.time_dependence());
            SwingResolution::Counted
        } else if !info.note.is_fake() {
            stats.uncounted_notes_cut += 1;
            SwingResolution::Uncounted
        } else {
            SwingResolution::Skipped
        }
    }

    pub fn apply_wall_hit(&mut self) {
        self.walls_hit += 1;
        self.break_combo(None);
    }

    pub fn apply_no_fail_penalty(&mut self, penalty: f32) {
        self.negative_mods -= penalty;
        self.no_fail_penalized = true;
        debug!("no fail penalty applied, negative mods now {}", self.negative_mods);
    }

    pub(crate) fn set_health(&mut self, health: f32) {
        self.health = health;
    }

    pub(crate) fn set_song_time(&mut self, song_time: f32) {
        self.song_time = song_time;
    }

    /// Record how the map ended and stop accepting updates
    pub(crate) fn finish(&mut self, action: LevelEndAction) {
        self.map_was_quit = action == LevelEndAction::Quit;
        self.map_was_restarted = action == LevelEndAction::Restart;
        self.state_valid = false;
    }
}
