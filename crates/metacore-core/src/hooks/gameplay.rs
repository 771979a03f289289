//! Scoring, cut and energy handlers.

use tracing::debug;

use super::{HookPoint, MetaCore, enter};
use crate::event::EventKind;
use crate::game::{CutScoreBuffer, NoteCutInfo, NoteData, ScoringElement};
use crate::host::EnergyCounter;
use crate::state::{CutResolution, SwingResolution};

impl MetaCore {
    /// A scoring element finished its lifetime and was despawned
    pub fn despawn_scoring_element(
        &mut self,
        element: &ScoringElement,
        original: impl FnOnce(&ScoringElement),
    ) {
        enter(HookPoint::ScoringElementDespawned);
        original(element);
        self.session.update(|s| s.apply_scoring_element(element));
        self.emit(EventKind::ScoreChanged);
    }

    pub fn note_was_cut(&mut self, info: &NoteCutInfo, original: impl FnOnce(&NoteCutInfo)) {
        enter(HookPoint::NoteWasCut);
        original(info);
        match self.session.update(|s| s.apply_note_cut(info)) {
            CutResolution::Ignored => {}
            CutResolution::Good => self.emit(EventKind::ComboChanged),
            CutResolution::BadCut => self.emit_all(&[EventKind::NoteCut, EventKind::ComboChanged]),
            CutResolution::BombHit => self.emit_all(&[EventKind::BombCut, EventKind::ComboChanged]),
        }
    }

    pub fn note_was_missed(&mut self, note: &NoteData, original: impl FnOnce(&NoteData)) {
        enter(HookPoint::NoteWasMissed);
        original(note);
        if self.session.update(|s| s.apply_note_missed(note)) {
            self.emit_all(&[EventKind::NoteMissed, EventKind::ComboChanged]);
        }
    }

    /// All swing raters of a cut reported; the buffer is final
    pub fn swing_rating_finished(
        &mut self,
        buffer: &mut CutScoreBuffer,
        original: impl FnOnce(&mut CutScoreBuffer),
    ) {
        enter(HookPoint::SwingRatingFinished);
        original(buffer);
        self.handle_cut_finish(buffer);
    }

    /// Buffer initialization; returns whether the buffer still waits for
    /// swing ratings. A buffer finished during init is handled right away.
    pub fn cut_score_buffer_init(
        &mut self,
        buffer: &mut CutScoreBuffer,
        info: &NoteCutInfo,
        original: impl FnOnce(&mut CutScoreBuffer, &NoteCutInfo) -> bool,
    ) -> bool {
        enter(HookPoint::CutScoreBufferInit);
        let not_yet_finished = original(buffer, info);
        if !not_yet_finished {
            self.handle_cut_finish(buffer);
        }
        not_yet_finished
    }

    pub fn head_entered_obstacle(&mut self, original: impl FnOnce()) {
        enter(HookPoint::HeadEnteredObstacle);
        original();
        self.session.update(|s| s.apply_wall_hit());
        self.emit_all(&[EventKind::WallHit, EventKind::ComboChanged]);
    }

    pub fn process_energy_change<C>(
        &mut self,
        counter: &mut C,
        energy_change: f32,
        original: impl FnOnce(&mut C, f32),
    ) where
        C: EnergyCounter + ?Sized,
    {
        enter(HookPoint::EnergyChanged);
        let was_above_zero = !counter.did_reach_zero();
        original(counter, energy_change);

        let penalty = self.config.no_fail_penalty;
        let penalized = self.session.update(|s| {
            if s.no_fail() && was_above_zero && counter.did_reach_zero() {
                s.apply_no_fail_penalty(penalty);
                return true;
            }
            false
        });
        if penalized {
            debug!("energy reached zero with no fail active");
            self.emit(EventKind::ScoreChanged);
        }

        let energy = counter.energy();
        self.session.update(|s| s.set_health(energy));
        self.emit(EventKind::HealthChanged);
    }

    fn handle_cut_finish(&mut self, buffer: &CutScoreBuffer) {
        let fixed_after_cut_score = self.config.fixed_after_cut_score;
        let resolution = self
            .session
            .update(|s| s.apply_swing_rating(buffer, fixed_after_cut_score));
        if resolution != SwingResolution::Skipped {
            self.emit(EventKind::NoteCut);
        }
    }
}
