//! Scene lifecycle handlers.

use tracing::{debug, info};

use super::{HookPoint, MetaCore, enter};
use crate::event::EventKind;
use crate::game::{
    DisconnectedReason, FinishResult, LevelCompletionResults, LevelEndAction,
    MissionCompletionResults, MultiplayerResultsData, SceneTransition,
};
use crate::host::SongClock;
use crate::state::{Phase, SessionState, SessionSummary};

impl MetaCore {
    /// Gameplay scenes were pushed on top of the menu
    pub fn scenes_pushed(&mut self, transition: &SceneTransition, original: impl FnOnce()) {
        enter(HookPoint::ScenesPushed);
        self.check_initialize(transition);
        original();
    }

    /// Scenes were replaced and the new ones loaded (level restarts)
    pub fn scenes_replaced_after_load(
        &mut self,
        transition: &SceneTransition,
        original: impl FnOnce(),
    ) {
        enter(HookPoint::ScenesReplacedAfterLoad);
        self.check_initialize(transition);
        original();
    }

    pub fn scenes_popped(&mut self, original: impl FnOnce()) {
        enter(HookPoint::ScenesPopped);
        self.check_scene_finish();
        original();
    }

    pub fn scenes_replaced_after_unload(&mut self, original: impl FnOnce()) {
        enter(HookPoint::ScenesReplacedAfterUnload);
        self.check_scene_finish();
        original();
    }

    pub fn song_started(&mut self, start_time_offset: f32, original: impl FnOnce(f32)) {
        enter(HookPoint::SongStarted);
        info!("level start");
        self.emit(EventKind::MapStarted);
        original(start_time_offset);
    }

    /// Per-frame audio update; the only periodic broadcast point
    pub fn audio_update<C>(&mut self, clock: &mut C, original: impl FnOnce(&mut C))
    where
        C: SongClock + ?Sized,
    {
        enter(HookPoint::AudioUpdate);
        original(clock);
        if !self.session.get().state_valid() {
            return;
        }

        let song_time = clock.song_time();
        self.slow_tasks.run_due(song_time, &self.session.get());
        self.session.update(|s| s.set_song_time(song_time));
        self.emit(EventKind::Update);
    }

    pub fn pause_menu_shown(&mut self, original: impl FnOnce()) {
        enter(HookPoint::PauseMenuShown);
        original();
        self.pause();
    }

    pub fn pause_menu_resumed(&mut self, original: impl FnOnce()) {
        enter(HookPoint::PauseMenuResumed);
        original();
        self.unpause();
    }

    pub fn multiplayer_menu_shown(&mut self, original: impl FnOnce()) {
        enter(HookPoint::MultiplayerMenuShown);
        original();
        self.pause();
    }

    pub fn multiplayer_menu_hidden(&mut self, original: impl FnOnce()) {
        enter(HookPoint::MultiplayerMenuHidden);
        original();
        self.unpause();
    }

    pub fn standard_level_finished(
        &mut self,
        results: &LevelCompletionResults,
        original: impl FnOnce(&LevelCompletionResults),
    ) {
        enter(HookPoint::StandardLevelFinished);
        info!("standard level end {:?}", results.level_end_action);
        self.level_finished(results, original);
    }

    pub fn mission_level_finished(
        &mut self,
        results: &MissionCompletionResults,
        original: impl FnOnce(&MissionCompletionResults),
    ) {
        enter(HookPoint::MissionLevelFinished);
        info!(
            "campaign level end {:?}",
            results.level_completion_results.level_end_action
        );
        self.level_finished(results, original);
    }

    pub fn multiplayer_level_finished(
        &mut self,
        results: &MultiplayerResultsData,
        original: impl FnOnce(&MultiplayerResultsData),
    ) {
        enter(HookPoint::MultiplayerLevelFinished);
        info!("multiplayer level end");
        self.level_finished(results, original);
    }

    pub fn multiplayer_level_disconnected(
        &mut self,
        reason: &DisconnectedReason,
        original: impl FnOnce(&DisconnectedReason),
    ) {
        enter(HookPoint::MultiplayerLevelDisconnected);
        info!("multiplayer level disconnect {:?}", reason);
        self.level_finished(reason, original);
    }

    /// The host is restarting the whole game without leaving the process
    pub fn soft_restart(&mut self, original: impl FnOnce()) {
        enter(HookPoint::SoftRestart);
        info!("soft restart");
        self.emit(EventKind::SoftRestart);
        original();
    }

    fn check_initialize(&mut self, transition: &SceneTransition) {
        let Some(setup) = transition.gameplay_setup() else {
            debug!("non-gameplay scene transition");
            return;
        };

        debug!("gameplay scene start");
        self.lifecycle.transition(Phase::AwaitingInit);
        self.session.replace(SessionState::from_setup(setup));
        self.slow_tasks.reset();
        self.lifecycle.transition(Phase::Active);
        self.emit(EventKind::GameplaySceneStarted);
    }

    fn level_finished<R: FinishResult>(&mut self, results: &R, original: impl FnOnce(&R)) {
        self.check_early_finish(results.end_action());
        original(results);
    }

    fn check_early_finish(&mut self, action: LevelEndAction) {
        if !self.lifecycle.transition(Phase::Finishing) {
            debug!("level end outside of a playing level");
            return;
        }

        let summary = self.session.update(|s| {
            s.finish(action);
            SessionSummary::capture(s, action)
        });
        self.last_summary = Some(summary);

        if action == LevelEndAction::Restart {
            self.emit(EventKind::MapRestarted);
        } else {
            self.emit(EventKind::MapEnded);
        }
    }

    fn check_scene_finish(&mut self) {
        if !self.lifecycle.in_gameplay_scene() {
            return;
        }
        debug!("gameplay scene finish");
        self.emit(EventKind::GameplaySceneEnded);
        self.lifecycle.transition(Phase::Idle);
    }

    fn pause(&mut self) {
        if self.lifecycle.transition(Phase::Paused) {
            self.emit(EventKind::MapPaused);
        }
    }

    fn unpause(&mut self) {
        if self.lifecycle.transition(Phase::Active) {
            self.emit(EventKind::MapUnpaused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BeatmapKey, Difficulty, GameplaySetup};
    use crate::hooks::tests::recorder;
    use crate::host::MockClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn gameplay() -> SceneTransition {
        SceneTransition::Gameplay(GameplaySetup {
            beatmap: BeatmapKey::new("custom_level_AB", "Standard", Difficulty::Hard),
            left_notes: Some(10),
            right_notes: Some(10),
            song_length: 60.0,
            ..Default::default()
        })
    }

    fn restart() -> LevelCompletionResults {
        LevelCompletionResults {
            level_end_action: LevelEndAction::Restart,
            ..Default::default()
        }
    }

    #[test]
    fn test_scene_start_then_song_start() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);
        let original_ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&original_ran);

        core.scenes_pushed(&gameplay(), || *flag.borrow_mut() = true);
        core.song_started(0.0, |_| {});

        assert!(*original_ran.borrow());
        assert_eq!(
            *log.borrow(),
            vec![EventKind::GameplaySceneStarted, EventKind::MapStarted]
        );
        assert!(core.in_gameplay_scene());
        assert!(core.session().get().state_valid());
        assert_eq!(core.phase(), Phase::Active);
    }

    #[test]
    fn test_menu_transition_is_ignored() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);
        core.scenes_pushed(&SceneTransition::Menu, || {});
        core.scenes_popped(|| {});
        assert!(log.borrow().is_empty());
        assert!(!core.in_gameplay_scene());
    }

    #[test]
    fn test_initialize_runs_before_original() {
        let mut core = MetaCore::default();
        let session = core.session();
        core.scenes_pushed(&gameplay(), move || {
            assert!(session.get().state_valid());
        });
    }

    #[test]
    fn test_restart_flow() {
        let mut core = MetaCore::default();
        core.scenes_pushed(&gameplay(), || {});
        let log = recorder(&mut core);

        core.standard_level_finished(&restart(), |_| {});
        assert_eq!(*log.borrow(), vec![EventKind::MapRestarted]);
        assert!(core.session().get().map_was_restarted());
        assert!(core.last_summary().unwrap().was_restarted());

        core.scenes_replaced_after_unload(|| {});
        assert!(!core.in_gameplay_scene());
        core.scenes_replaced_after_load(&gameplay(), || {});

        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::MapRestarted,
                EventKind::GameplaySceneEnded,
                EventKind::GameplaySceneStarted
            ]
        );
        assert!(!core.session().get().map_was_restarted());
    }

    #[test]
    fn test_finish_outside_gameplay_is_noop() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);
        let ran = Rc::new(RefCell::new(0));
        let count = Rc::clone(&ran);

        core.standard_level_finished(&restart(), |_| *count.borrow_mut() += 1);
        core.scenes_popped(|| {});

        assert!(log.borrow().is_empty());
        assert_eq!(*ran.borrow(), 1);
        assert!(core.last_summary().is_none());
    }

    #[test]
    fn test_second_finish_is_noop() {
        let mut core = MetaCore::default();
        core.scenes_pushed(&gameplay(), || {});
        let log = recorder(&mut core);

        core.multiplayer_level_finished(&MultiplayerResultsData::default(), |_| {});
        core.multiplayer_level_disconnected(&DisconnectedReason::Timeout, |_| {});
        assert_eq!(*log.borrow(), vec![EventKind::MapEnded]);
        assert!(!core.session().get().map_was_quit());
    }

    #[test]
    fn test_disconnect_counts_as_quit() {
        let mut core = MetaCore::default();
        core.scenes_pushed(&gameplay(), || {});
        core.multiplayer_level_disconnected(&DisconnectedReason::Kicked, |_| {});
        assert!(core.session().get().map_was_quit());
        assert_eq!(
            core.last_summary().unwrap().end_action,
            LevelEndAction::Quit
        );
    }

    #[test]
    fn test_pause_and_resume() {
        let mut core = MetaCore::default();
        core.scenes_pushed(&gameplay(), || {});
        let log = recorder(&mut core);

        core.pause_menu_shown(|| {});
        core.multiplayer_menu_shown(|| {});
        assert_eq!(core.phase(), Phase::Paused);
        core.pause_menu_resumed(|| {});
        core.multiplayer_menu_hidden(|| {});

        assert_eq!(
            *log.borrow(),
            vec![EventKind::MapPaused, EventKind::MapUnpaused]
        );
        assert_eq!(core.phase(), Phase::Active);
    }

    #[test]
    fn test_update_gated_on_state_valid() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);
        let mut clock = MockClock(5.0);

        core.audio_update(&mut clock, |_| {});
        assert!(log.borrow().is_empty());

        core.scenes_pushed(&gameplay(), || {});
        core.audio_update(&mut clock, |c| c.0 = 6.0);
        assert_eq!(log.borrow().last(), Some(&EventKind::Update));
        assert!((core.session().get().song_time() - 6.0).abs() < f32::EPSILON);

        core.standard_level_finished(&LevelCompletionResults::default(), |_| {});
        let before = log.borrow().len();
        core.audio_update(&mut clock, |_| {});
        assert_eq!(log.borrow().len(), before);
    }

    #[test]
    fn test_slow_tasks_run_before_update() {
        let mut core = MetaCore::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&order);
        core.register_slow_task(1.0, move |_| sink.borrow_mut().push("slow"));
        let sink = Rc::clone(&order);
        core.subscribe(EventKind::Update, move |_| sink.borrow_mut().push("update"));

        core.scenes_pushed(&gameplay(), || {});
        for time in [0.0, 0.5, 1.0] {
            core.audio_update(&mut MockClock(time), |_| {});
        }
        assert_eq!(
            *order.borrow(),
            vec!["slow", "update", "update", "slow", "update"]
        );
    }

    #[test]
    fn test_soft_restart_is_independent_of_phase() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);
        core.soft_restart(|| {});
        assert_eq!(*log.borrow(), vec![EventKind::SoftRestart]);
        assert_eq!(core.phase(), Phase::Idle);
    }
}
