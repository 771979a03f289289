//! Integration tests for metacore-core
//!
//! These drive `MetaCore` through whole interception sequences the way a
//! host would, checking the broadcast order and the state listeners see.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use metacore_core::game::{
    BeatmapData, BeatmapKey, BeatmapLevel, ColorType, Difficulty, GameplaySetup, GameplayType,
    LevelCompletionResults, LevelEndAction, NoteCutInfo, NoteData, SaberType, SceneTransition,
};
use metacore_core::host::{MockBeatmapSource, MockClock, MockEnergy};
use metacore_core::{EventKind, MetaCore, Phase, Scope};

fn recorder(core: &mut MetaCore) -> Rc<RefCell<Vec<EventKind>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    core.bus_mut()
        .subscribe_all(move |event| sink.borrow_mut().push(event.kind));
    log
}

fn key() -> BeatmapKey {
    BeatmapKey::new("custom_level_F00D", "Standard", Difficulty::Expert)
}

fn gameplay(left: u32, right: u32) -> SceneTransition {
    SceneTransition::Gameplay(GameplaySetup {
        beatmap: key(),
        left_notes: Some(left),
        right_notes: Some(right),
        song_length: 120.0,
        ..Default::default()
    })
}

fn cut(color: ColorType, saber: SaberType, ok: bool) -> NoteCutInfo {
    NoteCutInfo {
        note: NoteData::new(GameplayType::Normal, color),
        saber_type: saber,
        all_is_ok: ok,
        cut_normal: [0.0, 0.0, 1.0],
    }
}

fn finish(action: LevelEndAction) -> LevelCompletionResults {
    LevelCompletionResults {
        level_end_action: action,
        ..Default::default()
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_full_level() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);

        core.scenes_pushed(&gameplay(2, 2), || {});
        core.song_started(0.0, |_| {});
        core.note_was_cut(&cut(ColorType::ColorA, SaberType::SaberA, true), |_| {});
        core.note_was_cut(&cut(ColorType::ColorB, SaberType::SaberB, false), |_| {});
        core.note_was_missed(&NoteData::new(GameplayType::Normal, ColorType::ColorA), |_| {});
        core.audio_update(&mut MockClock(30.0), |_| {});
        core.standard_level_finished(&finish(LevelEndAction::None), |_| {});
        core.scenes_popped(|| {});

        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::GameplaySceneStarted,
                EventKind::MapStarted,
                EventKind::ComboChanged,
                EventKind::NoteCut,
                EventKind::ComboChanged,
                EventKind::NoteMissed,
                EventKind::ComboChanged,
                EventKind::Update,
                EventKind::MapEnded,
                EventKind::GameplaySceneEnded,
            ]
        );

        let session = core.session();
        let state = session.get();
        assert_eq!(state.combo(), 0);
        assert_eq!(state.highest_combo(), 1);
        assert_eq!(state.remaining_notes(Scope::Left), 0);
        assert_eq!(state.remaining_notes(Scope::Right), 1);
        assert_eq!(state.notes_bad_cut(Scope::Right), 1);
        assert_eq!(state.notes_missed(Scope::Left), 1);
        assert!((state.song_progress() - 0.25).abs() < f32::EPSILON);
        assert!(!state.state_valid());
        assert_eq!(core.phase(), Phase::Idle);

        let summary = core.last_summary().unwrap();
        assert_eq!(summary.end_action, LevelEndAction::None);
        assert_eq!(summary.highest_combo, 1);
        assert!(!summary.is_full_combo());
    }

    #[test]
    fn test_restart_starts_a_fresh_session() {
        let mut core = MetaCore::default();
        let log = recorder(&mut core);

        core.scenes_pushed(&gameplay(4, 4), || {});
        core.note_was_cut(&cut(ColorType::ColorA, SaberType::SaberA, true), |_| {});
        core.standard_level_finished(&finish(LevelEndAction::Restart), |_| {});
        core.scenes_replaced_after_load(&gameplay(4, 4), || {});

        assert!(core.last_summary().unwrap().was_restarted());
        let session = core.session();
        assert_eq!(session.get().highest_combo(), 0);
        assert_eq!(session.get().remaining_notes(Scope::Both), 8);
        assert!(session.get().state_valid());
        assert_eq!(core.phase(), Phase::Active);

        let log = log.borrow();
        assert_eq!(
            log[log.len() - 2..],
            [EventKind::MapRestarted, EventKind::GameplaySceneStarted]
        );
    }

    #[test]
    fn test_no_fail_run() {
        let mut core = MetaCore::default();
        core.scenes_pushed(
            &SceneTransition::Gameplay(GameplaySetup {
                no_fail: true,
                ..Default::default()
            }),
            || {},
        );

        let mut energy = MockEnergy::new(0.2);
        core.process_energy_change(&mut energy, -0.5, |c, delta| c.change(delta));
        core.process_energy_change(&mut energy, 0.1, |c, delta| c.change(delta));
        core.process_energy_change(&mut energy, -0.5, |c, delta| c.change(delta));

        let session = core.session();
        assert!(session.get().no_fail_penalized());
        assert!((session.get().negative_mods() + 0.5).abs() < f32::EPSILON);
        assert!((session.get().modifier_multiplier() - 0.5).abs() < f32::EPSILON);
    }
}

mod listener_tests {
    use super::*;

    #[test]
    fn test_listener_reads_updated_state() {
        let mut core = MetaCore::default();
        let session = core.session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        core.subscribe(EventKind::ComboChanged, move |_| {
            sink.borrow_mut().push(session.get().combo());
        });

        core.scenes_pushed(&gameplay(8, 8), || {});
        for _ in 0..3 {
            core.note_was_cut(&cut(ColorType::ColorA, SaberType::SaberA, true), |_| {});
        }
        core.head_entered_obstacle(|| {});
        core.note_was_cut(&cut(ColorType::ColorB, SaberType::SaberB, true), |_| {});

        assert_eq!(*seen.borrow(), vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_highest_combo_never_decreases() {
        let mut core = MetaCore::default();
        let session = core.session();
        let highest = Rc::new(Cell::new(0));
        let sink = Rc::clone(&highest);
        core.subscribe(EventKind::ComboChanged, move |_| {
            let now = session.get().highest_combo();
            assert!(now >= sink.get());
            sink.set(now);
        });

        core.scenes_pushed(&gameplay(20, 20), || {});
        let pattern = [true, true, false, true, true, true, false, true];
        for (i, ok) in pattern.iter().enumerate() {
            let (color, saber) = if i % 2 == 0 {
                (ColorType::ColorA, SaberType::SaberA)
            } else {
                (ColorType::ColorB, SaberType::SaberB)
            };
            core.note_was_cut(&cut(color, saber, *ok), |_| {});
        }
        assert_eq!(highest.get(), 3);
    }

    #[test]
    fn test_nested_emit_follows_current_event() {
        let mut core = MetaCore::default();
        let follow_up = core.register_event("overlay", "MapIntro");
        core.subscribe_with_emitter(EventKind::MapStarted, move |_, emitter| {
            emitter.emit(follow_up);
        });
        let log = recorder(&mut core);

        core.scenes_pushed(&gameplay(1, 1), || {});
        core.song_started(0.0, |_| {});
        core.audio_update(&mut MockClock(1.0), |_| {});

        assert_eq!(
            *log.borrow(),
            vec![
                EventKind::GameplaySceneStarted,
                EventKind::MapStarted,
                follow_up,
                EventKind::Update,
            ]
        );
    }
}

mod async_tests {
    use super::*;

    fn source() -> Rc<MockBeatmapSource> {
        Rc::new(
            MockBeatmapSource::new()
                .with_level(BeatmapLevel {
                    level_id: "custom_level_F00D".to_string(),
                    beats_per_minute: 150.0,
                    ..Default::default()
                })
                .with_beatmap(
                    &key(),
                    BeatmapData {
                        notes: vec![NoteData::new(GameplayType::Normal, ColorType::ColorA)],
                        obstacle_count: 2,
                    },
                )
                .deferred(),
        )
    }

    #[test]
    fn test_concurrent_requests_share_one_load() {
        let source = source();
        let mut core = MetaCore::default().with_source(source.clone());
        let results = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let sink = Rc::clone(&results);
            core.get_beatmap_data(&key(), move |data| {
                sink.borrow_mut().push((id, data.map(|d| d.obstacle_count)));
            });
        }
        assert_eq!(core.requests().in_flight(), 1);

        source.release();
        core.tick(0.0);
        source.release();
        core.tick(0.0);

        assert_eq!(
            *results.borrow(),
            vec![(0, Some(2)), (1, Some(2)), (2, Some(2))]
        );
        assert_eq!(source.level_loads(), 1);
        assert_eq!(source.beatmap_loads(), 1);
        assert_eq!(core.requests().in_flight(), 0);
    }

    #[test]
    fn test_fade_timer_dropped_with_owner() {
        let mut core = MetaCore::default();
        let fired = Rc::new(Cell::new(false));
        let sink = Rc::clone(&fired);
        core.fade_in(42, 0.5, 0.0, Some(move || sink.set(true)));

        core.tick(0.25);
        core.object_destroyed(42, |_| {});
        core.tick(1.0);

        assert!(!fired.get());
        assert_eq!(core.main_thread().timer_count(), 0);
    }
}
