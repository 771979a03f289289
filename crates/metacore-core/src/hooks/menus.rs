//! Menu selection tracking and score submission.

use tracing::{debug, info, trace};

use super::{HookPoint, MetaCore, enter};
use crate::game::{BeatmapKey, BeatmapLevel, LevelCompletionResults, LevelPack};
use crate::host::{InstanceId, SignalBinding};
use crate::state::{SelectionSlot, SelectionUpdate};

impl MetaCore {
    /// The level detail view was filled for a beatmap
    pub fn level_detail_content_set(
        &mut self,
        view: InstanceId,
        key: &BeatmapKey,
        level: Option<&BeatmapLevel>,
        original: impl FnOnce(),
    ) {
        enter(HookPoint::LevelDetailContentSet);
        self.attach_selection(
            view,
            SelectionUpdate::Level {
                key: key.clone(),
                level: level.cloned(),
            },
            SelectionSlot::Level,
        );
        original();
    }

    /// The campaign detail view was refreshed for a mission's beatmap
    pub fn mission_detail_refreshed(
        &mut self,
        view: InstanceId,
        key: &BeatmapKey,
        original: impl FnOnce(),
    ) {
        enter(HookPoint::MissionDetailRefreshed);
        let level = self
            .source
            .as_ref()
            .and_then(|source| source.find_level(&key.level_id));
        self.attach_selection(
            view,
            SelectionUpdate::Level {
                key: key.clone(),
                level,
            },
            SelectionSlot::Level,
        );
        original();
    }

    pub fn collection_selected(
        &mut self,
        view: InstanceId,
        pack: Option<&LevelPack>,
        original: impl FnOnce(Option<&LevelPack>),
    ) {
        enter(HookPoint::CollectionSelected);
        original(pack);
        self.attach_selection(
            view,
            SelectionUpdate::Playlist(pack.cloned()),
            SelectionSlot::Playlist,
        );
    }

    /// The collection list was populated with its initial selection
    pub fn collection_data_set(
        &mut self,
        view: InstanceId,
        packs: &[LevelPack],
        selected_index: usize,
        original: impl FnOnce(&[LevelPack], usize),
    ) {
        enter(HookPoint::CollectionDataSet);
        original(packs, selected_index);
        self.attach_selection(
            view,
            SelectionUpdate::Playlist(packs.get(selected_index).cloned()),
            SelectionSlot::Playlist,
        );
    }

    /// A view carrying a selection binding became active again
    pub fn view_enabled(&mut self, view: InstanceId) {
        let Some(binding) = self.signals.binding(view) else {
            return;
        };
        let update = binding.on_enable.clone();
        self.publish_selection(update);
    }

    pub fn view_disabled(&mut self, view: InstanceId) {
        let Some(binding) = self.signals.binding(view) else {
            return;
        };
        let slot = binding.on_disable;
        if let Some(event) = self.selection.update(|s| s.clear(slot)) {
            self.bus.broadcast(event);
        }
    }

    /// Solo and campaign score processing; skipped while submission is
    /// disabled. Returns whether the original ran.
    pub fn process_score(
        &mut self,
        results: &LevelCompletionResults,
        original: impl FnOnce(&LevelCompletionResults),
    ) -> bool {
        enter(HookPoint::ProcessScore);
        if self.policy.is_score_submission_disabled() {
            info!("disabling submission of score");
            return false;
        }
        original(results);
        true
    }

    pub fn will_score_go_to_leaderboard(
        &mut self,
        results: &LevelCompletionResults,
        leaderboard_id: &str,
        practice: bool,
        original: impl FnOnce(&LevelCompletionResults, &str, bool) -> bool,
    ) -> bool {
        enter(HookPoint::WillScoreGoToLeaderboard);
        let will_submit = original(results, leaderboard_id, practice);
        if self.policy.is_score_submission_disabled() {
            info!("disabling submission of score");
            return false;
        }
        will_submit
    }

    // The enable update is published right away as well as on every later
    // enable, so returning from a submenu restores the selection.
    fn attach_selection(&mut self, view: InstanceId, update: SelectionUpdate, clear: SelectionSlot) {
        trace!("tracking {:?} selection on view {}", update.slot(), view);
        self.signals.attach(
            view,
            SignalBinding {
                on_enable: update.clone(),
                on_disable: clear,
            },
        );
        self.publish_selection(update);
    }

    fn publish_selection(&mut self, update: SelectionUpdate) {
        if let Some(event) = self.selection.update(|s| s.apply(update)) {
            debug!("selection changed: {}", event);
            self.bus.broadcast(event);
        }
    }
}
