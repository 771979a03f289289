use crate::event::EventKind;
use crate::game::{BeatmapKey, BeatmapLevel, LevelPack};

/// Which part of the selection a view owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionSlot {
    Level,
    Playlist,
}

/// Selection published by a view when it becomes active
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionUpdate {
    Level {
        key: BeatmapKey,
        level: Option<BeatmapLevel>,
    },
    Playlist(Option<LevelPack>),
}

impl SelectionUpdate {
    pub fn slot(&self) -> SelectionSlot {
        match self {
            SelectionUpdate::Level { .. } => SelectionSlot::Level,
            SelectionUpdate::Playlist(_) => SelectionSlot::Playlist,
        }
    }
}

/// Menu selection, independent of gameplay sessions.
///
/// Values are kept after being cleared so callers can ask for the last
/// known selection explicitly.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    key: Option<BeatmapKey>,
    level: Option<BeatmapLevel>,
    playlist: Option<LevelPack>,
    level_selected: bool,
    playlist_selected: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update; returns the event to broadcast
    pub fn apply(&mut self, update: SelectionUpdate) -> Option<EventKind> {
        match update {
            SelectionUpdate::Level { key, level } => {
                self.key = Some(key);
                self.level = level;
                self.level_selected = true;
                Some(EventKind::MapSelected)
            }
            SelectionUpdate::Playlist(Some(pack)) => {
                self.playlist = Some(pack);
                self.playlist_selected = true;
                Some(EventKind::PlaylistSelected)
            }
            SelectionUpdate::Playlist(None) => self.clear(SelectionSlot::Playlist),
        }
    }

    /// Invalidate a slot; returns the event to broadcast if it was selected
    pub fn clear(&mut self, slot: SelectionSlot) -> Option<EventKind> {
        let (selected, event) = match slot {
            SelectionSlot::Level => (&mut self.level_selected, EventKind::MapDeselected),
            SelectionSlot::Playlist => (&mut self.playlist_selected, EventKind::PlaylistDeselected),
        };
        if !std::mem::replace(selected, false) {
            return None;
        }
        Some(event)
    }

    pub fn is_level_selected(&self) -> bool {
        self.level_selected
    }

    pub fn is_playlist_selected(&self) -> bool {
        self.playlist_selected
    }

    /// Current key, or the last known one when `last` is set
    pub fn selected_key(&self, last: bool) -> Option<&BeatmapKey> {
        if !last && !self.level_selected {
            return None;
        }
        self.key.as_ref()
    }

    pub fn selected_level(&self, last: bool) -> Option<&BeatmapLevel> {
        if !last && !self.level_selected {
            return None;
        }
        self.level.as_ref()
    }

    pub fn selected_playlist(&self, last: bool) -> Option<&LevelPack> {
        if !last && !self.playlist_selected {
            return None;
        }
        self.playlist.as_ref()
    }
}
