use serde::Serialize;
use strum::IntoStaticStr;

use crate::input::Button;

/// Name of a broadcast signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum EventKind {
    GameplaySceneStarted,
    GameplaySceneEnded,
    MapStarted,
    MapEnded,
    MapRestarted,
    MapPaused,
    MapUnpaused,
    SoftRestart,
    ScoreChanged,
    ComboChanged,
    NoteCut,
    NoteMissed,
    BombCut,
    WallHit,
    HealthChanged,
    Update,
    ButtonPressed,
    ButtonHeld,
    ButtonReleased,
    MapSelected,
    MapDeselected,
    PlaylistSelected,
    PlaylistDeselected,
    /// Event registered at runtime through `EventBus::register_event`
    Custom(u32),
}

impl EventKind {
    pub const BUILTIN: [EventKind; 23] = [
        EventKind::GameplaySceneStarted,
        EventKind::GameplaySceneEnded,
        EventKind::MapStarted,
        EventKind::MapEnded,
        EventKind::MapRestarted,
        EventKind::MapPaused,
        EventKind::MapUnpaused,
        EventKind::SoftRestart,
        EventKind::ScoreChanged,
        EventKind::ComboChanged,
        EventKind::NoteCut,
        EventKind::NoteMissed,
        EventKind::BombCut,
        EventKind::WallHit,
        EventKind::HealthChanged,
        EventKind::Update,
        EventKind::ButtonPressed,
        EventKind::ButtonHeld,
        EventKind::ButtonReleased,
        EventKind::MapSelected,
        EventKind::MapDeselected,
        EventKind::PlaylistSelected,
        EventKind::PlaylistDeselected,
    ];

    /// Look up a built-in event by name
    pub fn from_name(name: &str) -> Option<EventKind> {
        Self::BUILTIN
            .iter()
            .copied()
            .find(|kind| kind.static_name() == name)
    }

    pub fn static_name(&self) -> &'static str {
        self.into()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, EventKind::Custom(_))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Custom(id) => write!(f, "Custom({})", id),
            _ => write!(f, "{}", self.static_name()),
        }
    }
}

/// Payload slot carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum EventData {
    #[default]
    None,
    Button(Button),
    Int(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub data: EventData,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data: EventData::None,
        }
    }

    pub fn with_data(kind: EventKind, data: EventData) -> Self {
        Self { kind, data }
    }

    pub fn button(kind: EventKind, button: Button) -> Self {
        Self::with_data(kind, EventData::Button(button))
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Event::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for kind in EventKind::BUILTIN {
            assert_eq!(EventKind::from_name(kind.static_name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("NotAnEvent"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(EventKind::MapStarted.to_string(), "MapStarted");
        assert_eq!(EventKind::Custom(3).to_string(), "Custom(3)");
    }
}
