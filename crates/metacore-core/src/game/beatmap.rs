use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::game::{Hand, NoteData};

const CUSTOM_LEVEL_PREFIX: &str = "custom_level_";
const WIP_SUFFIX: &str = " WIP";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Difficulty {
    Easy = 0,
    Normal = 1,
    Hard = 2,
    #[default]
    Expert = 3,
    ExpertPlus = 4,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Identifies one playable beatmap: level, characteristic and difficulty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BeatmapKey {
    pub level_id: String,
    pub characteristic: String,
    pub difficulty: Difficulty,
}

impl BeatmapKey {
    pub fn new(
        level_id: impl Into<String>,
        characteristic: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            level_id: level_id.into(),
            characteristic: characteristic.into(),
            difficulty,
        }
    }

    /// Canonical name used to key data requests
    pub fn serialized_name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.level_id, self.characteristic, self.difficulty
        )
    }

    pub fn hash(&self) -> Option<&str> {
        level_hash(&self.level_id)
    }
}

/// Extract the content hash from a custom level id.
///
/// Returns `None` for levels that ship with the game.
pub fn level_hash(level_id: &str) -> Option<&str> {
    let start = level_id.find(CUSTOM_LEVEL_PREFIX)? + CUSTOM_LEVEL_PREFIX.len();
    let hash = &level_id[start..];
    Some(match hash.find(WIP_SUFFIX) {
        Some(end) => &hash[..end],
        None => hash,
    })
}

/// Metadata for a selectable level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeatmapLevel {
    pub level_id: String,
    #[serde(default)]
    pub song_name: String,
    #[serde(default)]
    pub song_author: String,
    #[serde(default)]
    pub beats_per_minute: f32,
    #[serde(default)]
    pub song_duration: f32,
}

impl BeatmapLevel {
    pub fn hash(&self) -> Option<&str> {
        level_hash(&self.level_id)
    }
}

/// A playlist or level pack
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelPack {
    pub pack_id: String,
    #[serde(default)]
    pub pack_name: String,
}

/// Raw level data returned by the first load stage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelData {
    pub level_id: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
}

/// Parsed notes and obstacles of one beatmap
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeatmapData {
    pub notes: Vec<NoteData>,
    #[serde(default)]
    pub obstacle_count: u32,
}

impl BeatmapData {
    /// Number of notes that count toward the given hand's totals
    pub fn counted_notes(&self, hand: Hand) -> u32 {
        self.notes
            .iter()
            .filter(|note| note.counts() && note.hand() == hand)
            .count() as u32
    }
}

/// Cover art for a level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub pixels: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ColorType, GameplayType};

    #[test]
    fn test_level_hash_custom() {
        assert_eq!(
            level_hash("custom_level_ABCDEF0123"),
            Some("ABCDEF0123")
        );
    }

    #[test]
    fn test_level_hash_strips_wip() {
        assert_eq!(level_hash("custom_level_ABCDEF WIP"), Some("ABCDEF"));
    }

    #[test]
    fn test_level_hash_base_game() {
        assert_eq!(level_hash("100Bills"), None);
    }

    #[test]
    fn test_serialized_name() {
        let key = BeatmapKey::new("custom_level_AB", "Standard", Difficulty::ExpertPlus);
        assert_eq!(key.serialized_name(), "custom_level_AB_Standard_ExpertPlus");
        assert_eq!(key.hash(), Some("AB"));
    }

    #[test]
    fn test_difficulty_from_repr() {
        assert_eq!(Difficulty::from_repr(4), Some(Difficulty::ExpertPlus));
        assert_eq!(Difficulty::from_repr(9), None);
    }

    #[test]
    fn test_counted_notes_per_hand() {
        let data = BeatmapData {
            notes: vec![
                NoteData::new(GameplayType::Normal, ColorType::ColorA),
                NoteData::new(GameplayType::Normal, ColorType::ColorA),
                NoteData::new(GameplayType::Normal, ColorType::ColorB),
                NoteData::new(GameplayType::Bomb, ColorType::None),
                NoteData::new(GameplayType::BurstSliderElement, ColorType::ColorB),
            ],
            obstacle_count: 3,
        };
        assert_eq!(data.counted_notes(Hand::Left), 2);
        assert_eq!(data.counted_notes(Hand::Right), 1);
    }
}
