use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Note color. `ColorA` belongs to the left saber.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum ColorType {
    #[default]
    ColorA,
    ColorB,
    None,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum SaberType {
    #[default]
    SaberA,
    SaberB,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum GameplayType {
    #[default]
    Normal,
    Bomb,
    BurstSliderHead,
    BurstSliderElement,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum ScoringType {
    Ignore,
    NoScore,
    #[default]
    Normal,
    ArcHead,
    ArcTail,
    ArcHeadArcTail,
    ChainHead,
    ChainHeadArcTail,
    ChainLink,
}

/// Which saber a statistic belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Hand owning notes of the given color; anything that is not
    /// `ColorA` is scored on the right.
    pub fn from_color(color: ColorType) -> Self {
        match color {
            ColorType::ColorA => Hand::Left,
            _ => Hand::Right,
        }
    }

    pub fn from_saber(saber: SaberType) -> Self {
        match saber {
            SaberType::SaberA => Hand::Left,
            SaberType::SaberB => Hand::Right,
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Static description of a beatmap note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteData {
    pub gameplay_type: GameplayType,
    pub color_type: ColorType,
    #[serde(default)]
    pub scoring_type: ScoringType,
}

impl NoteData {
    pub fn new(gameplay_type: GameplayType, color_type: ColorType) -> Self {
        let scoring_type = match gameplay_type {
            GameplayType::Normal => ScoringType::Normal,
            GameplayType::Bomb => ScoringType::NoScore,
            GameplayType::BurstSliderHead => ScoringType::ChainHead,
            GameplayType::BurstSliderElement => ScoringType::ChainLink,
        };
        Self {
            gameplay_type,
            color_type,
            scoring_type,
        }
    }

    pub fn with_scoring_type(mut self, scoring_type: ScoringType) -> Self {
        self.scoring_type = scoring_type;
        self
    }

    pub fn is_bomb(&self) -> bool {
        self.gameplay_type == GameplayType::Bomb
    }

    /// Notes the host never scores (mapping extensions, fake notes)
    pub fn is_fake(&self) -> bool {
        !self.is_bomb() && matches!(self.scoring_type, ScoringType::Ignore | ScoringType::NoScore)
    }

    /// Notes that count toward note totals and swing averages.
    ///
    /// Chain links are cut and scored but have no swing rating of their own.
    pub fn counts(&self) -> bool {
        !self.is_fake()
            && matches!(
                self.gameplay_type,
                GameplayType::Normal | GameplayType::BurstSliderHead
            )
    }

    /// Notes whose good-cut score is fixed by their scoring definition
    pub fn has_fixed_score(&self) -> bool {
        self.gameplay_type == GameplayType::BurstSliderElement
    }

    pub fn hand(&self) -> Hand {
        Hand::from_color(self.color_type)
    }
}

/// Result of a saber touching a note
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteCutInfo {
    pub note: NoteData,
    pub saber_type: SaberType,
    pub all_is_ok: bool,
    /// Cut plane normal (x, y, z)
    #[serde(default)]
    pub cut_normal: [f32; 3],
}

impl NoteCutInfo {
    pub fn hand(&self) -> Hand {
        Hand::from_saber(self.saber_type)
    }

    /// Absolute z-component of the cut normal
    pub fn time_dependence(&self) -> f32 {
        self.cut_normal[2].abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_from_color() {
        assert_eq!(Hand::from_color(ColorType::ColorA), Hand::Left);
        assert_eq!(Hand::from_color(ColorType::ColorB), Hand::Right);
        assert_eq!(Hand::from_color(ColorType::None), Hand::Right);
    }

    #[test]
    fn test_bomb_is_not_fake_and_not_counted() {
        let bomb = NoteData::new(GameplayType::Bomb, ColorType::None);
        assert!(bomb.is_bomb());
        assert!(!bomb.is_fake());
        assert!(!bomb.counts());
    }

    #[test]
    fn test_fake_notes() {
        let fake = NoteData::new(GameplayType::Normal, ColorType::ColorA)
            .with_scoring_type(ScoringType::Ignore);
        assert!(fake.is_fake());
        assert!(!fake.counts());

        let no_score = NoteData::new(GameplayType::Normal, ColorType::ColorB)
            .with_scoring_type(ScoringType::NoScore);
        assert!(no_score.is_fake());
    }

    #[test]
    fn test_counting_notes() {
        assert!(NoteData::new(GameplayType::Normal, ColorType::ColorA).counts());
        assert!(NoteData::new(GameplayType::BurstSliderHead, ColorType::ColorA).counts());

        let link = NoteData::new(GameplayType::BurstSliderElement, ColorType::ColorA);
        assert!(!link.counts());
        assert!(!link.is_fake());
        assert!(link.has_fixed_score());
    }

    #[test]
    fn test_time_dependence_is_absolute() {
        let info = NoteCutInfo {
            cut_normal: [0.0, 0.6, -0.8],
            ..Default::default()
        };
        assert!((info.time_dependence() - 0.8).abs() < f32::EPSILON);
    }
}
