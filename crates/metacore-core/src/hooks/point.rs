use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Host operations the engine intercepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum HookPoint {
    // scene lifecycle
    ScenesPushed,
    ScenesReplacedAfterLoad,
    ScenesPopped,
    ScenesReplacedAfterUnload,
    SongStarted,
    AudioUpdate,
    PauseMenuShown,
    PauseMenuResumed,
    MultiplayerMenuShown,
    MultiplayerMenuHidden,
    StandardLevelFinished,
    MissionLevelFinished,
    MultiplayerLevelFinished,
    MultiplayerLevelDisconnected,
    SoftRestart,

    // gameplay
    ScoringElementDespawned,
    NoteWasCut,
    NoteWasMissed,
    SwingRatingFinished,
    CutScoreBufferInit,
    HeadEnteredObstacle,
    EnergyChanged,

    // menus
    ProcessScore,
    WillScoreGoToLeaderboard,
    LevelDetailContentSet,
    MissionDetailRefreshed,
    CollectionSelected,
    CollectionDataSet,

    // engine
    InputUpdate,
    HapticPulse,
    HapticFeedback,
    FadeIn,
    FadeOut,
    ObjectDestroyed,
    Abort,
}

impl HookPoint {
    /// Whether the original operation is replaced rather than wrapped
    pub fn replaces_original(&self) -> bool {
        matches!(self, HookPoint::FadeIn | HookPoint::FadeOut)
    }

    pub fn all() -> impl Iterator<Item = HookPoint> {
        HookPoint::iter()
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}
