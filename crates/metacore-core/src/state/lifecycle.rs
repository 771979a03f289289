use tracing::{debug, warn};

/// Gameplay scene phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Not in a gameplay scene
    #[default]
    Idle,
    /// Gameplay scene classified, state not yet initialized
    AwaitingInit,
    Active,
    Paused,
    /// Level finished, scene not yet torn down
    Finishing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Scene/session lifecycle tracker
///
/// ## Transition Rules
///
/// Valid transitions:
/// - any -> AwaitingInit (gameplay scene pushed; re-entry restarts the session)
/// - AwaitingInit -> Active (initialized)
/// - Active <-> Paused
/// - Active | Paused -> Finishing (level finished)
/// - AwaitingInit | Active | Paused | Finishing -> Idle (scene removed)
///
/// Everything else is rejected and leaves the phase unchanged.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    phase: Phase,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_transition(from: Phase, to: Phase) -> bool {
        matches!(
            (from, to),
            (_, Phase::AwaitingInit)
                | (Phase::AwaitingInit, Phase::Active)
                | (Phase::Active, Phase::Paused)
                | (Phase::Paused, Phase::Active)
                | (Phase::Active | Phase::Paused, Phase::Finishing)
                | (
                    Phase::AwaitingInit | Phase::Active | Phase::Paused | Phase::Finishing,
                    Phase::Idle
                )
        )
    }

    /// Move to `to` if the transition is valid; returns whether it moved
    pub fn transition(&mut self, to: Phase) -> bool {
        if !Self::is_valid_transition(self.phase, to) {
            debug!("ignoring {} -> {} transition", self.phase, to);
            return false;
        }
        if to == Phase::AwaitingInit && self.phase != Phase::Idle {
            warn!("gameplay scene started while {}, restarting session", self.phase);
        }
        self.phase = to;
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True between gameplay scene push and pop
    pub fn in_gameplay_scene(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
