use std::collections::BTreeSet;

use tracing::debug;

/// Camera fade requested through the fade interception points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraFade {
    pub faded_out: bool,
    pub duration: f32,
}

/// Requester-keyed switches for host behaviour.
///
/// Each switch is active while at least one requester holds it, so
/// independent modules can toggle them without clobbering each other.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    score_submission: BTreeSet<String>,
    haptics: BTreeSet<String>,
    camera_fade: BTreeSet<String>,
    last_fade: CameraFade,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable_score_submission(&mut self, requester: &str, disable: bool) {
        toggle(&mut self.score_submission, requester, disable);
        debug!(
            "score submission {} by {}",
            if disable { "disabled" } else { "re-enabled" },
            requester
        );
    }

    pub fn is_score_submission_disabled(&self) -> bool {
        !self.score_submission.is_empty()
    }

    pub fn score_submission_blockers(&self) -> impl Iterator<Item = &str> {
        self.score_submission.iter().map(String::as_str)
    }

    pub fn disable_haptics(&mut self, requester: &str, disable: bool) {
        toggle(&mut self.haptics, requester, disable);
    }

    pub fn is_haptics_disabled(&self) -> bool {
        !self.haptics.is_empty()
    }

    /// Request the camera fade out (or release a request to fade in)
    pub fn set_camera_fade_out(&mut self, requester: &str, fade_out: bool, duration: f32) {
        toggle(&mut self.camera_fade, requester, fade_out);
        let faded_out = !self.camera_fade.is_empty();
        if faded_out != self.last_fade.faded_out {
            debug!(
                "camera fading {} over {:.2}s",
                if faded_out { "out" } else { "in" },
                duration
            );
        }
        self.last_fade = CameraFade {
            faded_out,
            duration,
        };
    }

    pub fn camera_fade(&self) -> CameraFade {
        self.last_fade
    }
}

fn toggle(set: &mut BTreeSet<String>, requester: &str, on: bool) {
    if on {
        set.insert(requester.to_string());
    } else {
        set.remove(requester);
    }
}
