//! Engine-level handlers: input, haptics, camera fades, object lifetime.

use std::backtrace::Backtrace;

use tracing::{error, trace};

use super::{HookPoint, MetaCore, enter};
use crate::config::policy::BASE_GAME_ID;
use crate::host::{InstanceId, TimerId};
use crate::input::{Controller, InputSource};

impl MetaCore {
    /// Per-frame controller update; broadcasts button press, hold and
    /// release events
    pub fn input_update<S>(&mut self, source: &S, original: impl FnOnce())
    where
        S: InputSource + ?Sized,
    {
        enter(HookPoint::InputUpdate);
        original();
        for event in self.input.poll(source) {
            self.bus.broadcast(event);
        }
    }

    pub fn haptic_pulse(
        &mut self,
        controller: Controller,
        duration: f32,
        strength: f32,
        frequency: f32,
        original: impl FnOnce(Controller, f32, f32, f32),
    ) {
        enter(HookPoint::HapticPulse);
        if self.policy.is_haptics_disabled() {
            trace!("suppressed haptic pulse on {:?}", controller);
            return;
        }
        original(controller, duration, strength, frequency);
    }

    pub fn haptic_feedback(
        &mut self,
        controller: Controller,
        preset: &str,
        original: impl FnOnce(Controller, &str),
    ) {
        enter(HookPoint::HapticFeedback);
        if self.policy.is_haptics_disabled() {
            trace!("suppressed haptic preset {} on {:?}", preset, controller);
            return;
        }
        original(controller, preset);
    }

    /// Replacement for the host's fade in.
    ///
    /// `finished` runs immediately for a zero duration, otherwise once the
    /// fade and its start delay have elapsed, unless `owner` is destroyed
    /// first. Returns the scheduled timer, if any.
    pub fn fade_in<F>(
        &mut self,
        owner: InstanceId,
        duration: f32,
        start_delay: f32,
        finished: Option<F>,
    ) -> Option<TimerId>
    where
        F: FnOnce() + 'static,
    {
        enter(HookPoint::FadeIn);
        self.policy.set_camera_fade_out(BASE_GAME_ID, false, duration);
        self.schedule_fade_callback(owner, duration, duration + start_delay, finished)
    }

    /// Replacement for the host's fade out
    pub fn fade_out<F>(&mut self, owner: InstanceId, duration: f32, finished: Option<F>) -> Option<TimerId>
    where
        F: FnOnce() + 'static,
    {
        enter(HookPoint::FadeOut);
        self.policy.set_camera_fade_out(BASE_GAME_ID, true, duration);
        self.schedule_fade_callback(owner, duration, duration, finished)
    }

    /// An engine object is about to be reclaimed.
    ///
    /// Its destroy callbacks run and its scheduled tasks are dropped before
    /// the original frees it.
    pub fn object_destroyed(&mut self, id: InstanceId, original: impl FnOnce(InstanceId)) {
        enter(HookPoint::ObjectDestroyed);
        let fired = self.signals.destroy(id);
        let cancelled = self.main_thread.cancel_owned(id);
        if fired > 0 || cancelled > 0 {
            trace!(
                "object {} destroyed: {} callbacks, {} timers cancelled",
                id, fired, cancelled
            );
        }
        original(id);
    }

    /// Process abort; logs a backtrace and lets the abort proceed
    pub fn abort<R>(&self, original: impl FnOnce() -> R) -> R {
        enter(HookPoint::Abort);
        error!("abort called\n{}", Backtrace::force_capture());
        original()
    }

    fn schedule_fade_callback<F>(
        &mut self,
        owner: InstanceId,
        duration: f32,
        delay: f32,
        finished: Option<F>,
    ) -> Option<TimerId>
    where
        F: FnOnce() + 'static,
    {
        let finished = finished?;
        if duration == 0.0 {
            finished();
            return None;
        }
        Some(self.main_thread.after(delay, Some(owner), finished))
    }
}
