//! Interception handlers.
//!
//! Every handler is a method on `MetaCore` receiving the intercepted call's
//! arguments and the host's original implementation as a closure. Each one
//! calls through to the original exactly once (unless the operation is
//! suppressed by policy), before or after its own work, and never fails:
//! a call that arrives in an unexpected phase is a logged no-op.
//!
//! Handlers are grouped by host area:
//! - `scenes` - scene transitions, song start/update, pause, level end
//! - `gameplay` - scoring, cuts, misses, swing ratings, walls, energy
//! - `menus` - selection tracking and score submission
//! - `engine` - input, haptics, camera fades, object destruction, abort

mod engine;
mod gameplay;
mod menus;
mod point;
mod scenes;

pub use point::*;

use std::rc::Rc;

use tracing::{trace, warn};

use crate::config::Config;
use crate::event::{Emitter, Event, EventBus, EventData, EventKind};
use crate::game::{BeatmapData, BeatmapKey, BeatmapLevel, Policy, Sprite};
use crate::host::{BeatmapSource, InstanceId, MainThread, ObjectSignals};
use crate::input::InputPoller;
use crate::songs::{BeatmapRequests, get_song_cover};
use crate::state::{
    LifecycleTracker, Phase, SelectionState, SessionState, SessionSummary, Shared, SlowTaskId,
    SlowTasks,
};

/// Owned engine context.
///
/// Holds everything the interception handlers read and write. Consumers
/// subscribe to the bus and read state through the `Shared` handles.
pub struct MetaCore {
    pub(crate) config: Config,
    pub(crate) bus: EventBus,
    pub(crate) session: Shared<SessionState>,
    pub(crate) selection: Shared<SelectionState>,
    pub(crate) lifecycle: LifecycleTracker,
    pub(crate) input: InputPoller,
    pub(crate) signals: ObjectSignals,
    pub(crate) main_thread: MainThread,
    pub(crate) requests: BeatmapRequests,
    pub(crate) policy: Policy,
    pub(crate) slow_tasks: SlowTasks,
    pub(crate) last_summary: Option<SessionSummary>,
    pub(crate) source: Option<Rc<dyn BeatmapSource>>,
}

impl Default for MetaCore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MetaCore {
    pub fn new(config: Config) -> Self {
        let main_thread = MainThread::with_poll_limit(config.pending_poll_limit);
        Self {
            config,
            bus: EventBus::new(),
            session: Shared::default(),
            selection: Shared::default(),
            lifecycle: LifecycleTracker::new(),
            input: InputPoller::new(),
            signals: ObjectSignals::new(),
            main_thread,
            requests: BeatmapRequests::new(),
            policy: Policy::new(),
            slow_tasks: SlowTasks::new(),
            last_summary: None,
            source: None,
        }
    }

    /// Attach the host's level and asset loader
    pub fn with_source(mut self, source: Rc<dyn BeatmapSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn set_source(&mut self, source: Rc<dyn BeatmapSource>) {
        self.source = Some(source);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read handle onto the current session
    pub fn session(&self) -> Shared<SessionState> {
        self.session.clone()
    }

    pub fn selection(&self) -> Shared<SelectionState> {
        self.selection.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// True between a gameplay scene being pushed and popped
    pub fn in_gameplay_scene(&self) -> bool {
        self.lifecycle.in_gameplay_scene()
    }

    /// Summary of the most recently finished level
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }

    pub fn main_thread(&self) -> &MainThread {
        &self.main_thread
    }

    pub fn signals_mut(&mut self) -> &mut ObjectSignals {
        &mut self.signals
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.bus.subscribe(kind, listener);
    }

    pub fn subscribe_with_emitter<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&Event, &mut Emitter) + 'static,
    {
        self.bus.subscribe_with_emitter(kind, listener);
    }

    pub fn broadcast(&mut self, event: impl Into<Event>) {
        self.bus.broadcast(event);
    }

    /// Register a named event for another module
    pub fn register_event(&mut self, mod_id: &str, name: &str) -> EventKind {
        self.bus.register_event(mod_id, name)
    }

    /// Broadcast a registered event with an integer payload
    pub fn broadcast_custom(&mut self, kind: EventKind, value: i64) {
        self.bus.broadcast(Event::with_data(kind, EventData::Int(value)));
    }

    /// Run `task` every `interval` song seconds while a level is playing
    pub fn register_slow_task<F>(&mut self, interval: f32, task: F) -> SlowTaskId
    where
        F: FnMut(&SessionState) + 'static,
    {
        self.slow_tasks.register(interval, task)
    }

    /// Run `callback` right before the object is destroyed
    pub fn on_destroy<F>(&mut self, id: InstanceId, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.signals.on_destroy(id, callback);
    }

    /// Load beatmap data for `key`; identical requests in flight share one load.
    ///
    /// `callback` runs once on the main thread, with `None` on failure.
    pub fn get_beatmap_data<F>(&mut self, key: &BeatmapKey, callback: F)
    where
        F: FnOnce(Option<Rc<BeatmapData>>) + 'static,
    {
        let Some(source) = self.source.clone() else {
            warn!("no beatmap source attached, cannot load {}", key.serialized_name());
            callback(None);
            return;
        };
        self.requests.request(source, &self.main_thread, key, callback);
    }

    pub fn get_song_cover<F>(&mut self, level: &BeatmapLevel, callback: F)
    where
        F: FnOnce(Option<Sprite>) + 'static,
    {
        let Some(source) = self.source.as_deref() else {
            warn!("no beatmap source attached, cannot load cover for {}", level.level_id);
            callback(None);
            return;
        };
        get_song_cover(source, &self.main_thread, level, callback);
    }

    pub fn requests(&self) -> &BeatmapRequests {
        &self.requests
    }

    /// Advance the main-thread scheduler by one frame
    pub fn tick(&mut self, dt: f32) {
        self.main_thread.tick(dt);
    }

    fn emit(&mut self, kind: EventKind) {
        self.bus.broadcast(kind);
    }

    fn emit_all(&mut self, kinds: &[EventKind]) {
        for kind in kinds {
            self.bus.broadcast(*kind);
        }
    }
}

fn enter(point: HookPoint) {
    trace!("{}", point);
}
