use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::event::{Event, EventData, EventKind};

/// Upper bound on events delivered by a single top-level broadcast,
/// including everything listeners emit while it is being delivered.
const MAX_CASCADE: usize = 1024;

type Callback = Box<dyn FnMut(&Event, &mut Emitter)>;

enum Filter {
    All,
    Kind(EventKind),
    Exact(EventKind, EventData),
}

impl Filter {
    fn matches(&self, event: &Event) -> bool {
        match self {
            Filter::All => true,
            Filter::Kind(kind) => *kind == event.kind,
            Filter::Exact(kind, data) => *kind == event.kind && *data == event.data,
        }
    }
}

struct Listener {
    filter: Filter,
    callback: Callback,
}

/// Collects events emitted by a listener while a broadcast is in progress.
///
/// They are delivered after the current event has reached every listener,
/// in the order they were emitted.
#[derive(Debug, Default)]
pub struct Emitter {
    pending: Vec<Event>,
}

impl Emitter {
    pub fn emit(&mut self, event: impl Into<Event>) {
        self.pending.push(event.into());
    }
}

/// Synchronous publish/subscribe broadcaster.
///
/// Listeners run on the broadcasting thread in registration order.
/// Registration is append-only.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    queue: VecDeque<Event>,
    custom: Vec<(String, String)>,
    delivered: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for every event of `kind`
    pub fn subscribe<F>(&mut self, kind: EventKind, mut listener: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.push(Filter::Kind(kind), Box::new(move |event, _| listener(event)));
    }

    /// Listen for events of `kind` carrying exactly `data`
    /// (for example a single button's press events)
    pub fn subscribe_data<F>(&mut self, kind: EventKind, data: EventData, mut listener: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.push(
            Filter::Exact(kind, data),
            Box::new(move |event, _| listener(event)),
        );
    }

    pub fn subscribe_all<F>(&mut self, mut listener: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.push(Filter::All, Box::new(move |event, _| listener(event)));
    }

    /// Listen for `kind` with the ability to emit follow-up events
    pub fn subscribe_with_emitter<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&Event, &mut Emitter) + 'static,
    {
        self.push(Filter::Kind(kind), Box::new(listener));
    }

    fn push(&mut self, filter: Filter, callback: Callback) {
        self.listeners.push(Listener { filter, callback });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total events delivered since creation
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Deliver `event` and everything emitted while delivering it.
    ///
    /// Follow-up events are delivered breadth-first: an event emitted by a
    /// listener is queued behind any events already waiting.
    pub fn broadcast(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());

        let mut budget = MAX_CASCADE;
        while let Some(event) = self.queue.pop_front() {
            if budget == 0 {
                warn!(
                    "dropping {} cascaded events after {}",
                    self.queue.len() + 1,
                    event.kind
                );
                self.queue.clear();
                break;
            }
            budget -= 1;

            trace!("broadcast {}", event.kind);
            let mut emitter = Emitter::default();
            for listener in self.listeners.iter_mut() {
                if listener.filter.matches(&event) {
                    (listener.callback)(&event, &mut emitter);
                }
            }
            self.delivered += 1;
            self.queue.extend(emitter.pending);
        }
    }

    /// Register a named event owned by `mod_id`.
    ///
    /// Registering the same pair twice returns the same kind.
    pub fn register_event(&mut self, mod_id: &str, name: &str) -> EventKind {
        if let Some(kind) = self.find_event(mod_id, name) {
            return kind;
        }
        self.custom.push((mod_id.to_string(), name.to_string()));
        EventKind::Custom((self.custom.len() - 1) as u32)
    }

    pub fn find_event(&self, mod_id: &str, name: &str) -> Option<EventKind> {
        self.custom
            .iter()
            .position(|(m, n)| m == mod_id && n == name)
            .map(|index| EventKind::Custom(index as u32))
    }

    /// Resolve a built-in name or a registered `mod_id::name` pair
    pub fn resolve(&self, name: &str) -> Result<EventKind> {
        if let Some(kind) = EventKind::from_name(name) {
            return Ok(kind);
        }
        name.split_once("::")
            .and_then(|(mod_id, event)| self.find_event(mod_id, event))
            .ok_or_else(|| Error::UnknownEvent(name.to_string()))
    }

    pub fn event_name(&self, kind: EventKind) -> String {
        match kind {
            EventKind::Custom(id) => self
                .custom
                .get(id as usize)
                .map(|(mod_id, name)| format!("{}::{}", mod_id, name))
                .unwrap_or_else(|| kind.to_string()),
            _ => kind.static_name().to_string(),
        }
    }
}
