use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::game::{BeatmapData, BeatmapKey};
use crate::host::{BeatmapSource, MainThread};

type DataCallback = Box<dyn FnOnce(Option<Rc<BeatmapData>>)>;

#[derive(Default)]
struct Inflight {
    queues: HashMap<String, Vec<DataCallback>>,
    loads_started: u64,
}

/// De-duplicated beatmap data loads.
///
/// Requests are keyed by `BeatmapKey::serialized_name`. While a load is in
/// flight, further requests for the same key queue behind it; when the load
/// settles every queued callback runs once, in request order, with the same
/// shared result. Clones share one queue.
#[derive(Clone, Default)]
pub struct BeatmapRequests {
    inflight: Rc<RefCell<Inflight>>,
}

impl BeatmapRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for `key`'s beatmap data, starting a load if none is
    /// in flight. Returns true if this call started the load.
    pub fn request<F>(
        &self,
        source: Rc<dyn BeatmapSource>,
        main: &MainThread,
        key: &BeatmapKey,
        callback: F,
    ) -> bool
    where
        F: FnOnce(Option<Rc<BeatmapData>>) + 'static,
    {
        let name = key.serialized_name();
        {
            let mut inflight = self.inflight.borrow_mut();
            if let Some(queue) = inflight.queues.get_mut(&name) {
                queue.push(Box::new(callback));
                trace!("queued request for {} ({} waiting)", name, queue.len());
                return false;
            }
            inflight.queues.insert(name.clone(), vec![Box::new(callback)]);
            inflight.loads_started += 1;
        }

        debug!("loading beatmap data for {}", name);
        let level_data = source.load_level_data(&key.level_id);
        let requests = self.clone();
        let scheduler = main.clone();
        let key = key.clone();
        main.await_pending(level_data, move |result| {
            let level_data = match result {
                Ok(level_data) => level_data,
                Err(e) => {
                    warn!("failed to load beatmap data for {}: {}", name, e);
                    requests.settle(&name, None);
                    return;
                }
            };
            let Some(level) = source.find_level(&key.level_id) else {
                warn!("failed to load beatmap data for {}: level not found", name);
                requests.settle(&name, None);
                return;
            };

            debug!("got level data for {}", name);
            let beatmap_data = source.load_beatmap_data(&level_data, &key, level.beats_per_minute);
            scheduler.await_pending(beatmap_data, move |data| {
                if data.is_none() {
                    warn!("no beatmap data for {}", name);
                }
                requests.settle(&name, data.map(Rc::new));
            });
        });
        true
    }

    // The queue is detached before any callback runs, so a callback that
    // requests the same key again starts a fresh load.
    fn settle(&self, name: &str, data: Option<Rc<BeatmapData>>) {
        let callbacks = self
            .inflight
            .borrow_mut()
            .queues
            .remove(name)
            .unwrap_or_default();
        trace!("settling {} callbacks for {}", callbacks.len(), name);
        for callback in callbacks {
            callback(data.clone());
        }
    }

    pub fn is_in_flight(&self, key: &BeatmapKey) -> bool {
        self.inflight
            .borrow()
            .queues
            .contains_key(&key.serialized_name())
    }

    /// Number of keys with a load in flight
    pub fn in_flight(&self) -> usize {
        self.inflight.borrow().queues.len()
    }

    /// Number of loads started since creation
    pub fn loads_started(&self) -> u64 {
        self.inflight.borrow().loads_started
    }
}
