//! In-memory host for testing
//!
//! Provides a `BeatmapSource` backed by maps, plus scripted energy and clock
//! objects, so the interception points can be driven without a game.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::game::{BeatmapData, BeatmapKey, BeatmapLevel, LevelData, Sprite};
use crate::host::{BeatmapSource, EnergyCounter, Pending, SongClock, pending};

/// Mock beatmap source
///
/// Loads complete immediately unless the source is `deferred`, in which
/// case they stay pending until `release` is called.
#[derive(Default)]
pub struct MockBeatmapSource {
    levels: HashMap<String, BeatmapLevel>,
    level_data: HashMap<String, LevelData>,
    beatmaps: HashMap<String, BeatmapData>,
    covers: HashMap<String, Sprite>,
    deferred: bool,
    held: RefCell<Vec<Box<dyn FnOnce()>>>,
    level_loads: Cell<u32>,
    beatmap_loads: Cell<u32>,
}

impl MockBeatmapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every load until `release`
    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// Register a level together with its level data
    pub fn with_level(mut self, level: BeatmapLevel) -> Self {
        self.add_level(level);
        self
    }

    pub fn with_beatmap(mut self, key: &BeatmapKey, data: BeatmapData) -> Self {
        self.add_beatmap(key, data);
        self
    }

    pub fn with_cover(mut self, level_id: &str, cover: Sprite) -> Self {
        self.covers.insert(level_id.to_string(), cover);
        self
    }

    pub fn add_level(&mut self, level: BeatmapLevel) {
        self.level_data.insert(
            level.level_id.clone(),
            LevelData {
                level_id: level.level_id.clone(),
                ..Default::default()
            },
        );
        self.levels.insert(level.level_id.clone(), level);
    }

    pub fn add_beatmap(&mut self, key: &BeatmapKey, data: BeatmapData) {
        self.beatmaps.insert(key.serialized_name(), data);
    }

    /// Complete every held load; returns how many were released
    pub fn release(&self) -> usize {
        let held = std::mem::take(&mut *self.held.borrow_mut());
        let count = held.len();
        for complete in held {
            complete();
        }
        count
    }

    pub fn level_loads(&self) -> u32 {
        self.level_loads.get()
    }

    pub fn beatmap_loads(&self) -> u32 {
        self.beatmap_loads.get()
    }

    fn respond<T: 'static>(&self, value: T) -> Pending<T> {
        if !self.deferred {
            return Pending::ready(value);
        }
        let (task, completer) = pending();
        self.held
            .borrow_mut()
            .push(Box::new(move || completer.complete(value)));
        task
    }
}

impl BeatmapSource for MockBeatmapSource {
    fn find_level(&self, level_id: &str) -> Option<BeatmapLevel> {
        self.levels.get(level_id).cloned()
    }

    fn load_level_data(&self, level_id: &str) -> Pending<Result<LevelData>> {
        self.level_loads.set(self.level_loads.get() + 1);
        let result = self
            .level_data
            .get(level_id)
            .cloned()
            .ok_or_else(|| Error::LoadFailed {
                key: level_id.to_string(),
                message: "level data not found".to_string(),
            });
        self.respond(result)
    }

    fn load_beatmap_data(
        &self,
        _level_data: &LevelData,
        key: &BeatmapKey,
        _beats_per_minute: f32,
    ) -> Pending<Option<BeatmapData>> {
        self.beatmap_loads.set(self.beatmap_loads.get() + 1);
        self.respond(self.beatmaps.get(&key.serialized_name()).cloned())
    }

    fn load_cover(&self, level: &BeatmapLevel) -> Pending<Option<Sprite>> {
        self.respond(self.covers.get(&level.level_id).cloned())
    }
}

/// Energy counter with directly settable values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MockEnergy {
    pub energy: f32,
    pub did_reach_zero: bool,
}

impl MockEnergy {
    pub fn new(energy: f32) -> Self {
        Self {
            energy,
            did_reach_zero: energy <= 0.0,
        }
    }

    /// Move energy by `delta`, latching the reached-zero flag
    pub fn change(&mut self, delta: f32) {
        self.set(self.energy + delta);
    }

    pub fn set(&mut self, energy: f32) {
        self.energy = energy.clamp(0.0, 1.0);
        if self.energy <= 0.0 {
            self.did_reach_zero = true;
        }
    }
}

impl EnergyCounter for MockEnergy {
    fn did_reach_zero(&self) -> bool {
        self.did_reach_zero
    }

    fn energy(&self) -> f32 {
        self.energy
    }
}

/// Song clock fixed at a given time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MockClock(pub f32);

impl SongClock for MockClock {
    fn song_time(&self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MainThread;

    #[test]
    fn test_missing_level_data_fails() {
        let source = MockBeatmapSource::new();
        let main = MainThread::new();
        let failed = std::rc::Rc::new(Cell::new(false));
        let flag = std::rc::Rc::clone(&failed);
        main.await_pending(source.load_level_data("nope"), move |result| {
            flag.set(matches!(result, Err(Error::LoadFailed { .. })));
        });
        main.tick(0.0);
        assert!(failed.get());
        assert_eq!(source.level_loads(), 1);
    }

    #[test]
    fn test_deferred_loads_wait_for_release() {
        let source = MockBeatmapSource::new()
            .deferred()
            .with_level(BeatmapLevel {
                level_id: "a".to_string(),
                ..Default::default()
            });
        let task = source.load_level_data("a");
        assert!(!task.is_ready());
        assert_eq!(source.release(), 1);
        assert!(task.is_ready());
    }

    #[test]
    fn test_energy_latches_zero() {
        let mut energy = MockEnergy::new(0.2);
        assert!(!energy.did_reach_zero());
        energy.change(-0.5);
        assert_eq!(energy.energy(), 0.0);
        energy.change(0.3);
        assert!(energy.did_reach_zero());
    }
}
