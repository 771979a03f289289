use tracing::trace;

use crate::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlowTaskId(u32);

struct SlowTask {
    id: SlowTaskId,
    interval: f32,
    next_due: f32,
    run: Box<dyn FnMut(&SessionState)>,
}

/// Low-frequency work driven by the song clock.
///
/// A task first runs on the first update of a session, then whenever at
/// least `interval` song seconds have passed since its last run.
#[derive(Default)]
pub struct SlowTasks {
    tasks: Vec<SlowTask>,
    next_id: u32,
}

impl SlowTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, interval: f32, task: F) -> SlowTaskId
    where
        F: FnMut(&SessionState) + 'static,
    {
        let id = SlowTaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(SlowTask {
            id,
            interval: interval.max(0.0),
            next_due: 0.0,
            run: Box::new(task),
        });
        id
    }

    pub fn unregister(&mut self, id: SlowTaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Make every task due again, for a new session
    pub fn reset(&mut self) {
        for task in &mut self.tasks {
            task.next_due = 0.0;
        }
    }

    /// Run the tasks due at `song_time`; returns how many ran
    pub fn run_due(&mut self, song_time: f32, state: &SessionState) -> usize {
        let mut ran = 0;
        for task in self.tasks.iter_mut().filter(|task| song_time >= task.next_due) {
            trace!("slow task {:?} at {:.2}s", task.id, song_time);
            (task.run)(state);
            task.next_due = song_time + task.interval;
            ran += 1;
        }
        ran
    }
}
