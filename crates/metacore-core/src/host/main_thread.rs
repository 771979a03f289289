use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::config::scheduler::PENDING_POLL_LIMIT;
use crate::host::InstanceId;

/// Result slot of an asynchronous host operation
pub struct Pending<T> {
    slot: Rc<RefCell<Option<T>>>,
}

/// Write side of a `Pending` slot, held by whoever performs the operation
pub struct Completer<T> {
    slot: Rc<RefCell<Option<T>>>,
}

/// Create an empty slot and its completer
pub fn pending<T>() -> (Pending<T>, Completer<T>) {
    let slot = Rc::new(RefCell::new(None));
    (
        Pending {
            slot: Rc::clone(&slot),
        },
        Completer { slot },
    )
}

impl<T> Pending<T> {
    /// A slot that is already complete
    pub fn ready(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value))),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.borrow().is_some()
    }

    fn take(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }
}

impl<T> Completer<T> {
    pub fn complete(self, value: T) {
        *self.slot.borrow_mut() = Some(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    due: f64,
    owner: Option<InstanceId>,
    task: Box<dyn FnOnce()>,
}

type Continuation = Box<dyn FnMut() -> bool>;

#[derive(Default)]
struct Queue {
    now: f64,
    next_timer: u64,
    timers: Vec<Timer>,
    awaiting: Vec<Continuation>,
}

/// Cooperative scheduler running on the host's main thread.
///
/// Nothing here runs in parallel: awaiting registers a continuation that a
/// later `tick` runs once its slot is filled. Clones share one queue.
#[derive(Clone)]
pub struct MainThread {
    queue: Rc<RefCell<Queue>>,
    poll_limit: usize,
}

impl Default for MainThread {
    fn default() -> Self {
        Self::new()
    }
}

impl MainThread {
    pub fn new() -> Self {
        Self::with_poll_limit(PENDING_POLL_LIMIT)
    }

    pub fn with_poll_limit(poll_limit: usize) -> Self {
        Self {
            queue: Rc::new(RefCell::new(Queue::default())),
            poll_limit: poll_limit.max(1),
        }
    }

    /// Seconds elapsed across all ticks
    pub fn now(&self) -> f64 {
        self.queue.borrow().now
    }

    /// Run `continuation` with the slot's value once it is filled
    pub fn await_pending<T, F>(&self, task: Pending<T>, continuation: F)
    where
        T: 'static,
        F: FnOnce(T) + 'static,
    {
        let mut continuation = Some(continuation);
        self.queue
            .borrow_mut()
            .awaiting
            .push(Box::new(move || match task.take() {
                Some(value) => {
                    if let Some(continuation) = continuation.take() {
                        continuation(value);
                    }
                    true
                }
                None => false,
            }));
    }

    /// Run `task` once `delay` seconds have elapsed.
    ///
    /// Timers with an owner are dropped by `cancel_owned` when that object
    /// is destroyed.
    pub fn after<F>(&self, delay: f32, owner: Option<InstanceId>, task: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_timer);
        queue.next_timer += 1;
        let due = queue.now + f64::from(delay.max(0.0));
        queue.timers.push(Timer {
            id,
            due,
            owner,
            task: Box::new(task),
        });
        id
    }

    pub fn cancel(&self, id: TimerId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.timers.len();
        queue.timers.retain(|timer| timer.id != id);
        queue.timers.len() != before
    }

    /// Drop every timer owned by `owner`; returns how many were dropped
    pub fn cancel_owned(&self, owner: InstanceId) -> usize {
        let mut queue = self.queue.borrow_mut();
        let before = queue.timers.len();
        queue.timers.retain(|timer| timer.owner != Some(owner));
        let cancelled = before - queue.timers.len();
        if cancelled > 0 {
            trace!("cancelled {} timers owned by {}", cancelled, owner);
        }
        cancelled
    }

    pub fn timer_count(&self) -> usize {
        self.queue.borrow().timers.len()
    }

    pub fn awaiting_count(&self) -> usize {
        self.queue.borrow().awaiting.len()
    }

    /// Advance time by `dt` seconds, run due timers in deadline order,
    /// then run every continuation whose slot is filled.
    pub fn tick(&self, dt: f32) {
        self.queue.borrow_mut().now += f64::from(dt.max(0.0));

        while let Some(timer) = self.pop_due_timer() {
            (timer.task)();
        }
        self.poll_awaiting();
    }

    fn pop_due_timer(&self) -> Option<Timer> {
        let mut queue = self.queue.borrow_mut();
        let now = queue.now;
        let index = queue
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(index, _)| index)?;
        Some(queue.timers.remove(index))
    }

    // Continuations may await again; those registered during a pass whose
    // slot is already filled run in a following pass of the same tick.
    fn poll_awaiting(&self) {
        for _ in 0..self.poll_limit {
            let waiting = std::mem::take(&mut self.queue.borrow_mut().awaiting);
            if waiting.is_empty() {
                return;
            }

            let mut progressed = false;
            let mut still_waiting = Vec::with_capacity(waiting.len());
            for mut continuation in waiting {
                if continuation() {
                    progressed = true;
                } else {
                    still_waiting.push(continuation);
                }
            }

            let mut queue = self.queue.borrow_mut();
            let registered = std::mem::replace(&mut queue.awaiting, still_waiting);
            queue.awaiting.extend(registered);

            if !progressed {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_continuation_waits_for_completion() {
        let main = MainThread::new();
        let seen = Rc::new(RefCell::new(None));
        let (task, completer) = pending::<u32>();

        let sink = Rc::clone(&seen);
        main.await_pending(task, move |value| *sink.borrow_mut() = Some(value));

        main.tick(0.016);
        assert_eq!(*seen.borrow(), None);
        assert_eq!(main.awaiting_count(), 1);

        completer.complete(7);
        assert_eq!(*seen.borrow(), None);

        main.tick(0.016);
        assert_eq!(*seen.borrow(), Some(7));
        assert_eq!(main.awaiting_count(), 0);
    }

    #[test]
    fn test_ready_slot_runs_on_next_tick_not_inline() {
        let main = MainThread::new();
        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        main.await_pending(Pending::ready(()), move |_| *flag.borrow_mut() = true);

        assert!(!*ran.borrow());
        main.tick(0.0);
        assert!(*ran.borrow());
    }

    #[test]
    fn test_chained_await_completes_in_same_tick() {
        let main = MainThread::new();
        let order = log();

        let inner_main = main.clone();
        let outer_log = Rc::clone(&order);
        main.await_pending(Pending::ready(1), move |_: i32| {
            outer_log.borrow_mut().push("first");
            let inner_log = Rc::clone(&outer_log);
            inner_main.await_pending(Pending::ready(2), move |_: i32| {
                inner_log.borrow_mut().push("second");
            });
        });

        main.tick(0.0);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let main = MainThread::new();
        let order = log();

        for (delay, name) in [(0.5, "late"), (0.1, "early"), (0.1, "early-second")] {
            let sink = Rc::clone(&order);
            main.after(delay, None, move || sink.borrow_mut().push(name));
        }

        main.tick(0.2);
        assert_eq!(*order.borrow(), vec!["early", "early-second"]);

        main.tick(0.4);
        assert_eq!(*order.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(main.timer_count(), 0);
    }

    #[test]
    fn test_cancel_owned_timers() {
        let main = MainThread::new();
        let order = log();

        let a = Rc::clone(&order);
        main.after(1.0, Some(10), move || a.borrow_mut().push("owned"));
        let b = Rc::clone(&order);
        main.after(1.0, Some(11), move || b.borrow_mut().push("other"));

        assert_eq!(main.cancel_owned(10), 1);
        main.tick(2.0);
        assert_eq!(*order.borrow(), vec!["other"]);
    }

    #[test]
    fn test_cancel_single_timer() {
        let main = MainThread::new();
        let id = main.after(1.0, None, || panic!("cancelled timer ran"));
        assert!(main.cancel(id));
        assert!(!main.cancel(id));
        main.tick(5.0);
    }

    #[test]
    fn test_never_completed_slot_never_runs() {
        let main = MainThread::new();
        let (task, completer) = pending::<u8>();
        main.await_pending(task, |_| panic!("should not run"));
        drop(completer);

        for _ in 0..10 {
            main.tick(1.0);
        }
        assert_eq!(main.awaiting_count(), 1);
    }
}
