use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source so session logic can be driven by a manually
/// advanced clock in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests. Clones share the
/// same underlying instant, so a test can keep one handle and advance
/// time while the session owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// The closed set of delayed phase transitions a session can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    ShowMask,
    OpenResponse,
    NextRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    fire_at: Instant,
    action: TimerAction,
}

/// Tracks every delayed action scheduled during a session so the whole
/// set can be cancelled on restart without leaking orphaned callbacks.
///
/// Cooperative model: nothing fires on its own; the event loop polls
/// `due` every tick and runs whatever actions have matured. A fired
/// timer is removed before its action runs, so double-fire is
/// structurally impossible.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            fire_at: now + delay,
            action,
        });
        handle
    }

    /// No-op when the handle has already fired or been cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }

    /// Cancels every outstanding timer. Idempotent.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns the actions of all timers due at `now`, in
    /// scheduled firing order.
    pub fn due(&mut self, now: Instant) -> Vec<TimerAction> {
        self.pending.sort_by_key(|t| (t.fire_at, t.handle.0));
        let ripe = self.pending.partition_point(|t| t.fire_at <= now);
        self.pending.drain(..ripe).map(|t| t.action).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
