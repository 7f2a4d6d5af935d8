//! Monotonic time sources for timer-driven nodes.
//!
//! Every node that waits (`SleepNode`, `SleepUntilNode`, `CooldownNode`, ...)
//! measures time through a [`Clock`] taken from its `NodeConfig`, so tests can
//! drive time by hand with a [`ManualClock`].

use std::{cell::Cell, fmt::Debug, rc::Rc, time::Duration, time::Instant};

/// Source of monotonic time, measured from an arbitrary fixed origin.
pub trait Clock: Debug {
    /// Time elapsed since the clock's origin. Never decreases.
    fn now(&self) -> Duration;
}

/// Production clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// test can keep one handle and hand another to the tree.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Jumps to `now`. Earlier values are ignored to keep the clock monotonic.
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
