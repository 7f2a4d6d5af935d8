//! Jittered waiting, shared by every timer-driven node.
//!
//! A wait of `base` is stretched or shrunk by a normally distributed factor so
//! that many trees started together do not act in lockstep:
//!
//! ```text
//! target = base * max(0.1, 1 + gaussian() * spread)
//! ```

use std::{rc::Rc, time::Duration};

use crate::{clock::Clock, nodes::NodeConfig, random::RandomSource};

/// Spread used when a `NodeConfig` doesn't set one.
pub const DEFAULT_JITTER_SPREAD: f64 = 0.33;

/// Lower bound on the jitter factor. A wait never shrinks below 10% of its base.
pub const MIN_JITTER_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    base: Duration,
    spread: f64,
}

impl Jitter {
    pub fn new(base: Duration, spread: f64) -> Self {
        Self { base, spread }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Draws a fresh target duration.
    pub fn sample(&self, random: &RandomSource) -> Duration {
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return self.base;
        }

        let factor = (1.0 + random.gaussian() * self.spread).max(MIN_JITTER_FACTOR);

        Duration::try_from_secs_f64(self.base.as_secs_f64() * factor).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    started: Duration,
    target: Duration,
}

/// Re-armable timer with a jittered target.
///
/// The first `poll()` after construction or `disarm()` records the start time
/// and draws a target; later polls report whether that target has elapsed.
#[derive(Debug)]
pub struct JitteredTimer {
    jitter: Jitter,
    clock: Rc<dyn Clock>,
    random: RandomSource,
    armed: Option<Armed>,
}

impl JitteredTimer {
    pub fn new(base: Duration, config: &NodeConfig) -> Self {
        Self {
            jitter: Jitter::new(base, config.jitter_spread()),
            clock: config.clock(),
            random: config.random(),
            armed: None,
        }
    }

    /// Arms the timer if needed and returns `true` once the target has elapsed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let armed = *self.armed.get_or_insert_with(|| Armed {
            started: now,
            target: self.jitter.sample(&self.random),
        });

        now.saturating_sub(armed.started) >= armed.target
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Target of the current arming, if armed.
    pub fn target(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.target)
    }

    pub fn base(&self) -> Duration {
        self.jitter.base()
    }
}
