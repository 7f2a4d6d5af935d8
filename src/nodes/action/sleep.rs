use std::time::Duration;

use crate::{
    nodes::{NodeConfig, NodeStatus, TreeNode},
    timing::JitteredTimer,
};

/// The SleepNode waits for a jittered interval without blocking.
///
/// - The first tick after construction or `reset()` starts the timer and draws
///   the interval from the configured jitter.
///
/// - While the interval has not elapsed, this node returns SLEEPING.
///
/// - Once it has, this node returns SUCCESS and re-arms on the next tick with a
///   freshly drawn interval.
#[derive(Debug)]
pub struct SleepNode {
    name: String,
    timer: JitteredTimer,
}

impl SleepNode {
    pub fn new(base: Duration, config: &NodeConfig) -> Self {
        Self {
            name: format!("Sleep({}ms)", base.as_millis()),
            timer: JitteredTimer::new(base, config),
        }
    }

    /// Interval drawn for the current wait, if one is in progress.
    pub fn target(&self) -> Option<Duration> {
        self.timer.target()
    }
}

impl TreeNode for SleepNode {
    fn tick(&mut self) -> NodeStatus {
        if self.timer.poll() {
            self.timer.disarm();
            NodeStatus::Success
        } else {
            NodeStatus::Sleeping
        }
    }

    fn reset(&mut self) {
        self.timer.disarm();
    }

    fn name(&self) -> &str {
        &self.name
    }
}
