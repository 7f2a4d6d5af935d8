use std::time::Duration;

use crate::{
    nodes::{NodeConfig, NodeStatus, TreeNode},
    timing::JitteredTimer,
};

/// The SleepUntilNode waits for a predicate to hold, giving up after a
/// jittered maximum wait.
///
/// - If the predicate holds, this node returns SUCCESS.
///
/// - If the wait has exceeded its target, this node returns FAILURE.
///
/// - Otherwise it returns SLEEPING.
///
/// Both terminal results clear the timer so the next activation starts a new wait.
pub struct SleepUntilNode {
    name: String,
    predicate: Box<dyn FnMut() -> bool>,
    timer: JitteredTimer,
}

impl SleepUntilNode {
    pub fn new(
        predicate: impl FnMut() -> bool + 'static,
        max_wait: Duration,
        config: &NodeConfig,
    ) -> Self {
        Self {
            name: format!("SleepUntil({}ms)", max_wait.as_millis()),
            predicate: Box::new(predicate),
            timer: JitteredTimer::new(max_wait, config),
        }
    }

    pub fn target(&self) -> Option<Duration> {
        self.timer.target()
    }
}

impl TreeNode for SleepUntilNode {
    fn tick(&mut self) -> NodeStatus {
        let expired = self.timer.poll();

        if (self.predicate)() {
            self.timer.disarm();
            NodeStatus::Success
        } else if expired {
            ::log::debug!("[reactive_bt]: {} timed out", self.name);
            self.timer.disarm();
            NodeStatus::Failure
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

impl std::fmt::Debug for SleepUntilNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SleepUntilNode")
            .field("name", &self.name)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
