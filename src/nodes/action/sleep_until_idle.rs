use std::{rc::Rc, time::Duration};

use crate::{
    clock::Clock,
    nodes::{NodeConfig, NodeStatus, TreeNode},
};

/// The SleepUntilIdleNode waits until an "idle" predicate has held without
/// interruption for `idle_for`.
///
/// Any tick on which the predicate is false restarts the idle streak. If the
/// optional bypass predicate holds, the node succeeds immediately. Once
/// `timeout` has passed since the first tick of the activation, the node
/// fails. While waiting it returns SLEEPING.
pub struct SleepUntilIdleNode {
    name: String,
    is_idle: Box<dyn FnMut() -> bool>,
    bypass: Option<Box<dyn FnMut() -> bool>>,
    idle_for: Duration,
    timeout: Duration,
    clock: Rc<dyn Clock>,
    started: Option<Duration>,
    idle_since: Option<Duration>,
}

impl SleepUntilIdleNode {
    pub fn new(
        is_idle: impl FnMut() -> bool + 'static,
        idle_for: Duration,
        timeout: Duration,
        config: &NodeConfig,
    ) -> Self {
        Self {
            name: format!(
                "SleepUntilIdle({}ms, timeout={}ms)",
                idle_for.as_millis(),
                timeout.as_millis()
            ),
            is_idle: Box::new(is_idle),
            bypass: None,
            idle_for,
            timeout,
            clock: config.clock(),
            started: None,
            idle_since: None,
        }
    }

    pub fn with_bypass(mut self, bypass: impl FnMut() -> bool + 'static) -> Self {
        self.bypass = Some(Box::new(bypass));
        self
    }

    fn finish(&mut self, status: NodeStatus) -> NodeStatus {
        self.reset();
        status
    }
}

impl TreeNode for SleepUntilIdleNode {
    fn tick(&mut self) -> NodeStatus {
        if self.bypass.as_mut().is_some_and(|bypass| bypass()) {
            return self.finish(NodeStatus::Success);
        }

        let now = self.clock.now();
        let started = *self.started.get_or_insert(now);

        if now.saturating_sub(started) > self.timeout {
            ::log::debug!("[reactive_bt]: {} timed out", self.name);
            return self.finish(NodeStatus::Failure);
        }

        if (self.is_idle)() {
            let idle_since = *self.idle_since.get_or_insert(now);
            if now.saturating_sub(idle_since) >= self.idle_for {
                return self.finish(NodeStatus::Success);
            }
        } else {
            self.idle_since = None;
        }

        NodeStatus::Sleeping
    }

    fn reset(&mut self) {
        self.started = None;
        self.idle_since = None;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for SleepUntilIdleNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SleepUntilIdleNode")
            .field("name", &self.name)
            .field("started", &self.started)
            .field("idle_since", &self.idle_since)
            .finish_non_exhaustive()
    }
}
