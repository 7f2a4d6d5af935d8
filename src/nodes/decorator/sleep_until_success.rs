use std::time::Duration;

use crate::{
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeConfig, NodeStatus, TreeNode},
    timing::JitteredTimer,
};

/// The SleepUntilSuccessNode keeps ticking its child until it succeeds,
/// within a jittered maximum wait.
///
/// - If the child returns SUCCESS, this node resets and returns SUCCESS.
///
/// - If the child returns FAILURE, the child is reset so that it is tried
///   again on the next tick.
///
/// - Once the wait has exceeded its target without a success, this node
///   resets and returns FAILURE.
///
/// While waiting it returns RUNNING if the child is RUNNING, and SLEEPING
/// otherwise.
pub struct SleepUntilSuccessNode {
    name: String,
    child: Option<BoxedNode>,
    timer: JitteredTimer,
}

impl SleepUntilSuccessNode {
    pub fn new(max_wait: Duration, config: &NodeConfig) -> Self {
        Self {
            name: format!("SleepUntilSuccess({}ms)", max_wait.as_millis()),
            child: None,
            timer: JitteredTimer::new(max_wait, config),
        }
    }

    pub fn with_child(mut self, child: BoxedNode) -> Self {
        self.child = Some(child);
        self
    }

    pub fn target(&self) -> Option<Duration> {
        self.timer.target()
    }
}

impl TreeNode for SleepUntilSuccessNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(child) = self.child.as_mut() else {
            return NodeStatus::Failure;
        };

        let expired = self.timer.poll();
        let child_status = child.tick();

        if child_status == NodeStatus::Success {
            self.reset();
            return NodeStatus::Success;
        }

        if child_status == NodeStatus::Failure {
            child.reset();
        }

        if expired {
            ::log::debug!("[reactive_bt]: {} timed out", self.name);
            self.reset();
            return NodeStatus::Failure;
        }

        match child_status {
            NodeStatus::Running => NodeStatus::Running,
            _ => NodeStatus::Sleeping,
        }
    }

    fn reset(&mut self) {
        self.timer.disarm();
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl_decorator_node!(SleepUntilSuccessNode);
