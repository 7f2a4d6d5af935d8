use crate::{
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeStatus, TreeNode},
};

/// The RetryNode is used to execute a child several times if it fails.
///
/// If the child returns SUCCESS, the loop is stopped and this node
/// returns SUCCESS.
///
/// If the child returns FAILURE, this node will try again, resetting the
/// child and returning RUNNING in the meantime, up to `max_attempts`
/// attempts in total. After the last failed attempt it returns FAILURE.
///
/// `max_attempts <= 0` retries forever.
pub struct RetryNode {
    child: Option<BoxedNode>,
    max_attempts: i32,
    try_count: i32,
}

impl RetryNode {
    pub fn new(max_attempts: i32) -> Self {
        Self {
            child: None,
            max_attempts,
            try_count: 0,
        }
    }

    pub fn forever() -> Self {
        Self::new(-1)
    }

    pub fn with_child(mut self, child: BoxedNode) -> Self {
        self.child = Some(child);
        self
    }

    /// Failed attempts in the current activation.
    pub fn try_count(&self) -> i32 {
        self.try_count
    }

    fn reset_child(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }
}

impl TreeNode for RetryNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(child) = self.child.as_mut() else {
            return NodeStatus::Failure;
        };

        match child.tick() {
            NodeStatus::Success => {
                self.reset();
                NodeStatus::Success
            }
            NodeStatus::Failure => {
                self.try_count += 1;
                if self.max_attempts > 0 && self.try_count >= self.max_attempts {
                    ::log::debug!(
                        "[reactive_bt]: Retry gave up after {} attempts",
                        self.try_count
                    );
                    self.reset();
                    NodeStatus::Failure
                } else {
                    self.reset_child();
                    NodeStatus::Running
                }
            }
            pending => pending,
        }
    }

    fn reset(&mut self) {
        self.try_count = 0;
        self.reset_child();
    }

    fn name(&self) -> &str {
        "Retry"
    }
}

impl_decorator_node!(RetryNode);
