use crate::{
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeStatus, TreeNode},
};

/// The RepeatNode is used to execute a child several times, as long
/// as it succeeds.
///
/// To succeed, the child must return SUCCESS `max_repeats` times. Between
/// repetitions the child is reset and this node returns RUNNING.
///
/// If the child returns FAILURE, the loop is stopped and this node
/// returns FAILURE.
///
/// A negative `max_repeats` repeats forever: the child is ticked once per tick
/// and this node never completes.
pub struct RepeatNode {
    child: Option<BoxedNode>,
    max_repeats: i32,
    repeat_count: i32,
}

impl RepeatNode {
    pub fn new(max_repeats: i32) -> Self {
        Self {
            child: None,
            max_repeats,
            repeat_count: 0,
        }
    }

    pub fn forever() -> Self {
        Self::new(-1)
    }

    pub fn with_child(mut self, child: BoxedNode) -> Self {
        self.child = Some(child);
        self
    }

    pub fn repeat_count(&self) -> i32 {
        self.repeat_count
    }

    fn reset_child(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }
}

impl TreeNode for RepeatNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(child) = self.child.as_mut() else {
            return NodeStatus::Failure;
        };

        let child_status = child.tick();

        if self.max_repeats < 0 {
            return match child_status {
                NodeStatus::Sleeping => NodeStatus::Sleeping,
                _ => NodeStatus::Running,
            };
        }

        match child_status {
            NodeStatus::Success => {
                self.repeat_count += 1;
                if self.repeat_count >= self.max_repeats {
                    self.reset();
                    NodeStatus::Success
                } else {
                    self.reset_child();
                    NodeStatus::Running
                }
            }
            NodeStatus::Failure => {
                self.reset();
                NodeStatus::Failure
            }
            pending => pending,
        }
    }

    fn reset(&mut self) {
        self.repeat_count = 0;
        self.reset_child();
    }

    fn name(&self) -> &str {
        "Repeat"
    }
}

impl_decorator_node!(RepeatNode);
