use crate::{
    macros::impl_control_node,
    nodes::{BoxedNode, ControlNode, NodeStatus, TreeNode},
};

/// The SequenceNode is used to tick children in an ordered sequence.
/// If any child returns RUNNING or SLEEPING, previous children will NOT be
/// ticked again.
///
/// - If all the children return SUCCESS, this node returns SUCCESS.
///
/// - If a child returns RUNNING or SLEEPING, this node returns the same status.
///   Loop is NOT restarted, the same child will be ticked again.
///
/// - If a child returns FAILURE, stop the loop and return FAILURE.
///
/// Both terminal results reset the node, so the next tick starts again from
/// the first child. A sequence with no children succeeds.
pub struct SequenceNode {
    name: String,
    children: Vec<BoxedNode>,
    child_idx: usize,
}

impl SequenceNode {
    pub fn new() -> Self {
        Self::named("Sequence")
    }

    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            children: Vec::new(),
            child_idx: 0,
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BoxedNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Default for SequenceNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNode for SequenceNode {
    fn tick(&mut self) -> NodeStatus {
        while self.child_idx < self.children.len() {
            let child_status = self.children[self.child_idx].tick();

            match child_status {
                NodeStatus::Success => {
                    self.child_idx += 1;
                    ::log::trace!("[reactive_bt]: {} advanced to {}", self.name, self.child_idx);
                }
                NodeStatus::Failure => {
                    self.reset();
                    return NodeStatus::Failure;
                }
                pending @ (NodeStatus::Running | NodeStatus::Sleeping) => return pending,
            }
        }

        self.reset();
        NodeStatus::Success
    }

    fn reset(&mut self) {
        self.child_idx = 0;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl_control_node!(SequenceNode);
