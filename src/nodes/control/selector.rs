use crate::{
    macros::impl_control_node,
    nodes::{BoxedNode, ControlNode, NodeStatus, TreeNode},
};

/// The SelectorNode is used to try different strategies, until one succeeds.
/// If any child returns RUNNING or SLEEPING, previous children will NOT be
/// ticked again.
///
/// - If all the children return FAILURE, this node returns FAILURE.
///
/// - If a child returns RUNNING or SLEEPING, this node returns the same status.
///
/// - If a child returns SUCCESS, stop the loop and return SUCCESS.
///
/// A selector with no children fails.
pub struct SelectorNode {
    name: String,
    children: Vec<BoxedNode>,
    child_idx: usize,
}

impl SelectorNode {
    pub fn new() -> Self {
        Self::named("Selector")
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

impl Default for SelectorNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNode for SelectorNode {
    fn tick(&mut self) -> NodeStatus {
        while self.child_idx < self.children.len() {
            let child_status = self.children[self.child_idx].tick();

            match child_status {
                NodeStatus::Failure => {
                    self.child_idx += 1;
                    ::log::trace!("[reactive_bt]: {} fell back to {}", self.name, self.child_idx);
                }
                NodeStatus::Success => {
                    self.reset();
                    return NodeStatus::Success;
                }
                pending @ (NodeStatus::Running | NodeStatus::Sleeping) => return pending,
            }
        }

        self.reset();
        NodeStatus::Failure
    }

    fn reset(&mut self) {
        self.child_idx = 0;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl_control_node!(SelectorNode);
