use crate::{
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeStatus, TreeNode},
};

/// The InverterNode returns FAILURE on SUCCESS, and SUCCESS on FAILURE.
/// RUNNING and SLEEPING pass through untouched.
#[derive(Default)]
pub struct InverterNode {
    child: Option<BoxedNode>,
}

impl InverterNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(child: BoxedNode) -> Self {
        Self { child: Some(child) }
    }
}

impl TreeNode for InverterNode {
    fn tick(&mut self) -> NodeStatus {
        match self.child.as_mut() {
            Some(child) => child.tick().invert(),
            None => NodeStatus::Failure,
        }
    }

    fn reset(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        "Inverter"
    }
}

impl_decorator_node!(InverterNode);
