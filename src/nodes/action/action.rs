use crate::nodes::{NodeResult, NodeStatus, TreeNode};

type ActionFn = Box<dyn FnMut() -> NodeResult>;

/// The ActionNode runs a caller-supplied computation on every tick and
/// reports its status unchanged.
///
/// If the computation returns an error, the error is logged and the node
/// returns FAILURE. The node keeps no state of its own.
pub struct ActionNode {
    name: String,
    action: ActionFn,
}

impl ActionNode {
    pub fn new(name: impl AsRef<str>, action: impl FnMut() -> NodeResult + 'static) -> Self {
        Self {
            name: name.as_ref().to_string(),
            action: Box::new(action),
        }
    }

    /// Action that cannot fail on its own.
    pub fn infallible(
        name: impl AsRef<str>,
        mut action: impl FnMut() -> NodeStatus + 'static,
    ) -> Self {
        Self::new(name, move || Ok(action()))
    }
}

impl TreeNode for ActionNode {
    fn tick(&mut self) -> NodeStatus {
        match (self.action)() {
            Ok(status) => status,
            Err(err) => {
                ::log::warn!("[reactive_bt]: {}::tick() failed: {err:#}", self.name);
                NodeStatus::Failure
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ActionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionNode").field("name", &self.name).finish()
    }
}
