use std::{rc::Rc, time::Duration};

use crate::{
    clock::Clock,
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeConfig, NodeStatus, TreeNode},
};

/// The CooldownNode limits how often its child may run.
///
/// After the child completes (SUCCESS or FAILURE), further ticks return
/// FAILURE without ticking the child until the cooldown has passed. The
/// cooldown is read from a supplier on every tick, so it may change while
/// the tree runs.
pub struct CooldownNode {
    child: Option<BoxedNode>,
    cooldown: Box<dyn FnMut() -> Duration>,
    clock: Rc<dyn Clock>,
    last_execution: Option<Duration>,
}

impl CooldownNode {
    pub fn new(cooldown: Duration, config: &NodeConfig) -> Self {
        Self::with_supplier(move || cooldown, config)
    }

    pub fn with_supplier(cooldown: impl FnMut() -> Duration + 'static, config: &NodeConfig) -> Self {
        Self {
            child: None,
            cooldown: Box::new(cooldown),
            clock: config.clock(),
            last_execution: None,
        }
    }

    pub fn with_child(mut self, child: BoxedNode) -> Self {
        self.child = Some(child);
        self
    }

    /// Clock time at which the child last completed.
    pub fn last_execution(&self) -> Option<Duration> {
        self.last_execution
    }
}

impl TreeNode for CooldownNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(child) = self.child.as_mut() else {
            return NodeStatus::Failure;
        };

        let cooldown = (self.cooldown)();
        if let Some(last) = self.last_execution {
            let since = self.clock.now().saturating_sub(last);
            if since < cooldown {
                ::log::debug!(
                    "[reactive_bt]: Cooldown blocked {}, {}ms left",
                    child.name(),
                    (cooldown - since).as_millis()
                );
                return NodeStatus::Failure;
            }
        }

        let status = child.tick();
        if status.is_completed() {
            self.last_execution = Some(self.clock.now());
        }

        status
    }

    fn reset(&mut self) {
        self.last_execution = None;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        "Cooldown"
    }
}

impl_decorator_node!(CooldownNode);
