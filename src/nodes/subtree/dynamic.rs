use std::fmt;

use crate::{
    nodes::{NodeStatus, TreeNode},
    tree::SharedTree,
};

type TreeSupplier = Box<dyn FnMut() -> Option<SharedTree>>;

/// The DynamicSubTreeNode re-resolves its target on every tick.
///
/// When the supplier returns a different tree than on the previous tick, the
/// previous tree gets `on_end()` and `reset()`, and the new one gets
/// `on_start()` before its first tick. Trees are compared by identity, not
/// by content.
///
/// If the supplier yields nothing, the previous tree is ended and reset as
/// well, and this node returns FAILURE.
///
/// Lifecycle hooks are passed on to the active tree, so a dynamic sub-tree
/// nested as the root of another switched tree ends its own target too.
pub struct DynamicSubTreeNode {
    name: String,
    supplier: TreeSupplier,
    current: Option<SharedTree>,
}

impl DynamicSubTreeNode {
    pub fn new(
        name: impl AsRef<str>,
        supplier: impl FnMut() -> Option<SharedTree> + 'static,
    ) -> Self {
        Self {
            name: name.as_ref().to_string(),
            supplier: Box::new(supplier),
            current: None,
        }
    }

    /// Tree that was ticked last, if any.
    pub fn current(&self) -> Option<&SharedTree> {
        self.current.as_ref()
    }

    fn end_current(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.on_end();
            previous.reset();
        }
    }
}

impl TreeNode for DynamicSubTreeNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(next) = (self.supplier)() else {
            ::log::debug!("[reactive_bt]: {} resolved to nothing", self.name);
            self.end_current();
            return NodeStatus::Failure;
        };

        let unchanged = self
            .current
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&next));

        if !unchanged {
            ::log::debug!("[reactive_bt]: {} switched target tree", self.name);
            self.end_current();
            next.on_start();
        }

        let status = next.tick();
        self.current = Some(next);
        status
    }

    /// Ends and resets the active tree. The next tick starts it afresh.
    fn reset(&mut self) {
        self.end_current();
    }

    fn on_start(&mut self) {
        if let Some(current) = &self.current {
            current.on_start();
        }
    }

    /// Ends the active tree and drops it, which also resets it. A following
    /// `reset()` has nothing left to end.
    fn on_end(&mut self) {
        self.end_current();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for DynamicSubTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicSubTreeNode")
            .field("name", &self.name)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
