use std::fmt;

use crate::{
    nodes::{NodeStatus, TreeNode},
    tree::SharedTree,
};

type TreeSupplier = Box<dyn FnMut() -> Option<SharedTree>>;

/// The SubTreeNode splices another tree in by reference.
///
/// The supplier is called on the first tick of each activation and its
/// result is cached until `reset()`, which resets the cached tree and drops
/// it so the next activation resolves again. If the supplier yields nothing,
/// this node returns FAILURE.
pub struct SubTreeNode {
    name: String,
    supplier: TreeSupplier,
    cached: Option<SharedTree>,
}

impl SubTreeNode {
    pub fn new(
        name: impl AsRef<str>,
        supplier: impl FnMut() -> Option<SharedTree> + 'static,
    ) -> Self {
        Self {
            name: name.as_ref().to_string(),
            supplier: Box::new(supplier),
            cached: None,
        }
    }

    /// Sub-tree that always resolves to `tree`.
    pub fn from_tree(name: impl AsRef<str>, tree: impl Into<SharedTree>) -> Self {
        let tree = tree.into();
        Self::new(name, move || Some(tree.clone()))
    }

    pub fn is_resolved(&self) -> bool {
        self.cached.is_some()
    }
}

impl TreeNode for SubTreeNode {
    fn tick(&mut self) -> NodeStatus {
        if self.cached.is_none() {
            ::log::debug!("[reactive_bt]: {}::resolve()", self.name);
            self.cached = (self.supplier)();
        }

        match &self.cached {
            Some(tree) => tree.tick(),
            None => {
                ::log::debug!("[reactive_bt]: {} resolved to nothing", self.name);
                NodeStatus::Failure
            }
        }
    }

    fn reset(&mut self) {
        if let Some(tree) = self.cached.take() {
            tree.reset();
        }
    }

    fn on_start(&mut self) {
        if let Some(tree) = &self.cached {
            tree.on_start();
        }
    }

    fn on_end(&mut self) {
        if let Some(tree) = &self.cached {
            tree.on_end();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for SubTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubTreeNode")
            .field("name", &self.name)
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}
