use crate::{
    macros::impl_control_node,
    nodes::{BoxedNode, ControlNode, NodeConfig, NodeStatus, TreeNode},
    random::RandomSource,
};

/// The RandomSelectorNode picks one child uniformly at random at the start
/// of each activation and ticks only that child until it finishes.
///
/// The child's status is returned unchanged. A SUCCESS or FAILURE resets this
/// node, so the next activation draws again. Unlike `SelectorNode`, a failed
/// child is never followed by a second attempt within the same activation.
pub struct RandomSelectorNode {
    name: String,
    children: Vec<BoxedNode>,
    selected: Option<usize>,
    random: RandomSource,
}

impl RandomSelectorNode {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            name: "RandomSelector".to_string(),
            children: Vec::new(),
            selected: None,
            random: config.random(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BoxedNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Index of the child chosen for the current activation.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

impl TreeNode for RandomSelectorNode {
    fn tick(&mut self) -> NodeStatus {
        if self.children.is_empty() {
            return NodeStatus::Failure;
        }

        let len = self.children.len();
        let random = &self.random;
        let idx = *self.selected.get_or_insert_with(|| random.index(len));

        let status = self.children[idx].tick();
        if status.is_completed() {
            self.reset();
        }

        status
    }

    fn reset(&mut self) {
        self.selected = None;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl_control_node!(RandomSelectorNode);
