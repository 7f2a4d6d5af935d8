use crate::{
    basic_types::ParallelPolicy,
    macros::impl_control_node,
    nodes::{BoxedNode, ControlNode, NodeStatus, TreeNode},
};

/// The ParallelNode ticks all its children on every tick,
/// __interleaved__, but not in separate threads!
///
/// Children are ticked again on every tick regardless of what they
/// returned before. After each pass the results are tallied and checked
/// in this order:
///
/// 1. If the failure policy is met, every child is reset and this node
///    returns FAILURE.
/// 2. If the success policy is met, every child is reset and this node
///    returns SUCCESS.
/// 3. If no child is RUNNING but at least one is SLEEPING, this node
///    returns SLEEPING.
/// 4. Otherwise it returns RUNNING.
///
/// With no children it returns SUCCESS when the success policy is
/// `RequireAll` and FAILURE when it is `RequireOne`.
pub struct ParallelNode {
    name: String,
    children: Vec<BoxedNode>,
    success_policy: ParallelPolicy,
    failure_policy: ParallelPolicy,
}

impl ParallelNode {
    pub fn new(success_policy: ParallelPolicy, failure_policy: ParallelPolicy) -> Self {
        Self {
            name: format!("Parallel({success_policy}, {failure_policy})"),
            children: Vec::new(),
            success_policy,
            failure_policy,
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BoxedNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn success_policy(&self) -> ParallelPolicy {
        self.success_policy
    }

    pub fn failure_policy(&self) -> ParallelPolicy {
        self.failure_policy
    }
}

/// Succeeds once every child succeeds, fails as soon as one fails.
impl Default for ParallelNode {
    fn default() -> Self {
        Self::new(ParallelPolicy::RequireAll, ParallelPolicy::RequireOne)
    }
}

impl TreeNode for ParallelNode {
    fn tick(&mut self) -> NodeStatus {
        let total = self.children.len();
        if total == 0 {
            return match self.success_policy {
                ParallelPolicy::RequireAll => NodeStatus::Success,
                ParallelPolicy::RequireOne => NodeStatus::Failure,
            };
        }

        let mut success_count = 0;
        let mut failure_count = 0;
        let mut running_count = 0;
        let mut sleeping_count = 0;

        for child in self.children.iter_mut() {
            match child.tick() {
                NodeStatus::Success => success_count += 1,
                NodeStatus::Failure => failure_count += 1,
                NodeStatus::Running => running_count += 1,
                NodeStatus::Sleeping => sleeping_count += 1,
            }
        }

        if self.failure_policy.is_met(failure_count, total) {
            self.reset();
            return NodeStatus::Failure;
        }

        if self.success_policy.is_met(success_count, total) {
            self.reset();
            return NodeStatus::Success;
        }

        if running_count == 0 && sleeping_count > 0 {
            NodeStatus::Sleeping
        } else {
            NodeStatus::Running
        }
    }

    fn reset(&mut self) {
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl_control_node!(ParallelNode);
