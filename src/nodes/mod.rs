use std::{fmt, rc::Rc};

use crate::{
    clock::{Clock, SystemClock},
    random::RandomSource,
    timing::DEFAULT_JITTER_SPREAD,
};

pub use crate::basic_types::{NodeStatus, ParallelPolicy};

pub mod action;
pub mod control;
pub mod decorator;
pub mod subtree;

/// Result type returned by user-supplied leaf callbacks. Any error is turned
/// into `NodeStatus::Failure` at the leaf that produced it.
pub type NodeResult<Output = NodeStatus> = anyhow::Result<Output>;

/// A node owned by its parent.
pub type BoxedNode = Box<dyn TreeNode>;

/// Capability shared by every node in a tree.
///
/// `tick()` performs one evaluation step. `reset()` returns the node and its
/// whole subtree to the state they had right after construction, and must
/// be safe to call any number of times.
pub trait TreeNode {
    fn tick(&mut self) -> NodeStatus;

    fn reset(&mut self) {}

    /// Called when the node becomes the active target of a `DynamicSubTreeNode`.
    fn on_start(&mut self) {}

    /// Called when the node stops being the active target of a `DynamicSubTreeNode`.
    fn on_end(&mut self) {}

    fn name(&self) -> &str;
}

/// A node with an ordered list of children, fixed after construction.
pub trait ControlNode: TreeNode {
    fn add_child(&mut self, child: BoxedNode);

    fn children(&self) -> &[BoxedNode];

    fn children_mut(&mut self) -> &mut [BoxedNode];

    fn reset_children(&mut self) {
        for child in self.children_mut() {
            child.reset();
        }
    }

    fn into_node(self: Box<Self>) -> BoxedNode;
}

/// A node wrapping exactly one child. Ticking a decorator without a child
/// yields `NodeStatus::Failure`.
pub trait DecoratorNode: TreeNode {
    fn set_child(&mut self, child: BoxedNode);

    fn child(&self) -> Option<&dyn TreeNode>;

    fn into_node(self: Box<Self>) -> BoxedNode;
}

/// Contains the configuration shared by nodes that measure time or draw
/// random numbers. Cloning is cheap and clones share the clock and generator.
#[derive(Clone)]
pub struct NodeConfig {
    clock: Rc<dyn Clock>,
    random: RandomSource,
    jitter_spread: f64,
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Relative spread of timer jitter. Must be finite and non-negative;
    /// `0.0` disables jitter.
    pub fn with_jitter_spread(mut self, spread: f64) -> Self {
        self.jitter_spread = spread;
        self
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        Rc::clone(&self.clock)
    }

    pub fn random(&self) -> RandomSource {
        self.random.clone()
    }

    pub fn jitter_spread(&self) -> f64 {
        self.jitter_spread
    }

    pub fn now(&self) -> std::time::Duration {
        self.clock.now()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            clock: Rc::new(SystemClock::new()),
            random: RandomSource::from_entropy(),
            jitter_spread: DEFAULT_JITTER_SPREAD,
        }
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("clock", &self.clock)
            .field("jitter_spread", &self.jitter_spread)
            .finish_non_exhaustive()
    }
}
