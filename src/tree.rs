use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use thiserror::Error;

use crate::{
    basic_types::{NodeStatus, ParallelPolicy},
    nodes::{
        action::{
            ActionNode, ConditionNode, SleepNode, SleepUntilIdleNode, SleepUntilNode,
        },
        control::{ParallelNode, RandomSelectorNode, SelectorNode, SequenceNode},
        decorator::{
            CooldownNode, InverterNode, RepeatNode, RetryNode, SleepUntilSuccessNode,
            SuccessRateNode,
        },
        subtree::{DynamicSubTreeNode, SubTreeNode},
        BoxedNode, ControlNode, DecoratorNode, NodeConfig, NodeResult, TreeNode,
    },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unclosed composite nodes ({open} still open). Call end() for each composite.")]
    UnclosedComposite { open: usize },
    #[error("end() was called without an open composite.")]
    UnbalancedEnd,
    #[error("Decorator [{0}] has no node to wrap.")]
    DanglingDecorator(String),
    #[error("Invalid tree structure. Expected exactly one root node, found none.")]
    EmptyTree,
    #[error("Invalid tree structure. Expected exactly one root node, found {0}.")]
    MultipleRoots(usize),
    #[error("Invalid parameter for [{node}]: {reason}")]
    InvalidParameter { node: String, reason: String },
}

/// A validated tree, owning its root node.
pub struct BehaviorTree {
    root: BoxedNode,
}

impl BehaviorTree {
    pub fn new(root: BoxedNode) -> Self {
        Self { root }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Performs exactly one evaluation of the root.
    pub fn tick(&mut self) -> NodeStatus {
        self.root.tick()
    }

    /// Ticks repeatedly while the root reports RUNNING, returning the first
    /// other status. SLEEPING hands control back to the caller.
    pub fn run(&mut self) -> NodeStatus {
        loop {
            let status = self.root.tick();
            if status != NodeStatus::Running {
                ::log::debug!("[reactive_bt]: {}::run() -> {status}", self.root.name());
                return status;
            }
        }
    }

    pub fn reset(&mut self) {
        self.root.reset();
    }

    pub fn root(&self) -> &BoxedNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut BoxedNode {
        &mut self.root
    }

    pub fn into_root(self) -> BoxedNode {
        self.root
    }
}

/// A tree can be embedded by value wherever a node is expected.
impl TreeNode for BehaviorTree {
    fn tick(&mut self) -> NodeStatus {
        BehaviorTree::tick(self)
    }

    fn reset(&mut self) {
        BehaviorTree::reset(self)
    }

    fn on_start(&mut self) {
        self.root.on_start();
    }

    fn on_end(&mut self) {
        self.root.on_end();
    }

    fn name(&self) -> &str {
        self.root.name()
    }
}

impl fmt::Debug for BehaviorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.root.name())
            .finish()
    }
}

/// Handle to a tree that sub-tree nodes refer to. Clones point at the same
/// tree; `ptr_eq` compares identity.
///
/// A tree that is ticked again while one of its own nodes is ticking it
/// (for example a sub-tree that refers back to an enclosing tree) reports
/// FAILURE for the inner tick.
#[derive(Clone)]
pub struct SharedTree {
    inner: Rc<RefCell<BehaviorTree>>,
}

impl SharedTree {
    pub fn new(tree: BehaviorTree) -> Self {
        Self {
            inner: Rc::new(RefCell::new(tree)),
        }
    }

    pub fn ptr_eq(&self, other: &SharedTree) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn tick(&self) -> NodeStatus {
        self.with_tree(BehaviorTree::tick)
            .unwrap_or(NodeStatus::Failure)
    }

    pub fn reset(&self) {
        self.with_tree(BehaviorTree::reset);
    }

    pub fn on_start(&self) {
        self.with_tree(|tree| tree.root.on_start());
    }

    pub fn on_end(&self) {
        self.with_tree(|tree| tree.root.on_end());
    }

    /// Runs `f` on the tree, or returns `None` if the tree is already in use
    /// further up the call stack.
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut BehaviorTree) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut tree) => Some(f(&mut tree)),
            Err(_) => {
                ::log::warn!("[reactive_bt]: shared tree re-entered while in use");
                None
            }
        }
    }
}

impl From<BehaviorTree> for SharedTree {
    fn from(tree: BehaviorTree) -> Self {
        Self::new(tree)
    }
}

impl fmt::Debug for SharedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedTree")
            .field("ptr", &Rc::as_ptr(&self.inner))
            .finish()
    }
}

struct Scope {
    composite: Box<dyn ControlNode>,
    /// Decorators staged before the composite was opened. They wrap it once
    /// its scope is closed.
    decorators: Vec<Box<dyn DecoratorNode>>,
}

/// Single-use construction context for a `BehaviorTree`.
///
/// Composites open a scope that collects every node added until the
/// matching `end()`. Decorators are staged and wrap the next single node
/// added, where a composite counts as one node once its scope is closed.
/// Stacked decorators nest in call order: `invert().repeat(3).action(..)`
/// builds `Inverter(Repeat(Action))`.
///
/// Misuse is remembered and reported by `build()`.
///
/// ```
/// use reactive_bt::{BehaviorTree, NodeStatus};
///
/// let mut tree = BehaviorTree::builder()
///     .selector()
///         .condition("has target", || false)
///         .invert()
///         .action("idle", || NodeStatus::Failure)
///     .end()
///     .build()
///     .unwrap();
///
/// assert_eq!(tree.tick(), NodeStatus::Success);
/// ```
pub struct Builder {
    config: NodeConfig,
    scopes: Vec<Scope>,
    decorators: Vec<Box<dyn DecoratorNode>>,
    roots: Vec<BoxedNode>,
    error: Option<BuildError>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            config: NodeConfig::default(),
            scopes: Vec::new(),
            decorators: Vec::new(),
            roots: Vec::new(),
            error: None,
        }
    }

    /// Installs the configuration used by every node created afterwards.
    pub fn with_config(mut self, config: NodeConfig) -> Self {
        let spread = config.jitter_spread();
        if !spread.is_finite() || spread < 0.0 {
            self.record_error(BuildError::InvalidParameter {
                node: "NodeConfig".to_string(),
                reason: format!("jitter spread must be finite and non-negative, got {spread}"),
            });
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // Composites

    pub fn sequence(self) -> Self {
        self.composite(Box::new(SequenceNode::new()))
    }

    pub fn selector(self) -> Self {
        self.composite(Box::new(SelectorNode::new()))
    }

    pub fn random_selector(self) -> Self {
        let node = RandomSelectorNode::new(&self.config);
        self.composite(Box::new(node))
    }

    pub fn parallel(self, success_policy: ParallelPolicy, failure_policy: ParallelPolicy) -> Self {
        self.composite(Box::new(ParallelNode::new(success_policy, failure_policy)))
    }

    /// Opens a scope for any composite, including custom ones.
    pub fn composite(mut self, composite: Box<dyn ControlNode>) -> Self {
        let decorators = std::mem::take(&mut self.decorators);
        self.scopes.push(Scope {
            composite,
            decorators,
        });
        self
    }

    /// Closes the innermost open composite.
    pub fn end(mut self) -> Self {
        let Some(scope) = self.scopes.pop() else {
            self.record_error(BuildError::UnbalancedEnd);
            return self;
        };

        if let Some(dangling) = self.decorators.last() {
            let name = dangling.name().to_string();
            self.record_error(BuildError::DanglingDecorator(name));
        }

        self.decorators = scope.decorators;
        self.attach(scope.composite.into_node());
        self
    }

    // Leaves

    pub fn action(self, name: impl AsRef<str>, action: impl FnMut() -> NodeStatus + 'static) -> Self {
        self.node(Box::new(ActionNode::infallible(name, action)))
    }

    pub fn try_action(
        self,
        name: impl AsRef<str>,
        action: impl FnMut() -> NodeResult + 'static,
    ) -> Self {
        self.node(Box::new(ActionNode::new(name, action)))
    }

    pub fn condition(self, name: impl AsRef<str>, predicate: impl FnMut() -> bool + 'static) -> Self {
        self.node(Box::new(ConditionNode::infallible(name, predicate)))
    }

    pub fn try_condition(
        self,
        name: impl AsRef<str>,
        predicate: impl FnMut() -> NodeResult<bool> + 'static,
    ) -> Self {
        self.node(Box::new(ConditionNode::new(name, predicate)))
    }

    pub fn succeed(self, name: impl AsRef<str>) -> Self {
        self.action(name, || NodeStatus::Success)
    }

    /// Leaf that runs `after` and succeeds.
    pub fn succeed_with(self, name: impl AsRef<str>, mut after: impl FnMut() + 'static) -> Self {
        self.action(name, move || {
            after();
            NodeStatus::Success
        })
    }

    pub fn fail(self, name: impl AsRef<str>) -> Self {
        self.action(name, || NodeStatus::Failure)
    }

    /// Leaf that runs `after` and fails.
    pub fn fail_with(self, name: impl AsRef<str>, mut after: impl FnMut() + 'static) -> Self {
        self.action(name, move || {
            after();
            NodeStatus::Failure
        })
    }

    /// Leaf that logs a message at info level and succeeds.
    pub fn log_info(self, message: impl FnMut() -> String + 'static) -> Self {
        self.log_at("LogInfo", ::log::Level::Info, message)
    }

    pub fn log_debug(self, message: impl FnMut() -> String + 'static) -> Self {
        self.log_at("LogDebug", ::log::Level::Debug, message)
    }

    pub fn log_warn(self, message: impl FnMut() -> String + 'static) -> Self {
        self.log_at("LogWarn", ::log::Level::Warn, message)
    }

    pub fn log_error(self, message: impl FnMut() -> String + 'static) -> Self {
        self.log_at("LogError", ::log::Level::Error, message)
    }

    fn log_at(
        self,
        name: &str,
        level: ::log::Level,
        mut message: impl FnMut() -> String + 'static,
    ) -> Self {
        self.action(name, move || {
            ::log::log!(level, "{}", message());
            NodeStatus::Success
        })
    }

    pub fn sleep(self, duration: Duration) -> Self {
        let node = SleepNode::new(duration, &self.config);
        self.node(Box::new(node))
    }

    pub fn sleep_until(self, predicate: impl FnMut() -> bool + 'static, max_wait: Duration) -> Self {
        let node = SleepUntilNode::new(predicate, max_wait, &self.config);
        self.node(Box::new(node))
    }

    pub fn sleep_until_idle(
        self,
        is_idle: impl FnMut() -> bool + 'static,
        idle_for: Duration,
        timeout: Duration,
    ) -> Self {
        let node = SleepUntilIdleNode::new(is_idle, idle_for, timeout, &self.config);
        self.node(Box::new(node))
    }

    // Decorators

    pub fn invert(self) -> Self {
        self.decorator(Box::new(InverterNode::new()))
    }

    /// Repeats the next node until it has succeeded `times` times. Negative
    /// values repeat forever.
    pub fn repeat(self, times: i32) -> Self {
        self.decorator(Box::new(RepeatNode::new(times)))
    }

    pub fn repeat_forever(self) -> Self {
        self.decorator(Box::new(RepeatNode::forever()))
    }

    /// Retries the next node up to `attempts` times. Zero or negative values
    /// retry forever.
    pub fn retry(self, attempts: i32) -> Self {
        self.decorator(Box::new(RetryNode::new(attempts)))
    }

    pub fn retry_forever(self) -> Self {
        self.decorator(Box::new(RetryNode::forever()))
    }

    pub fn cooldown(self, cooldown: Duration) -> Self {
        let node = CooldownNode::new(cooldown, &self.config);
        self.decorator(Box::new(node))
    }

    pub fn cooldown_with(self, cooldown: impl FnMut() -> Duration + 'static) -> Self {
        let node = CooldownNode::with_supplier(cooldown, &self.config);
        self.decorator(Box::new(node))
    }

    pub fn success_rate(mut self, percentage: f32) -> Self {
        if percentage.is_nan() {
            self.record_error(BuildError::InvalidParameter {
                node: "SuccessRate".to_string(),
                reason: "percentage is NaN".to_string(),
            });
        }
        let node = SuccessRateNode::new(percentage, &self.config);
        self.decorator(Box::new(node))
    }

    pub fn success_rate_with(self, percentage: impl FnMut() -> f32 + 'static) -> Self {
        let node = SuccessRateNode::with_supplier(percentage, &self.config);
        self.decorator(Box::new(node))
    }

    pub fn sleep_until_success(self, max_wait: Duration) -> Self {
        let node = SleepUntilSuccessNode::new(max_wait, &self.config);
        self.decorator(Box::new(node))
    }

    /// Stages any decorator, including custom ones.
    pub fn decorator(mut self, decorator: Box<dyn DecoratorNode>) -> Self {
        self.decorators.push(decorator);
        self
    }

    // Composition

    pub fn subtree(self, name: impl AsRef<str>, tree: impl Into<SharedTree>) -> Self {
        self.node(Box::new(SubTreeNode::from_tree(name, tree)))
    }

    pub fn subtree_with(
        self,
        name: impl AsRef<str>,
        supplier: impl FnMut() -> Option<SharedTree> + 'static,
    ) -> Self {
        self.node(Box::new(SubTreeNode::new(name, supplier)))
    }

    pub fn dynamic_subtree(
        self,
        name: impl AsRef<str>,
        supplier: impl FnMut() -> Option<SharedTree> + 'static,
    ) -> Self {
        self.node(Box::new(DynamicSubTreeNode::new(name, supplier)))
    }

    /// Adds any node, wrapped in the staged decorators.
    pub fn node(mut self, node: BoxedNode) -> Self {
        self.attach(node);
        self
    }

    /// Splices a reusable builder fragment.
    pub fn apply(self, fragment: impl FnOnce(Self) -> Self) -> Self {
        fragment(self)
    }

    pub fn build(self) -> Result<BehaviorTree, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if !self.scopes.is_empty() {
            return Err(BuildError::UnclosedComposite {
                open: self.scopes.len(),
            });
        }

        if let Some(dangling) = self.decorators.last() {
            return Err(BuildError::DanglingDecorator(dangling.name().to_string()));
        }

        let mut roots = self.roots;
        if roots.len() > 1 {
            return Err(BuildError::MultipleRoots(roots.len()));
        }

        roots.pop().map(BehaviorTree::new).ok_or(BuildError::EmptyTree)
    }

    fn attach(&mut self, mut node: BoxedNode) {
        while let Some(mut decorator) = self.decorators.pop() {
            decorator.set_child(node);
            node = decorator.into_node();
        }

        match self.scopes.last_mut() {
            Some(scope) => scope.composite.add_child(node),
            None => self.roots.push(node),
        }
    }

    fn record_error(&mut self, err: BuildError) {
        ::log::debug!("[reactive_bt]: builder error: {err}");
        self.error.get_or_insert(err);
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
