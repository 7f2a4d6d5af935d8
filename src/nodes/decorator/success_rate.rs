use crate::{
    macros::impl_decorator_node,
    nodes::{BoxedNode, NodeConfig, NodeStatus, TreeNode},
    random::RandomSource,
};

/// The SuccessRateNode lets its child run only a given percentage of the time.
///
/// On every tick a percentage is read from the supplier and clamped to
/// `0.0..=100.0`. A uniform roll in `[0, 1)` decides: below `percentage / 100`
/// the child is ticked and its status returned, otherwise this node returns
/// FAILURE without touching the child. A percentage of 0 never runs the child
/// and 100 always does.
pub struct SuccessRateNode {
    child: Option<BoxedNode>,
    percentage: Box<dyn FnMut() -> f32>,
    random: RandomSource,
}

impl SuccessRateNode {
    pub fn new(percentage: f32, config: &NodeConfig) -> Self {
        Self::with_supplier(move || percentage, config)
    }

    pub fn with_supplier(percentage: impl FnMut() -> f32 + 'static, config: &NodeConfig) -> Self {
        Self {
            child: None,
            percentage: Box::new(percentage),
            random: config.random(),
        }
    }

    pub fn with_child(mut self, child: BoxedNode) -> Self {
        self.child = Some(child);
        self
    }
}

fn clamp_percentage(percentage: f32) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        f64::from(percentage.clamp(0.0, 100.0))
    }
}

impl TreeNode for SuccessRateNode {
    fn tick(&mut self) -> NodeStatus {
        let Some(child) = self.child.as_mut() else {
            return NodeStatus::Failure;
        };

        let threshold = clamp_percentage((self.percentage)()) / 100.0;
        if self.random.unit() >= threshold {
            ::log::debug!("[reactive_bt]: SuccessRate skipped {}", child.name());
            return NodeStatus::Failure;
        }

        child.tick()
    }

    fn reset(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        "SuccessRate"
    }
}

impl_decorator_node!(SuccessRateNode);
