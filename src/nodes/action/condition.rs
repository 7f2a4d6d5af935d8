use crate::nodes::{NodeResult, NodeStatus, TreeNode};

type PredicateFn = Box<dyn FnMut() -> NodeResult<bool>>;

/// The ConditionNode evaluates a predicate: SUCCESS when it holds,
/// FAILURE when it doesn't or when it returns an error.
pub struct ConditionNode {
    name: String,
    predicate: PredicateFn,
}

impl ConditionNode {
    pub fn new(
        name: impl AsRef<str>,
        predicate: impl FnMut() -> NodeResult<bool> + 'static,
    ) -> Self {
        Self {
            name: name.as_ref().to_string(),
            predicate: Box::new(predicate),
        }
    }

    pub fn infallible(name: impl AsRef<str>, mut predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::new(name, move || Ok(predicate()))
    }
}

impl TreeNode for ConditionNode {
    fn tick(&mut self) -> NodeStatus {
        match (self.predicate)() {
            Ok(true) => NodeStatus::Success,
            Ok(false) => NodeStatus::Failure,
            Err(err) => {
                ::log::warn!(
                    "[reactive_bt]: condition {} raised an error: {err:#}",
                    self.name
                );
                NodeStatus::Failure
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ConditionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionNode")
            .field("name", &self.name)
            .finish()
    }
}
