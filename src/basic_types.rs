use std::str::FromStr;

use thiserror::Error;

/// Specifies the status of a node's execution. Returned from `tick()`.
///
/// `Success` and `Failure` end the current activation of a node. `Running`
/// means more progress is immediately available, while `Sleeping` means the
/// node is blocked on a timer or an outside condition and the host may back
/// off until its next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Success,
    Failure,
    Running,
    Sleeping,
}

impl NodeStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Running | Self::Sleeping)
    }

    /// Swaps `Success` and `Failure`, leaving pending statuses untouched.
    pub fn invert(self) -> Self {
        match self {
            Self::Success => Self::Failure,
            Self::Failure => Self::Success,
            pending => pending,
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Running => "RUNNING",
            Self::Sleeping => "SLEEPING",
        };

        write!(f, "{text}")
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseNodeStatusError {
    #[error("string [{0}] didn't match any NodeStatus values")]
    NoMatch(String),
}

impl FromStr for NodeStatus {
    type Err = ParseNodeStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(NodeStatus::Success),
            "FAILURE" => Ok(NodeStatus::Failure),
            "RUNNING" => Ok(NodeStatus::Running),
            "SLEEPING" => Ok(NodeStatus::Sleeping),
            _ => Err(ParseNodeStatusError::NoMatch(s.to_string())),
        }
    }
}

/// How many children of a `ParallelNode` must agree before it reports
/// a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelPolicy {
    RequireOne,
    RequireAll,
}

impl ParallelPolicy {
    pub(crate) fn is_met(&self, count: usize, total: usize) -> bool {
        match self {
            Self::RequireOne => count >= 1,
            Self::RequireAll => count == total,
        }
    }
}

impl std::fmt::Display for ParallelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::RequireOne => "REQUIRE_ONE",
            Self::RequireAll => "REQUIRE_ALL",
        };

        write!(f, "{text}")
    }
}
