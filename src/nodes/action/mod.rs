//! Leaf nodes: the points where a tree touches the outside world or waits.

mod action;
pub use action::*;
mod condition;
pub use condition::*;
mod sleep;
pub use sleep::*;
mod sleep_until;
pub use sleep_until::*;
mod sleep_until_idle;
pub use sleep_until_idle::*;
