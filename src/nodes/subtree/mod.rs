//! Nodes that splice another tree in by reference.

mod dynamic;
pub use dynamic::*;
mod subtree;
pub use subtree::*;
