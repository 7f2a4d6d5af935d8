//! Composite nodes that tick an ordered list of children.

mod parallel;
pub use parallel::*;
mod random_selector;
pub use random_selector::*;
mod selector;
pub use selector::*;
mod sequence;
pub use sequence::*;
