//! Nodes that wrap a single child and transform or gate its result.

mod cooldown;
pub use cooldown::*;
mod inverter;
pub use inverter::*;
mod repeat;
pub use repeat::*;
mod retry;
pub use retry::*;
mod sleep_until_success;
pub use sleep_until_success::*;
mod success_rate;
pub use success_rate::*;
