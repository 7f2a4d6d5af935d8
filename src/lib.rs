/*!
# reactive-bt

A tick-driven behavior tree interpreter. A host loop calls `tick()` once per
frame; every node answers with one of four statuses, so long-running and
interruptible logic can be written without threads or blocking calls.

| Status | Meaning |
|---|---|
| `Success` / `Failure` | The node finished its current activation. |
| `Running` | More work is immediately available. Tick again. |
| `Sleeping` | Waiting on a timer or an outside condition. Back off until the next frame. |

## Building a tree

Trees are assembled with a [`Builder`]. Composites open a scope closed by
`end()`, decorators wrap the next node added, and `build()` validates the
result:

```
use std::{cell::Cell, rc::Rc, time::Duration};
use reactive_bt::{BehaviorTree, NodeStatus};

let hungry = Rc::new(Cell::new(true));
let eat = Rc::clone(&hungry);
let check = Rc::clone(&hungry);

let mut tree = BehaviorTree::builder()
    .selector()
        .sequence()
            .condition("hungry", move || check.get())
            .retry(3)
            .action("eat", move || {
                eat.set(false);
                NodeStatus::Success
            })
        .end()
        .cooldown(Duration::from_secs(5))
        .log_info(|| "wandering".to_string())
    .end()
    .build()
    .unwrap();

assert_eq!(tree.tick(), NodeStatus::Success);
assert!(!hungry.get());
```

## Custom nodes

Anything implementing [`TreeNode`](nodes::TreeNode) can be added with
`Builder::node()`:

```
use reactive_bt::{nodes::TreeNode, BehaviorTree, NodeStatus};

struct CountDown {
    left: u32,
}

impl TreeNode for CountDown {
    fn tick(&mut self) -> NodeStatus {
        if self.left == 0 {
            return NodeStatus::Success;
        }
        self.left -= 1;
        NodeStatus::Running
    }

    fn reset(&mut self) {
        self.left = 3;
    }

    fn name(&self) -> &str {
        "CountDown"
    }
}

let mut tree = BehaviorTree::builder()
    .node(Box::new(CountDown { left: 3 }))
    .build()
    .unwrap();

assert_eq!(tree.run(), NodeStatus::Success);
```

## Time and randomness

Timer nodes read time from a [`Clock`](clock::Clock) and probabilistic nodes
draw from a [`RandomSource`](random::RandomSource), both carried by the
[`NodeConfig`](nodes::NodeConfig) handed to the builder. Tests typically use
a [`ManualClock`](clock::ManualClock) and a seeded source.
*/

pub mod basic_types;
pub mod clock;
mod macros;
pub mod nodes;
pub mod random;
pub mod timing;
pub mod tree;

// Re-exports for convenience
pub use basic_types::{NodeStatus, ParallelPolicy};
pub use nodes::{NodeConfig, NodeResult};
pub use tree::{BehaviorTree, BuildError, Builder, SharedTree};
