mod nodes;

use std::{cell::Cell, rc::Rc, time::Duration};

use nodes::{resets, ticks, ProbeNode};
use reactive_bt::{
    clock::ManualClock,
    nodes::{
        decorator::{
            CooldownNode, InverterNode, RepeatNode, RetryNode, SleepUntilSuccessNode,
            SuccessRateNode,
        },
        DecoratorNode, TreeNode,
    },
    random::RandomSource,
    BehaviorTree, NodeConfig, NodeStatus,
};

use NodeStatus::{Failure, Running, Sleeping, Success};

fn manual_config(clock: &ManualClock) -> NodeConfig {
    NodeConfig::new()
        .with_clock(clock.clone())
        .with_random(RandomSource::seeded(17))
        .with_jitter_spread(0.0)
}

#[test]
fn decorators_without_child_fail() {
    nodes::test_setup();

    let config = manual_config(&ManualClock::new());

    assert_eq!(InverterNode::new().tick(), Failure);
    assert_eq!(RepeatNode::new(3).tick(), Failure);
    assert_eq!(RetryNode::new(3).tick(), Failure);
    assert_eq!(CooldownNode::new(Duration::from_secs(1), &config).tick(), Failure);
    assert_eq!(SuccessRateNode::new(100.0, &config).tick(), Failure);
    assert_eq!(
        SleepUntilSuccessNode::new(Duration::from_secs(1), &config).tick(),
        Failure
    );
}

#[test]
fn inverter_swaps_terminal_statuses() {
    nodes::test_setup();

    for (input, expected) in [
        (Success, Failure),
        (Failure, Success),
        (Running, Running),
        (Sleeping, Sleeping),
    ] {
        let (probe, _) = ProbeNode::always("child", input);
        assert_eq!(InverterNode::with_child(probe.boxed()).tick(), expected);
    }
}

#[test]
fn repeat_counts_successes() {
    nodes::test_setup();

    let (probe, stats) = ProbeNode::always("child", Success);
    let mut repeat = RepeatNode::new(3).with_child(probe.boxed());

    assert_eq!(repeat.tick(), Running);
    assert_eq!(repeat.tick(), Running);
    assert_eq!(repeat.tick(), Success);
    assert_eq!(ticks(&stats), 3);
    assert_eq!(repeat.repeat_count(), 0);

    // a new activation counts from zero again
    assert_eq!(repeat.tick(), Running);
}

#[test]
fn repeat_stops_on_failure() {
    nodes::test_setup();

    let (probe, stats) = ProbeNode::new("child", vec![Success, Failure]);
    let mut repeat = RepeatNode::new(5).with_child(probe.boxed());

    assert_eq!(repeat.tick(), Running);
    assert_eq!(repeat.tick(), Failure);
    assert_eq!(repeat.repeat_count(), 0);
    assert_eq!(resets(&stats), 2);
}

#[test]
fn repeat_forever_never_completes() {
    nodes::test_setup();

    let (probe, stats) = ProbeNode::new("child", vec![Success, Failure, Running, Success]);
    let mut repeat = RepeatNode::forever().with_child(probe.boxed());

    for _ in 0..10 {
        assert_eq!(repeat.tick(), Running);
    }
    assert_eq!(ticks(&stats), 10);
}

#[test]
fn repeat_forever_passes_sleeping_through() {
    nodes::test_setup();

    let (probe, _) = ProbeNode::always("child", Sleeping);
    let mut repeat = RepeatNode::forever().with_child(probe.boxed());

    assert_eq!(repeat.tick(), Sleeping);
}

#[test]
fn retry_gives_up_after_max_attempts() {
    nodes::test_setup();

    let (probe, stats) = ProbeNode::always("child", Failure);
    let mut tree = BehaviorTree::new(Box::new(RetryNode::new(3).with_child(probe.boxed())));

    assert_eq!(tree.run(), Failure);
    assert_eq!(ticks(&stats), 3);
}

#[test]
fn retry_succeeds_on_second_attempt() {
    nodes::test_setup();

    let (probe, stats) = ProbeNode::new("child", vec![Failure, Success]);
    let mut retry = RetryNode::new(3).with_child(probe.boxed());

    assert_eq!(retry.tick(), Running);
    assert_eq!(retry.try_count(), 1);
    assert_eq!(retry.tick(), Success);
    assert_eq!(retry.try_count(), 0);
    assert_eq!(ticks(&stats), 2);
}

#[test]
fn retry_forever_keeps_trying() {
    nodes::test_setup();

    let mut script = vec![Failure; 10];
    script.push(Success);
    let (probe, stats) = ProbeNode::new("child", script);
    let mut tree = BehaviorTree::new(Box::new(RetryNode::new(0).with_child(probe.boxed())));

    assert_eq!(tree.run(), Success);
    assert_eq!(ticks(&stats), 11);
}

#[test]
fn cooldown_blocks_until_elapsed() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let (probe, stats) = ProbeNode::always("child", Success);
    let mut cooldown =
        CooldownNode::new(Duration::from_millis(1000), &manual_config(&clock)).with_child(probe.boxed());

    assert_eq!(cooldown.tick(), Success);
    assert_eq!(ticks(&stats), 1);

    clock.advance(Duration::from_millis(500));
    assert_eq!(cooldown.tick(), Failure);
    assert_eq!(ticks(&stats), 1);

    clock.advance(Duration::from_millis(500));
    assert_eq!(cooldown.tick(), Success);
    assert_eq!(ticks(&stats), 2);
}

#[test]
fn cooldown_starts_only_when_child_completes() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let (probe, stats) = ProbeNode::new("child", vec![Running, Running, Failure]);
    let mut cooldown =
        CooldownNode::new(Duration::from_secs(1), &manual_config(&clock)).with_child(probe.boxed());

    assert_eq!(cooldown.tick(), Running);
    assert_eq!(cooldown.last_execution(), None);
    clock.advance(Duration::from_millis(100));
    assert_eq!(cooldown.tick(), Running);
    clock.advance(Duration::from_millis(100));
    assert_eq!(cooldown.tick(), Failure);
    assert_eq!(cooldown.last_execution(), Some(Duration::from_millis(200)));

    clock.advance(Duration::from_millis(999));
    assert_eq!(cooldown.tick(), Failure);
    assert_eq!(ticks(&stats), 3);
}

#[test]
fn cooldown_rereads_its_duration() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let window = Rc::new(Cell::new(Duration::from_secs(10)));
    let supplier = Rc::clone(&window);
    let (probe, stats) = ProbeNode::always("child", Success);
    let mut cooldown = CooldownNode::with_supplier(move || supplier.get(), &manual_config(&clock))
        .with_child(probe.boxed());

    assert_eq!(cooldown.tick(), Success);
    clock.advance(Duration::from_secs(1));
    assert_eq!(cooldown.tick(), Failure);

    window.set(Duration::ZERO);
    assert_eq!(cooldown.tick(), Success);
    assert_eq!(ticks(&stats), 2);
}

#[test]
fn cooldown_reset_clears_window() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let (probe, stats) = ProbeNode::always("child", Success);
    let mut cooldown =
        CooldownNode::new(Duration::from_secs(5), &manual_config(&clock)).with_child(probe.boxed());

    assert_eq!(cooldown.tick(), Success);
    cooldown.reset();
    cooldown.reset();
    assert_eq!(cooldown.tick(), Success);
    assert_eq!(ticks(&stats), 2);
}

#[test]
fn success_rate_extremes() {
    nodes::test_setup();

    let config = manual_config(&ManualClock::new());

    let (probe, never) = ProbeNode::always("never", Success);
    let mut gate = SuccessRateNode::new(0.0, &config).with_child(probe.boxed());
    for _ in 0..1000 {
        assert_eq!(gate.tick(), Failure);
    }
    assert_eq!(ticks(&never), 0);

    let (probe, always) = ProbeNode::always("always", Success);
    let mut gate = SuccessRateNode::new(100.0, &config).with_child(probe.boxed());
    for _ in 0..1000 {
        assert_eq!(gate.tick(), Success);
    }
    assert_eq!(ticks(&always), 1000);
}

#[test]
fn success_rate_clamps_out_of_range_values() {
    nodes::test_setup();

    let config = manual_config(&ManualClock::new());

    let (probe, high) = ProbeNode::always("high", Success);
    let mut gate = SuccessRateNode::new(250.0, &config).with_child(probe.boxed());
    for _ in 0..100 {
        gate.tick();
    }
    assert_eq!(ticks(&high), 100);

    let (probe, low) = ProbeNode::always("low", Success);
    let mut gate = SuccessRateNode::new(-20.0, &config).with_child(probe.boxed());
    for _ in 0..100 {
        gate.tick();
    }
    assert_eq!(ticks(&low), 0);

    let (probe, nan) = ProbeNode::always("nan", Success);
    let mut gate = SuccessRateNode::with_supplier(|| f32::NAN, &config).with_child(probe.boxed());
    for _ in 0..100 {
        gate.tick();
    }
    assert_eq!(ticks(&nan), 0);
}

#[test]
fn success_rate_roughly_matches_percentage() {
    nodes::test_setup();

    let config = manual_config(&ManualClock::new());
    let (probe, stats) = ProbeNode::always("child", Success);
    let mut gate = SuccessRateNode::new(50.0, &config).with_child(probe.boxed());

    for _ in 0..1000 {
        gate.tick();
    }

    let invoked = ticks(&stats);
    assert!((400..=600).contains(&invoked), "child ran {invoked} times");
}

#[test]
fn sleep_until_success_retries_child_until_deadline() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let (probe, stats) = ProbeNode::always("child", Failure);
    let mut wait = SleepUntilSuccessNode::new(Duration::from_secs(1), &manual_config(&clock))
        .with_child(probe.boxed());

    assert_eq!(wait.tick(), Sleeping);
    assert_eq!(wait.target(), Some(Duration::from_secs(1)));
    clock.advance(Duration::from_millis(600));
    assert_eq!(wait.tick(), Sleeping);
    assert_eq!(resets(&stats), 2);

    clock.advance(Duration::from_millis(400));
    assert_eq!(wait.tick(), Failure);
    assert_eq!(wait.target(), None);
    assert_eq!(ticks(&stats), 3);
}

#[test]
fn sleep_until_success_finishes_with_child() {
    nodes::test_setup();

    let clock = ManualClock::new();
    let (probe, stats) = ProbeNode::new("child", vec![Failure, Running, Success]);
    let mut wait = SleepUntilSuccessNode::new(Duration::from_secs(1), &manual_config(&clock))
        .with_child(probe.boxed());

    assert_eq!(wait.tick(), Sleeping);
    assert_eq!(wait.tick(), Running);
    assert_eq!(wait.tick(), Success);
    assert_eq!(ticks(&stats), 3);
}

#[test]
fn decorators_expose_their_child() {
    nodes::test_setup();

    let mut retry: Box<dyn DecoratorNode> = Box::new(RetryNode::new(2));
    assert!(retry.child().is_none());
    assert_eq!(retry.tick(), Failure);

    let (probe, stats) = ProbeNode::always("wrapped", Success);
    retry.set_child(probe.boxed());
    assert_eq!(retry.child().map(|child| child.name()), Some("wrapped"));

    let mut node = retry.into_node();
    assert_eq!(node.tick(), Success);
    assert_eq!(ticks(&stats), 1);
}
