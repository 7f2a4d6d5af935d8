#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use log::info;
use reactive_bt::{nodes::TreeNode, NodeStatus};

pub fn test_setup() {
    let _ = pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Ordered record of what happened to a set of probes.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Counters shared between a `ProbeNode` and the test observing it.
#[derive(Debug, Default)]
pub struct ProbeStats {
    pub ticks: usize,
    pub resets: usize,
    pub starts: usize,
    pub ends: usize,
}

pub type Stats = Rc<RefCell<ProbeStats>>;

/// Leaf that plays back a script of statuses and records every call.
///
/// The script is indexed by the number of ticks so far, repeating its last
/// entry once exhausted. `reset()` is counted but does not rewind the
/// script, so retries can observe a child changing its answer.
pub struct ProbeNode {
    name: String,
    script: Vec<NodeStatus>,
    stats: Stats,
    log: Option<EventLog>,
}

impl ProbeNode {
    pub fn new(name: &str, script: Vec<NodeStatus>) -> (Self, Stats) {
        assert!(!script.is_empty());
        let stats = Stats::default();
        let node = Self {
            name: name.to_string(),
            script,
            stats: Rc::clone(&stats),
            log: None,
        };
        (node, stats)
    }

    pub fn always(name: &str, status: NodeStatus) -> (Self, Stats) {
        Self::new(name, vec![status])
    }

    pub fn logging_to(mut self, log: &EventLog) -> Self {
        self.log = Some(Rc::clone(log));
        self
    }

    pub fn boxed(self) -> Box<dyn TreeNode> {
        Box::new(self)
    }

    fn record(&self, event: &str) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(format!("{}:{event}", self.name));
        }
    }
}

impl TreeNode for ProbeNode {
    fn tick(&mut self) -> NodeStatus {
        let ticks = self.stats.borrow().ticks;
        let status = self.script[ticks.min(self.script.len() - 1)];
        self.stats.borrow_mut().ticks += 1;
        self.record("tick");

        info!("{} returns {}", self.name, status);

        status
    }

    fn reset(&mut self) {
        self.stats.borrow_mut().resets += 1;
        self.record("reset");
    }

    fn on_start(&mut self) {
        self.stats.borrow_mut().starts += 1;
        self.record("start");
    }

    fn on_end(&mut self) {
        self.stats.borrow_mut().ends += 1;
        self.record("end");
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn ticks(stats: &Stats) -> usize {
    stats.borrow().ticks
}

pub fn resets(stats: &Stats) -> usize {
    stats.borrow().resets
}
