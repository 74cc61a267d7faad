//! Shared harness for the integration tests.

#![allow(dead_code)]

use seqbook::engine::{EngineConfig, EventLog};
use seqbook::replay::{parse_script, Command, Replayer};
use seqbook::types::Order;

/// Five bids (ids 1-5, 50..90) and five asks (ids 6-10, 100..140), 2 each.
pub const DEPTH: &str = "
    # add depth to the orderbook
    1   L B 2 50  0 N
    2   L B 2 60  0 N
    3   L B 2 70  0 N
    4   L B 2 80  0 N
    5   L B 2 90  0 N
    6   L S 2 100 0 N
    7   L S 2 110 0 N
    8   L S 2 120 0 N
    9   L S 2 130 0 N
    10  L S 2 140 0 N
";

/// The same depth with every id prefixed by `prefix`.
pub fn depth_with_prefix(prefix: u64) -> String {
    DEPTH
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}

pub struct Harness {
    pub replayer: Replayer<EventLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            replayer: Replayer::with_config(EventLog::new(), config),
        }
    }

    /// A book loaded with [`DEPTH`] and an empty event log.
    pub fn with_depth() -> Self {
        let mut harness = Self::new();
        harness.run(DEPTH);
        harness.reset();
        harness
    }

    pub fn run(&mut self, script: &str) {
        let commands = parse_script(script).expect("test script should parse");
        for command in &commands {
            self.replayer.apply(command);
        }
    }

    pub fn best_ask(&mut self) -> Option<Order> {
        self.replayer.apply(&Command::BestAsk)
    }

    pub fn best_bid(&mut self) -> Option<Order> {
        self.replayer.apply(&Command::BestBid)
    }

    pub fn reset(&mut self) {
        self.replayer.handler_mut().clear();
    }

    pub fn lines(&self) -> Vec<String> {
        self.replayer.handler().lines()
    }

    pub fn verify(&self, expected: &[&str]) {
        assert_eq!(self.lines(), expected);
    }
}
