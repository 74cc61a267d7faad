//! Book structures used by the matching engine.
//!
//! ## Architecture
//!
//! - **Arena**: every resting order is an [`OrderNode`] in a per-book
//!   `slab::Slab`, addressed by an [`OrderKey`]
//! - **Queues**: an [`OrderQueue`] is the FIFO of orders at one price,
//!   linked through the nodes
//! - **Sides**: a [`PriceLevel`] is a `BTreeMap` of queues for one side
//!   (bid, ask, trigger-over or trigger-under)
//! - **Hand-off**: the [`TriggerQueue`] holds conditional orders between
//!   activation and resubmission
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log p) |
//! | Cancel by key | O(log p) |
//! | Best price | O(log p) |
//! | Match | O(k + l log p) for k fills over l prices |
//!
//! where p is the number of distinct prices on a side.

pub mod level;
pub mod node;
pub mod queue;
pub mod trigger;

pub use level::{crosses, LevelKind, PriceLevel};
pub use node::{OrderKey, OrderNode};
pub use queue::OrderQueue;
pub use trigger::TriggerQueue;
