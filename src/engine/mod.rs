//! The sequenced matching engine.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same token-ordered command stream always produces
//!    the same events and the same final book
//! 2. **Fixed-Point Math**: prices and quantities are scaled `u64`s
//! 3. **Synchronous Execution**: every event of a command is delivered before
//!    the command returns
//! 4. **Price-Time Priority**: best price first, then FIFO
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Trades execute at the resting order's price
//! - Unfilled limit quantity rests unless the order is IoC or FoK
//! - Unfilled market quantity is dropped
//!
//! ## Example
//!
//! ```
//! use seqbook::engine::{EventLog, OrderBook};
//! use seqbook::types::{OrderClass, OrderFlags, Side};
//!
//! let mut book = OrderBook::new(EventLog::new());
//! book.place_order(1, 1, OrderClass::Limit, Side::Buy, 100_000_000, 5_000_000_000, 0, OrderFlags::empty());
//! book.cancel_order(2, 1);
//!
//! assert_eq!(
//!     book.handler().lines(),
//!     vec!["CreateOrder Accepted 1 1", "CancelOrder Canceled 1 1"]
//! );
//! ```

mod book;
mod config;
mod notify;
mod sequencer;

pub use book::OrderBook;
pub use config::EngineConfig;
pub use notify::{Event, EventLog, NoopHandler, NotificationHandler};
pub use sequencer::Sequencer;
