//! # seqbook
//!
//! Deterministic, token-sequenced order matching with stop-loss and
//! take-profit triggers.
//!
//! ## Architecture
//!
//! - **Types**: orders, trades and lifecycle notifications
//! - **OrderBook**: slab-backed price levels and FIFO queues
//! - **Engine**: the sequenced [`OrderBook`] with its notification handlers
//! - **Replay**: scripted command streams and state-root receipts
//!
//! ## Design Principles
//!
//! 1. **Determinism**: every command carries a token that must be exactly one
//!    more than the previous one; identical streams give identical events and
//!    identical state roots
//! 2. **No Floating Point**: all math uses fixed-point arithmetic (10^8 scaling)
//! 3. **Pre-allocated Memory**: slab allocation for O(1) order storage
//! 4. **Synchronous Execution**: notifications are delivered before a command returns

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Trade, OrderEvent
pub mod types;

/// Rejection, sequencing and script errors
pub mod error;

/// Book structures: price levels, queues and the trigger hand-off
pub mod orderbook;

/// The sequenced matching engine
pub mod engine;

/// Scripted command streams
pub mod replay;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{EngineConfig, EventLog, NoopHandler, NotificationHandler, OrderBook};
pub use error::{RejectReason, SequenceError};
pub use types::{MsgType, Order, OrderClass, OrderEvent, OrderFlags, OrderStatus, Side, Trade};
