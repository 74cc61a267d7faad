//! Error types.
//!
//! Two very different failure classes live here:
//!
//! - [`RejectReason`]: a single command was refused. The book is untouched and
//!   the reason travels to subscribers inside an [`OrderEvent`](crate::types::OrderEvent).
//! - [`SequenceError`]: the command stream itself is out of order. The engine
//!   refuses to continue and panics with this error's message.

use thiserror::Error;

/// Why a place or cancel command was rejected.
///
/// Event text carries the variant name, as printed by `Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectReason {
    #[error("order quantity must be greater than zero")]
    InvalidQuantity,

    #[error("limit price must be greater than zero")]
    InvalidPrice,

    #[error("conditional order requires a trigger price")]
    InvalidTriggerPrice,

    #[error("order id is already resting in the book")]
    OrderExists,

    #[error("order id is not resting in the book")]
    OrderNotExists,

    #[error("order would cross the book while matching is disabled")]
    NoMatching,
}

/// A command arrived with a token other than `last + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("invalid token {received} received (expected {expected}): cannot maintain determinism")]
    OutOfSequence { expected: u64, received: u64 },
}

/// Failure to encode book state for the state root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode order {order_id}: {message}")]
pub struct EncodeError {
    pub order_id: u64,
    pub message: String,
}

/// Failure to read or parse a replay script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: expected {expected}, found {found:?}")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
