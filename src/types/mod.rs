//! Core data types for the sequenced matching engine.
//!
//! ## Types
//!
//! - [`Order`]: an order with its immutable attributes and open quantity
//! - [`Side`], [`OrderClass`], [`OrderFlags`]: order attributes
//! - [`TriggerKind`], [`TriggerLevel`]: conditional order mapping
//! - [`Trade`]: a fill between a maker and a taker
//! - [`OrderEvent`], [`OrderStatus`], [`MsgType`]: lifecycle notifications
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and quantities are stored as `u64` scaled by 10^8.
//! Example: 50000.12345678 is stored as 5_000_012_345_678u64

mod event;
mod order;
mod trade;
pub mod price;

pub use event::{MsgType, OrderEvent, OrderStatus};
pub use order::{Order, OrderClass, OrderFlags, Side, TriggerKind, TriggerLevel};
pub use trade::Trade;
