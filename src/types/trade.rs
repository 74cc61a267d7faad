//! Trade type representing an executed match between two orders.

use std::fmt;

use crate::types::event::OrderStatus;
use crate::types::price::from_fixed_trimmed;

/// A trade represents a single match between a maker and taker order.
///
/// ## Terminology
///
/// - **Maker**: The resting order that was already in the book
/// - **Taker**: The incoming order that triggered the match
///
/// ## Price Discovery
///
/// The trade always executes at the maker's price (the resting order's price).
///
/// ## Display
///
/// Renders as `maker taker maker_status taker_status quantity price`, with
/// quantity and price as trimmed decimals:
///
/// ```
/// use seqbook::types::{OrderStatus, Trade};
///
/// let trade = Trade::new(
///     6,
///     1100,
///     OrderStatus::FilledPartial,
///     OrderStatus::FilledComplete,
///     100_000_000,
///     10_000_000_000,
/// );
/// assert_eq!(trade.to_string(), "6 1100 FilledPartial FilledComplete 1 100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trade {
    /// Maker order ID (the resting order)
    pub maker_order_id: u64,

    /// Taker order ID (the incoming order)
    pub taker_order_id: u64,

    /// Maker state after this fill
    pub maker_status: OrderStatus,

    /// Taker state after this fill
    pub taker_status: OrderStatus,

    /// Executed quantity in fixed-point
    pub quantity: u64,

    /// Execution price in fixed-point (always the maker's price)
    pub price: u64,
}

impl Trade {
    pub fn new(
        maker_order_id: u64,
        taker_order_id: u64,
        maker_status: OrderStatus,
        taker_status: OrderStatus,
        quantity: u64,
        price: u64,
    ) -> Self {
        Self {
            maker_order_id,
            taker_order_id,
            maker_status,
            taker_status,
            quantity,
            price,
        }
    }

    /// Notional value (price * quantity), scaled by 10^16.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }

    /// Whether this fill closed out the resting order.
    #[inline]
    pub fn maker_done(&self) -> bool {
        self.maker_status == OrderStatus::FilledComplete
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.maker_order_id,
            self.taker_order_id,
            self.maker_status,
            self.taker_status,
            from_fixed_trimmed(self.quantity),
            from_fixed_trimmed(self.price),
        )
    }
}
