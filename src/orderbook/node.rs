//! Arena node for resting orders.
//!
//! ## Design
//!
//! Every resting order, trading or conditional, lives in the book's
//! `Slab<OrderNode>` and is addressed by its slab key. The node carries the
//! `prev`/`next` keys of its neighbours at the same price, which makes each
//! [`OrderQueue`](crate::orderbook::OrderQueue) an intrusive doubly-linked
//! FIFO:
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! Keys are reused by the slab after removal, so a key is only meaningful
//! while the order is resting.

use crate::types::Order;

/// Slab key of a resting order.
pub type OrderKey = usize;

/// Order node stored in the arena.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order data
    pub order: Order,

    /// Next (newer) order at the same price
    pub next: Option<OrderKey>,

    /// Previous (older) order at the same price
    pub prev: Option<OrderKey>,
}

impl OrderNode {
    /// Create an unlinked node
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Fill up to `quantity` and return what was filled.
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }

    /// Release the node, keeping only the order.
    #[inline]
    pub fn into_order(self) -> Order {
        self.order
    }
}
