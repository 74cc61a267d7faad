//! One side of the book: price-ordered queues of resting orders.
//!
//! ## Design
//!
//! A `PriceLevel` maps a price to the [`OrderQueue`] of orders filed at that
//! price. The same structure backs all four sides of the engine; what differs
//! is which end of the map is "best" and which price an order is filed under:
//!
//! | kind | filed under | best |
//! |---|---|---|
//! | `Bid` | limit price | highest |
//! | `Ask` | limit price | lowest |
//! | `Trigger(Over)` | trigger price | lowest |
//! | `Trigger(Under)` | trigger price | highest |
//!
//! Empty queues are dropped immediately, so the best queue always holds at
//! least one order.
//!
//! ## Matching Walk
//!
//! [`PriceLevel::match_order`] walks from the best price outward, consuming
//! each queue from its head, until the taker is filled, the side is empty, or
//! the next price no longer satisfies the taker's limit.

use std::collections::BTreeMap;

use slab::Slab;
use tracing::trace;

use crate::orderbook::{OrderKey, OrderNode, OrderQueue};
use crate::types::{Order, OrderStatus, Side, Trade, TriggerLevel};

/// Which side of the engine a `PriceLevel` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Bid,
    Ask,
    Trigger(TriggerLevel),
}

impl LevelKind {
    /// True when the best queue is the highest price.
    #[inline]
    fn best_is_highest(self) -> bool {
        matches!(
            self,
            LevelKind::Bid | LevelKind::Trigger(TriggerLevel::Under)
        )
    }

    /// Price an order is filed under on this side.
    #[inline]
    fn key_of(self, order: &Order) -> u64 {
        match self {
            LevelKind::Trigger(_) => order.trig_price,
            LevelKind::Bid | LevelKind::Ask => order.price,
        }
    }
}

/// Whether a taker on `taker_side` limited at `limit` accepts a resting `price`.
#[inline]
pub fn crosses(taker_side: Side, limit: u64, price: u64) -> bool {
    match taker_side {
        Side::Buy => price <= limit,
        Side::Sell => price >= limit,
    }
}

/// Price-ordered collection of order queues for one side.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    kind: LevelKind,
    queues: BTreeMap<u64, OrderQueue>,
    order_count: usize,
}

impl PriceLevel {
    pub fn new(kind: LevelKind) -> Self {
        Self {
            kind,
            queues: BTreeMap::new(),
            order_count: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> LevelKind {
        self.kind
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.order_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Number of distinct prices
    #[inline]
    pub fn level_count(&self) -> usize {
        self.queues.len()
    }

    pub fn best_price(&self) -> Option<u64> {
        if self.kind.best_is_highest() {
            self.queues.last_key_value().map(|(price, _)| *price)
        } else {
            self.queues.first_key_value().map(|(price, _)| *price)
        }
    }

    pub fn best_queue(&self) -> Option<&OrderQueue> {
        if self.kind.best_is_highest() {
            self.queues.values().next_back()
        } else {
            self.queues.values().next()
        }
    }

    /// Slab key of the oldest order at the best price.
    pub fn best_head(&self) -> Option<OrderKey> {
        self.best_queue().and_then(OrderQueue::peek_head)
    }

    pub fn queue(&self, price: u64) -> Option<&OrderQueue> {
        self.queues.get(&price)
    }

    /// Queues from best to worst price.
    pub fn queues_best_first(&self) -> Box<dyn Iterator<Item = &OrderQueue> + '_> {
        if self.kind.best_is_highest() {
            Box::new(self.queues.values().rev())
        } else {
            Box::new(self.queues.values())
        }
    }

    /// Every resting order, best price first and FIFO within a price.
    pub fn orders<'a>(&'a self, arena: &'a Slab<OrderNode>) -> impl Iterator<Item = &'a Order> + 'a {
        self.queues_best_first().flat_map(move |queue| queue.orders(arena))
    }

    /// File an arena order at the tail of its price's queue.
    pub fn append(&mut self, key: OrderKey, arena: &mut Slab<OrderNode>) {
        let price = self.kind.key_of(&arena[key].order);
        self.queues
            .entry(price)
            .or_insert_with(|| OrderQueue::new(price))
            .push_back(key, arena);
        self.order_count += 1;
    }

    /// Unlink an arena order from this side, dropping its queue if it empties.
    /// Returns the order's open quantity, or `None` if its price has no queue here.
    pub fn remove(&mut self, key: OrderKey, arena: &mut Slab<OrderNode>) -> Option<u64> {
        let price = self.kind.key_of(&arena[key].order);
        let queue = self.queues.get_mut(&price)?;
        let quantity = queue.remove(key, arena);
        if queue.is_empty() {
            self.queues.remove(&price);
        }
        self.order_count -= 1;
        Some(quantity)
    }

    /// Open quantity a taker could reach, walking best-first and stopping
    /// once `wanted` is covered or the limit is no longer met.
    pub fn available_depth(&self, taker_side: Side, limit: Option<u64>, wanted: u64) -> u64 {
        let mut total = 0u64;
        for queue in self.queues_best_first() {
            if limit.is_some_and(|limit| !crosses(taker_side, limit, queue.price())) {
                break;
            }
            total = total.saturating_add(queue.total_quantity());
            if total >= wanted {
                break;
            }
        }
        total
    }

    /// Match a taker against this side and return the executed quantity.
    ///
    /// Fills are taken from the head of the best queue at the resting order's
    /// price; `on_trade` sees every fill in execution order. Makers that are
    /// filled completely are unlinked and released from the arena before their
    /// trade is reported.
    pub fn match_order<F>(
        &mut self,
        arena: &mut Slab<OrderNode>,
        taker_id: u64,
        taker_side: Side,
        limit: Option<u64>,
        quantity: u64,
        mut on_trade: F,
    ) -> u64
    where
        F: FnMut(Trade),
    {
        let mut remaining = quantity;

        while remaining > 0 {
            let Some(price) = self.best_price() else {
                break;
            };
            if limit.is_some_and(|limit| !crosses(taker_side, limit, price)) {
                break;
            }
            let Some(queue) = self.queues.get_mut(&price) else {
                break;
            };

            while remaining > 0 {
                let Some(key) = queue.peek_head() else {
                    break;
                };

                let maker = &mut arena[key];
                let traded = maker.fill(remaining);
                let maker_id = maker.order_id();
                let maker_left = maker.remaining();
                remaining -= traded;
                queue.reduce_quantity(traded);

                if maker_left == 0 {
                    queue.remove(key, arena);
                    arena.remove(key);
                    self.order_count -= 1;
                }

                trace!(maker_id, taker_id, traded, price, "fill");
                on_trade(Trade::new(
                    maker_id,
                    taker_id,
                    OrderStatus::after_fill(maker_left),
                    OrderStatus::after_fill(remaining),
                    traded,
                    price,
                ));
            }

            if queue.is_empty() {
                self.queues.remove(&price);
            }
        }

        quantity - remaining
    }

    /// Release every order whose trigger fires at `last_price`, best price
    /// first and FIFO within a price. Only trigger sides ever activate.
    pub fn drain_active<F>(&mut self, last_price: u64, arena: &mut Slab<OrderNode>, mut on_activate: F) -> usize
    where
        F: FnMut(Order),
    {
        let LevelKind::Trigger(trigger) = self.kind else {
            return 0;
        };

        let mut drained = 0;
        while let Some(price) = self.best_price() {
            if !trigger.is_active(price, last_price) {
                break;
            }
            let Some(mut queue) = self.queues.remove(&price) else {
                break;
            };
            while let Some(key) = queue.pop_front(arena) {
                let order = arena.remove(key).into_order();
                self.order_count -= 1;
                drained += 1;
                trace!(order_id = order.id, trig_price = price, last_price, "trigger activated");
                on_activate(order);
            }
        }
        drained
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
