//! The order book engine.
//!
//! ## Command Flow
//!
//! 1. The token is checked against the [`Sequencer`]; a gap is fatal.
//! 2. The order is validated; a rejection is reported and nothing changes.
//! 3. Accepted orders either wait on a trigger side (conditional orders whose
//!    condition does not hold yet) or go through the matching path.
//! 4. Whenever the last traded price moves, conditional orders that now
//!    qualify are moved to the [`TriggerQueue`] and resubmitted one by one
//!    through the same matching path until nothing else fires.
//!
//! ## Ownership
//!
//! A resting order is in exactly one place: the arena plus either the
//! trading index and the bid/ask side, or the trigger index and one trigger
//! side. Orders being matched or waiting in the trigger queue are owned
//! values outside the arena.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, error, trace};

use crate::engine::{EngineConfig, NotificationHandler, Sequencer};
use crate::error::{EncodeError, RejectReason};
use crate::orderbook::{crosses, LevelKind, OrderKey, OrderNode, PriceLevel, TriggerQueue};
use crate::types::{
    MsgType, Order, OrderClass, OrderEvent, OrderFlags, OrderStatus, Side, TriggerLevel,
};

/// Deterministic single-book matching engine.
///
/// ## Example
///
/// ```
/// use seqbook::engine::{EventLog, OrderBook};
/// use seqbook::types::{OrderClass, OrderFlags, Side};
///
/// let mut book = OrderBook::new(EventLog::new());
/// book.place_order(1, 10, OrderClass::Limit, Side::Sell, 200, 100, 0, OrderFlags::empty());
/// book.place_order(2, 11, OrderClass::Limit, Side::Buy, 100, 100, 0, OrderFlags::empty());
///
/// assert_eq!(book.last_price(), 100);
/// assert_eq!(book.best_ask(3).map(|o| o.remaining), Some(100));
/// assert_eq!(book.handler().trades().count(), 1);
/// ```
#[derive(Debug)]
pub struct OrderBook<N: NotificationHandler> {
    /// Storage for every resting order
    arena: Slab<OrderNode>,

    bids: PriceLevel,
    asks: PriceLevel,

    /// Conditional orders waiting for the price to rise to them
    trigger_over: PriceLevel,

    /// Conditional orders waiting for the price to fall to them
    trigger_under: PriceLevel,

    /// Resting trading orders: id -> arena key
    orders: HashMap<u64, OrderKey>,

    /// Pending conditional orders: id -> arena key
    trigger_orders: HashMap<u64, OrderKey>,

    trigger_queue: TriggerQueue,

    /// Price of the most recent trade, 0 before the first one
    last_price: u64,

    sequencer: Sequencer,
    config: EngineConfig,
    handler: N,
}

impl<N: NotificationHandler> OrderBook<N> {
    /// Create an engine with the default configuration.
    pub fn new(handler: N) -> Self {
        Self::with_config(handler, EngineConfig::default())
    }

    pub fn with_config(handler: N, config: EngineConfig) -> Self {
        Self {
            arena: Slab::with_capacity(config.order_capacity),
            bids: PriceLevel::new(LevelKind::Bid),
            asks: PriceLevel::new(LevelKind::Ask),
            trigger_over: PriceLevel::new(LevelKind::Trigger(TriggerLevel::Over)),
            trigger_under: PriceLevel::new(LevelKind::Trigger(TriggerLevel::Under)),
            orders: HashMap::with_capacity(config.order_capacity),
            trigger_orders: HashMap::with_capacity(config.order_capacity),
            trigger_queue: TriggerQueue::with_capacity(config.trigger_queue_capacity),
            last_price: 0,
            sequencer: Sequencer::new(),
            config,
            handler,
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Place an order.
    ///
    /// Emits `Accepted` or `Rejected`, then any trades the order causes,
    /// including trades of conditional orders it sets off.
    ///
    /// # Panics
    ///
    /// Panics if `token` is not exactly one more than the last token seen.
    /// Nothing is changed or emitted in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn place_order(
        &mut self,
        token: u64,
        id: u64,
        class: OrderClass,
        side: Side,
        quantity: u64,
        price: u64,
        trig_price: u64,
        flags: OrderFlags,
    ) {
        self.sequence(token);

        let order = Order::new(id, class, side, quantity, price, trig_price, flags);
        if let Err((reason, reported)) = self.validate(&order) {
            debug!(token, id, %reason, "order rejected");
            self.handler
                .put_order(OrderEvent::rejected(MsgType::CreateOrder, id, reported, reason));
            return;
        }

        debug!(token, id, ?class, ?side, quantity, price, trig_price, ?flags, "order accepted");
        self.handler.put_order(OrderEvent::new(
            MsgType::CreateOrder,
            OrderStatus::Accepted,
            id,
            quantity,
        ));

        match order.trigger_level() {
            Some(level) => self.add_trigger_order(order, level),
            None => self.process_order(order),
        }
    }

    /// Cancel a resting or pending order.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-sequence token, like [`OrderBook::place_order`].
    pub fn cancel_order(&mut self, token: u64, id: u64) {
        self.sequence(token);

        match self.remove_resting(id) {
            Some(order) => {
                debug!(token, id, remaining = order.remaining, "order canceled");
                self.handler.put_order(OrderEvent::new(
                    MsgType::CancelOrder,
                    OrderStatus::Canceled,
                    order.id,
                    order.remaining,
                ));
            }
            None => {
                debug!(token, id, "cancel of unknown order");
                self.handler.put_order(OrderEvent::rejected(
                    MsgType::CancelOrder,
                    id,
                    0,
                    RejectReason::OrderNotExists,
                ));
            }
        }
    }

    /// Oldest order at the lowest ask price.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-sequence token.
    pub fn best_ask(&self, token: u64) -> Option<&Order> {
        self.sequence(token);
        self.asks.best_head().map(|key| &self.arena[key].order)
    }

    /// Oldest order at the highest bid price.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-sequence token.
    pub fn best_bid(&self, token: u64) -> Option<&Order> {
        self.sequence(token);
        self.bids.best_head().map(|key| &self.arena[key].order)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn sequence(&self, token: u64) {
        if let Err(err) = self.sequencer.advance(token) {
            error!(%err, last_token = self.sequencer.last(), "command stream out of sequence");
            panic!("{err}");
        }
    }

    /// Rejection reason and the quantity to report with it.
    fn validate(&self, order: &Order) -> Result<(), (RejectReason, u64)> {
        if order.quantity == 0 {
            return Err((RejectReason::InvalidQuantity, order.quantity));
        }

        let class = order.class();
        if order.trigger_kind().is_some() {
            if order.trig_price == 0 {
                return Err((RejectReason::InvalidTriggerPrice, order.quantity));
            }
            if self.contains(order.id) {
                return Err((RejectReason::OrderExists, 0));
            }
        } else if class == OrderClass::Limit {
            if self.contains(order.id) {
                return Err((RejectReason::OrderExists, 0));
            }
            if order.price == 0 {
                return Err((RejectReason::InvalidPrice, 0));
            }
        }

        if !self.config.matching
            && class == OrderClass::Limit
            && self.would_cross(order.side(), order.price)
        {
            return Err((RejectReason::NoMatching, order.quantity));
        }

        Ok(())
    }

    fn would_cross(&self, side: Side, price: u64) -> bool {
        let opposite = match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        };
        opposite
            .best_price()
            .is_some_and(|best| crosses(side, price, best))
    }

    fn contains(&self, id: u64) -> bool {
        self.orders.contains_key(&id) || self.trigger_orders.contains_key(&id)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Run an order and everything it sets off through the matching path.
    fn process_order(&mut self, order: Order) {
        let mut next = Some(order);
        while let Some(order) = next {
            let last_price = self.last_price;
            self.execute(order);
            if self.last_price != last_price {
                self.queue_triggered();
            }
            next = self.trigger_queue.pop();
        }
    }

    /// Match one order against the opposite side and rest or drop what is left.
    fn execute(&mut self, order: Order) {
        let side = order.side();
        let flags = order.flags();
        let limit = order.limit();
        let wanted = order.remaining;

        let Self {
            arena,
            bids,
            asks,
            orders,
            handler,
            last_price,
            ..
        } = self;
        let (opposite, own) = match side {
            Side::Buy => (asks, bids),
            Side::Sell => (bids, asks),
        };

        let executed = if flags.intersects(OrderFlags::ALL_OR_NONE)
            && opposite.available_depth(side, limit, wanted) < wanted
        {
            // a short all-or-none limit may only rest where it does not cross
            let crossing = limit.is_some_and(|price| {
                opposite
                    .best_price()
                    .is_some_and(|best| crosses(side, price, best))
            });
            if crossing {
                debug!(order_id = order.id, wanted, "all-or-none order would cross, discarded");
                return;
            }
            debug!(order_id = order.id, wanted, "not enough depth for all-or-none order");
            0
        } else {
            opposite.match_order(arena, order.id, side, limit, wanted, |trade| {
                if trade.maker_done() {
                    orders.remove(&trade.maker_order_id);
                }
                *last_price = trade.price;
                handler.put_trade(trade);
            })
        };

        let remaining = wanted - executed;
        if remaining == 0 {
            return;
        }

        match limit {
            Some(price) if !flags.intersects(OrderFlags::NO_REST) => {
                let rest = Order::new(
                    order.id,
                    OrderClass::Limit,
                    side,
                    remaining,
                    price,
                    0,
                    flags.difference(OrderFlags::CONDITIONAL | OrderFlags::AON),
                );
                let key = arena.insert(OrderNode::new(rest));
                own.append(key, arena);
                orders.insert(order.id, key);
                trace!(order_id = order.id, remaining, price, "remainder rested");
            }
            Some(_) => debug!(order_id = order.id, remaining, "unfilled remainder discarded"),
            None => debug!(order_id = order.id, remaining, "market order remainder dropped"),
        }
    }

    // ========================================================================
    // Conditional Orders
    // ========================================================================

    fn add_trigger_order(&mut self, order: Order, level: TriggerLevel) {
        if level.is_active(order.trig_price, self.last_price) {
            trace!(
                order_id = order.id,
                trig_price = order.trig_price,
                last_price = self.last_price,
                "trigger active on entry"
            );
            self.process_order(order);
            return;
        }

        let id = order.id;
        let key = self.arena.insert(OrderNode::new(order));
        let pending = match level {
            TriggerLevel::Over => &mut self.trigger_over,
            TriggerLevel::Under => &mut self.trigger_under,
        };
        pending.append(key, &mut self.arena);
        self.trigger_orders.insert(id, key);
    }

    /// Move every conditional order that fires at the current last price to
    /// the back of the trigger queue.
    fn queue_triggered(&mut self) {
        let last_price = self.last_price;
        if last_price == 0 {
            return;
        }

        let Self {
            arena,
            trigger_over,
            trigger_under,
            trigger_orders,
            trigger_queue,
            ..
        } = self;
        for pending in [trigger_over, trigger_under] {
            pending.drain_active(last_price, arena, |order| {
                trigger_orders.remove(&order.id);
                trigger_queue.push(order);
            });
        }
    }

    /// Take a resting or pending order out of the book.
    fn remove_resting(&mut self, id: u64) -> Option<Order> {
        if let Some(key) = self.orders.remove(&id) {
            let level = match self.arena[key].order.side() {
                Side::Buy => &mut self.bids,
                Side::Sell => &mut self.asks,
            };
            level.remove(key, &mut self.arena);
            return Some(self.arena.remove(key).into_order());
        }

        let key = *self.trigger_orders.get(&id)?;
        let level = self.arena[key].order.trigger_level()?;
        self.trigger_orders.remove(&id);
        let pending = match level {
            TriggerLevel::Over => &mut self.trigger_over,
            TriggerLevel::Under => &mut self.trigger_under,
        };
        pending.remove(key, &mut self.arena);
        Some(self.arena.remove(key).into_order())
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// Look up a resting order, then a pending conditional order, by id.
    pub fn order(&self, id: u64) -> Option<&Order> {
        self.orders
            .get(&id)
            .or_else(|| self.trigger_orders.get(&id))
            .map(|&key| &self.arena[key].order)
    }

    #[inline]
    pub fn last_price(&self) -> u64 {
        self.last_price
    }

    #[inline]
    pub fn last_token(&self) -> u64 {
        self.sequencer.last()
    }

    /// Number of resting trading orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of conditional orders waiting on a trigger
    #[inline]
    pub fn pending_trigger_count(&self) -> usize {
        self.trigger_orders.len()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// Resting side for `side`.
    pub fn side(&self, side: Side) -> &PriceLevel {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Up to `levels` `(price, open quantity)` pairs, best price first.
    pub fn depth(&self, side: Side, levels: usize) -> Vec<(u64, u64)> {
        self.side(side)
            .queues_best_first()
            .take(levels)
            .map(|queue| (queue.price(), queue.total_quantity()))
            .collect()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn handler(&self) -> &N {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut N {
        &mut self.handler
    }

    pub fn into_handler(self) -> N {
        self.handler
    }

    /// SHA-256 over every resting and pending order plus the last price and
    /// token. Two engines fed the same command stream have the same root.
    pub fn state_root(&self) -> Result<[u8; 32], EncodeError> {
        let mut hasher = Sha256::new();

        for level in [&self.bids, &self.asks, &self.trigger_over, &self.trigger_under] {
            hasher.update((level.len() as u64).to_le_bytes());
            for order in level.orders(&self.arena) {
                let bytes = ssz_rs::serialize(order).map_err(|err| EncodeError {
                    order_id: order.id,
                    message: format!("{err:?}"),
                })?;
                hasher.update(&bytes);
            }
        }
        hasher.update(self.last_price.to_le_bytes());
        hasher.update(self.last_token().to_le_bytes());

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
