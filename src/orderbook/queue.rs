//! FIFO of orders resting at one exact price.
//!
//! ## Design
//!
//! An `OrderQueue` holds only the queue metadata (head, tail, length, open
//! quantity); the orders themselves live in the arena and are linked through
//! their [`OrderNode`] pointers. The head is always the oldest order, which is
//! what gives price-time priority:
//!
//! - new orders are appended at the tail
//! - matching consumes from the head
//! - a partially filled head keeps its place
//! - any order can be unlinked in O(1) by slab key

use std::iter;

use slab::Slab;

use crate::orderbook::{OrderKey, OrderNode};
use crate::types::Order;

/// Orders at a single price, oldest first.
#[derive(Debug, Clone)]
pub struct OrderQueue {
    /// Key this queue is filed under (limit price, or trigger price on a trigger side)
    price: u64,

    /// Sum of `remaining` over all member orders
    total_quantity: u64,

    head: Option<OrderKey>,
    tail: Option<OrderKey>,
    len: usize,
}

impl OrderQueue {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Oldest order at this price.
    #[inline]
    pub fn peek_head(&self) -> Option<OrderKey> {
        self.head
    }

    /// Append an order at the tail.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the arena.
    pub fn push_back(&mut self, key: OrderKey, arena: &mut Slab<OrderNode>) {
        let node = &mut arena[key];
        let quantity = node.remaining();
        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail) => arena[tail].next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.len += 1;
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    /// Unlink an order and return its open quantity. The node stays in the
    /// arena; releasing it is the caller's job.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the arena.
    pub fn remove(&mut self, key: OrderKey, arena: &mut Slab<OrderNode>) -> u64 {
        let node = &mut arena[key];
        let quantity = node.remaining();
        let prev = node.prev.take();
        let next = node.next.take();

        match prev {
            Some(prev) => arena[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => arena[next].prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
        self.total_quantity = self.total_quantity.saturating_sub(quantity);
        quantity
    }

    /// Unlink the head and return its key.
    pub fn pop_front(&mut self, arena: &mut Slab<OrderNode>) -> Option<OrderKey> {
        let head = self.head?;
        self.remove(head, arena);
        Some(head)
    }

    /// Account for a fill against a member order.
    #[inline]
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity = self.total_quantity.saturating_sub(filled_quantity);
    }

    /// Member orders, oldest first.
    pub fn orders<'a>(&self, arena: &'a Slab<OrderNode>) -> impl Iterator<Item = &'a Order> + 'a {
        iter::successors(self.head.map(|key| &arena[key]), move |node| {
            node.next.map(|key| &arena[key])
        })
        .map(|node| &node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
