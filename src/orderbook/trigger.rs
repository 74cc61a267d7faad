//! Hand-off queue for conditional orders that have just fired.
//!
//! Activated orders leave their trigger side and wait here, in activation
//! order, until the engine resubmits them to the matching path. While queued
//! they are owned values, not arena entries.

use std::collections::VecDeque;

use crate::types::Order;

/// Plain FIFO of triggered orders.
#[derive(Debug, Clone, Default)]
pub struct TriggerQueue {
    orders: VecDeque<Order>,
}

impl TriggerQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: VecDeque::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
