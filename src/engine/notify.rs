//! Notification sink for order lifecycle and trade events.
//!
//! The engine calls the handler synchronously, in the exact order things
//! happen inside a command: acceptance first, then every fill, including
//! fills of conditional orders released by those fills.

use std::fmt;

use crate::types::{OrderEvent, OrderStatus, Trade};

/// Receives every event the engine produces.
pub trait NotificationHandler {
    /// Order accepted, rejected or canceled.
    fn put_order(&mut self, event: OrderEvent);

    /// One fill between a resting maker and an incoming taker.
    fn put_trade(&mut self, trade: Trade);
}

impl<H: NotificationHandler + ?Sized> NotificationHandler for &mut H {
    fn put_order(&mut self, event: OrderEvent) {
        (**self).put_order(event);
    }

    fn put_trade(&mut self, trade: Trade) {
        (**self).put_trade(trade);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl NotificationHandler for NoopHandler {
    fn put_order(&mut self, _event: OrderEvent) {}

    fn put_trade(&mut self, _trade: Trade) {}
}

/// A recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Order(OrderEvent),
    Trade(Trade),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Order(event) => event.fmt(f),
            Event::Trade(trade) => trade.fmt(f),
        }
    }
}

/// Records every notification in arrival order.
///
/// ```
/// use seqbook::engine::{EventLog, NotificationHandler};
/// use seqbook::types::{MsgType, OrderEvent, OrderStatus};
///
/// let mut log = EventLog::new();
/// log.put_order(OrderEvent::new(MsgType::CreateOrder, OrderStatus::Accepted, 1, 200_000_000));
/// assert_eq!(log.lines(), vec!["CreateOrder Accepted 1 2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Every event rendered as one line of text.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn trades(&self) -> impl Iterator<Item = &Trade> {
        self.events.iter().filter_map(|event| match event {
            Event::Trade(trade) => Some(trade),
            Event::Order(_) => None,
        })
    }

    pub fn rejections(&self) -> impl Iterator<Item = &OrderEvent> {
        self.events.iter().filter_map(|event| match event {
            Event::Order(order) if order.status == OrderStatus::Rejected => Some(order),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl NotificationHandler for EventLog {
    fn put_order(&mut self, event: OrderEvent) {
        self.events.push(Event::Order(event));
    }

    fn put_trade(&mut self, trade: Trade) {
        self.events.push(Event::Trade(trade));
    }
}
