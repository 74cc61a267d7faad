//! Order lifecycle notifications.

use std::fmt;

use crate::error::RejectReason;
use crate::types::price::from_fixed_trimmed;

/// Which command an order notification answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgType {
    CreateOrder,
    CancelOrder,
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MsgType::CreateOrder => "CreateOrder",
            MsgType::CancelOrder => "CancelOrder",
        })
    }
}

/// Order state reported to subscribers.
///
/// `Accepted`, `Rejected` and `Canceled` appear on order notifications;
/// `FilledPartial` and `FilledComplete` describe each side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Accepted,
    Rejected,
    Canceled,
    FilledPartial,
    FilledComplete,
}

impl OrderStatus {
    /// Status of one side of a fill given what it has left.
    #[inline]
    pub fn after_fill(remaining: u64) -> Self {
        if remaining == 0 {
            OrderStatus::FilledComplete
        } else {
            OrderStatus::FilledPartial
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Canceled => "Canceled",
            OrderStatus::FilledPartial => "FilledPartial",
            OrderStatus::FilledComplete => "FilledComplete",
        })
    }
}

/// Acceptance, rejection or cancellation of an order.
///
/// Renders as `msg_type status order_id quantity [reason]`:
///
/// ```
/// use seqbook::error::RejectReason;
/// use seqbook::types::{MsgType, OrderEvent};
///
/// let event = OrderEvent::rejected(MsgType::CancelOrder, 170, 0, RejectReason::OrderNotExists);
/// assert_eq!(event.to_string(), "CancelOrder Rejected 170 0 OrderNotExists");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderEvent {
    pub msg_type: MsgType,
    pub status: OrderStatus,
    pub order_id: u64,
    /// Fixed-point quantity the notification refers to
    pub quantity: u64,
    pub reason: Option<RejectReason>,
}

impl OrderEvent {
    pub fn new(msg_type: MsgType, status: OrderStatus, order_id: u64, quantity: u64) -> Self {
        Self {
            msg_type,
            status,
            order_id,
            quantity,
            reason: None,
        }
    }

    pub fn rejected(msg_type: MsgType, order_id: u64, quantity: u64, reason: RejectReason) -> Self {
        Self {
            msg_type,
            status: OrderStatus::Rejected,
            order_id,
            quantity,
            reason: Some(reason),
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.msg_type,
            self.status,
            self.order_id,
            from_fixed_trimmed(self.quantity)
        )?;
        if let Some(reason) = self.reason {
            write!(f, " {reason:?}")?;
        }
        Ok(())
    }
}
