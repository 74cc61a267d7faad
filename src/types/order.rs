//! Order types for the sequenced matching engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so resting orders can be
//! hashed into a state root with a byte layout that never changes between
//! runs. Enum-valued attributes are stored as raw `u8` fields for that reason
//! and exposed through typed accessors.
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (see
//! [`crate::types::price::SCALE`]).

use bitflags::bitflags;
use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderClass enum
// ============================================================================

/// Execution class of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderClass {
    /// Takes whatever the opposite side offers; never rests.
    Market,
    /// Executes at the limit price or better; the remainder may rest.
    #[default]
    Limit,
}

impl OrderClass {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderClass::Market => 0,
            OrderClass::Limit => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderClass::Market),
            1 => Some(OrderClass::Limit),
            _ => None,
        }
    }
}

// ============================================================================
// Flags
// ============================================================================

bitflags! {
    /// Execution and conditional flags carried by an order.
    ///
    /// `STOP_LOSS` / `TAKE_PROFIT` mark a conditional order, `IOC` / `FOK`
    /// forbid posting a remainder, `AON` requires the whole quantity to be
    /// available before any fill happens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OrderFlags: u8 {
        const IOC = 1;
        const AON = 1 << 1;
        const FOK = 1 << 2;
        const STOP_LOSS = 1 << 3;
        const TAKE_PROFIT = 1 << 4;
        const SNAPSHOT = 1 << 5;
    }
}

impl OrderFlags {
    /// Flags that make an order conditional.
    pub const CONDITIONAL: OrderFlags = OrderFlags::STOP_LOSS.union(OrderFlags::TAKE_PROFIT);

    /// Flags that discard an unfilled remainder instead of resting it.
    pub const NO_REST: OrderFlags = OrderFlags::IOC.union(OrderFlags::FOK);

    /// Flags that require the full quantity to be fillable up front.
    pub const ALL_OR_NONE: OrderFlags = OrderFlags::AON.union(OrderFlags::FOK);

    /// The conditional kind encoded in these flags. Stop-loss wins if both
    /// conditional bits are set.
    pub fn trigger_kind(self) -> Option<TriggerKind> {
        if self.contains(OrderFlags::STOP_LOSS) {
            Some(TriggerKind::StopLoss)
        } else if self.contains(OrderFlags::TAKE_PROFIT) {
            Some(TriggerKind::TakeProfit)
        } else {
            None
        }
    }
}

// ============================================================================
// Trigger mapping
// ============================================================================

/// Kind of conditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    StopLoss,
    TakeProfit,
}

/// Which pending-trigger side an order waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerLevel {
    /// Fires once the last price rises to the trigger price.
    Over,
    /// Fires once the last price falls to the trigger price.
    Under,
}

impl TriggerKind {
    /// Pending side for a conditional order of this kind on `side`.
    ///
    /// | kind | side | level |
    /// |---|---|---|
    /// | StopLoss | Buy | Over |
    /// | StopLoss | Sell | Under |
    /// | TakeProfit | Buy | Under |
    /// | TakeProfit | Sell | Over |
    pub fn level(self, side: Side) -> TriggerLevel {
        match (self, side) {
            (TriggerKind::StopLoss, Side::Buy) => TriggerLevel::Over,
            (TriggerKind::StopLoss, Side::Sell) => TriggerLevel::Under,
            (TriggerKind::TakeProfit, Side::Buy) => TriggerLevel::Under,
            (TriggerKind::TakeProfit, Side::Sell) => TriggerLevel::Over,
        }
    }
}

impl TriggerLevel {
    /// Whether an order waiting at `trig_price` fires at `last_price`.
    #[inline]
    pub fn is_active(self, trig_price: u64, last_price: u64) -> bool {
        match self {
            TriggerLevel::Over => last_price >= trig_price,
            TriggerLevel::Under => last_price <= trig_price,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order as seen by the engine.
///
/// Everything except `remaining` is fixed at creation. `quantity` is the
/// quantity the order entered the book with; `remaining` only ever goes down.
///
/// ## SSZ Layout
///
/// 8 (id) + 1 (class) + 1 (side) + 8 (price) + 8 (trig_price) + 8 (quantity)
/// + 8 (remaining) + 1 (flags) = 43 bytes.
///
/// ## Example
///
/// ```
/// use seqbook::types::{Order, OrderClass, OrderFlags, Side};
///
/// let order = Order::new(7, OrderClass::Limit, Side::Sell, 200_000_000, 10_000_000_000, 0, OrderFlags::empty());
/// assert_eq!(order.side(), Side::Sell);
/// assert!(order.trigger_kind().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Externally assigned identifier
    pub id: u64,

    /// Order class as u8 (0=Market, 1=Limit)
    pub class_raw: u8,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in fixed-point; unused for market orders
    pub price: u64,

    /// Trigger price in fixed-point; zero for non-conditional orders
    pub trig_price: u64,

    /// Quantity the order was created with
    pub quantity: u64,

    /// Quantity still open
    pub remaining: u64,

    /// `OrderFlags` bits
    pub flags_raw: u8,
}

impl Order {
    /// Create a new order with its full quantity open.
    pub fn new(
        id: u64,
        class: OrderClass,
        side: Side,
        quantity: u64,
        price: u64,
        trig_price: u64,
        flags: OrderFlags,
    ) -> Self {
        Self {
            id,
            class_raw: class.to_u8(),
            side_raw: side.to_u8(),
            price,
            trig_price,
            quantity,
            remaining: quantity,
            flags_raw: flags.bits(),
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the order class
    pub fn class(&self) -> OrderClass {
        OrderClass::from_u8(self.class_raw).unwrap_or(OrderClass::Limit)
    }

    /// Get the order flags
    pub fn flags(&self) -> OrderFlags {
        OrderFlags::from_bits_truncate(self.flags_raw)
    }

    pub fn trigger_kind(&self) -> Option<TriggerKind> {
        self.flags().trigger_kind()
    }

    /// Pending-trigger side for a conditional order, `None` otherwise.
    pub fn trigger_level(&self) -> Option<TriggerLevel> {
        self.trigger_kind().map(|kind| kind.level(self.side()))
    }

    /// Limit price to match against, `None` for market orders.
    pub fn limit(&self) -> Option<u64> {
        match self.class() {
            OrderClass::Market => None,
            OrderClass::Limit => Some(self.price),
        }
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill up to `fill_qty` of this order and return what was actually filled.
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(id: u64, side: Side, quantity: u64, price: u64) -> Order {
        Order::new(id, OrderClass::Limit, side, quantity, price, 0, OrderFlags::empty())
    }

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::from_u8(Side::Sell.to_u8()), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
        assert_eq!(Side::Buy.opposite(), Side::Sell);
    }

    #[test]
    fn test_class_conversion() {
        assert_eq!(OrderClass::from_u8(OrderClass::Market.to_u8()), Some(OrderClass::Market));
        assert_eq!(OrderClass::from_u8(OrderClass::Limit.to_u8()), Some(OrderClass::Limit));
        assert_eq!(OrderClass::from_u8(9), None);
    }

    #[test]
    fn test_trigger_mapping_table() {
        assert_eq!(TriggerKind::StopLoss.level(Side::Buy), TriggerLevel::Over);
        assert_eq!(TriggerKind::StopLoss.level(Side::Sell), TriggerLevel::Under);
        assert_eq!(TriggerKind::TakeProfit.level(Side::Buy), TriggerLevel::Under);
        assert_eq!(TriggerKind::TakeProfit.level(Side::Sell), TriggerLevel::Over);
    }

    #[test]
    fn test_trigger_activation() {
        assert!(TriggerLevel::Over.is_active(110, 110));
        assert!(TriggerLevel::Over.is_active(110, 120));
        assert!(!TriggerLevel::Over.is_active(110, 100));

        assert!(TriggerLevel::Under.is_active(90, 90));
        assert!(TriggerLevel::Under.is_active(90, 80));
        assert!(!TriggerLevel::Under.is_active(90, 100));
    }

    #[test]
    fn test_flags_trigger_kind() {
        assert_eq!(OrderFlags::empty().trigger_kind(), None);
        assert_eq!(OrderFlags::IOC.trigger_kind(), None);
        assert_eq!(OrderFlags::TAKE_PROFIT.trigger_kind(), Some(TriggerKind::TakeProfit));
        assert_eq!(
            (OrderFlags::STOP_LOSS | OrderFlags::TAKE_PROFIT).trigger_kind(),
            Some(TriggerKind::StopLoss)
        );
        assert!(OrderFlags::NO_REST.contains(OrderFlags::FOK));
        assert!(!OrderFlags::NO_REST.contains(OrderFlags::AON));
    }

    #[test]
    fn test_order_accessors() {
        let order = Order::new(
            3,
            OrderClass::Market,
            Side::Sell,
            500,
            0,
            90,
            OrderFlags::STOP_LOSS,
        );

        assert_eq!(order.class(), OrderClass::Market);
        assert_eq!(order.limit(), None);
        assert_eq!(order.trigger_level(), Some(TriggerLevel::Under));
        assert_eq!(order.remaining, 500);

        let order = limit(4, Side::Buy, 1, 100);
        assert_eq!(order.limit(), Some(100));
        assert_eq!(order.trigger_level(), None);
    }

    #[test]
    fn test_order_fill_never_overfills() {
        let mut order = limit(1, Side::Buy, 100, 10);

        assert_eq!(order.fill(30), 30);
        assert_eq!(order.remaining, 70);
        assert_eq!(order.filled_quantity(), 30);

        assert_eq!(order.fill(200), 70);
        assert_eq!(order.remaining, 0);
        assert!(order.is_filled());
        assert_eq!(order.fill(1), 0);
    }

    #[test]
    fn test_order_ssz_size() {
        let order = limit(1, Side::Buy, 100, 10);
        let bytes = ssz_rs::serialize(&order).expect("Failed to serialize");
        assert_eq!(bytes.len(), 43, "Order should serialize to 43 bytes");
    }
}
