//! Engine configuration, applied once at construction.

/// Construction-time settings for an [`OrderBook`](crate::engine::OrderBook).
///
/// Only `matching` changes behaviour; the capacities are pre-allocation hints.
///
/// ```
/// use seqbook::engine::EngineConfig;
///
/// let config = EngineConfig::default().with_matching(false).with_order_capacity(10_000);
/// assert!(!config.matching);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// When false, limit orders that would cross the opposite side are
    /// rejected with `NoMatching` instead of trading.
    pub matching: bool,

    /// Pre-allocated arena slots and id-index entries.
    pub order_capacity: usize,

    /// Pre-allocated slots in the triggered-order hand-off queue.
    pub trigger_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matching: true,
            order_capacity: 1024,
            trigger_queue_capacity: 64,
        }
    }
}

impl EngineConfig {
    pub fn with_matching(mut self, matching: bool) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_order_capacity(mut self, capacity: usize) -> Self {
        self.order_capacity = capacity;
        self
    }

    pub fn with_trigger_queue_capacity(mut self, capacity: usize) -> Self {
        self.trigger_queue_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches() {
        let config = EngineConfig::default();
        assert!(config.matching);
        assert_eq!(config.order_capacity, 1024);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_matching(false)
            .with_order_capacity(8)
            .with_trigger_queue_capacity(2);

        assert_eq!(
            config,
            EngineConfig {
                matching: false,
                order_capacity: 8,
                trigger_queue_capacity: 2,
            }
        );
    }
}
