//! Summary of a replayed command stream.

use std::fmt;

use ssz_rs::prelude::*;

/// Outcome of running a batch of commands through a [`Replayer`](crate::replay::Replayer).
///
/// ## State Root
///
/// The 32-byte root is [`OrderBook::state_root`](crate::engine::OrderBook::state_root)
/// taken after the last command. Two replays of the same script agree on it.
///
/// ```
/// use seqbook::replay::ReplayReceipt;
///
/// let receipt = ReplayReceipt::new(1, 3, 3, 1, 0, [0xab; 32]);
/// assert_eq!(receipt.commands(), 3);
/// assert!(receipt.state_root_hex().starts_with("abab"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct ReplayReceipt {
    /// Token of the first command in the batch
    pub first_token: u64,

    /// Token of the last command in the batch
    pub last_token: u64,

    /// Number of commands applied
    pub commands: u64,

    /// Number of trades produced
    pub trades: u64,

    /// Number of rejected place and cancel commands
    pub rejections: u64,

    /// Book state after the batch
    pub state_root: [u8; 32],
}

impl ReplayReceipt {
    pub fn new(
        first_token: u64,
        last_token: u64,
        commands: u64,
        trades: u64,
        rejections: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            first_token,
            last_token,
            commands,
            trades,
            rejections,
            state_root,
        }
    }

    #[inline]
    pub fn commands(&self) -> u64 {
        self.commands
    }

    /// True if no command was applied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands == 0
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}

impl fmt::Display for ReplayReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokens {}..={} commands {} trades {} rejections {} root {}",
            self.first_token,
            self.last_token,
            self.commands,
            self.trades,
            self.rejections,
            self.state_root_hex()
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
