//! Command token guard.
//!
//! Every command carries a token that must be exactly one more than the last
//! accepted one. The check is a single compare-and-swap, so producers on
//! several threads can race to submit and only the holder of the next token
//! gets through; everyone else gets a [`SequenceError`] and the stream is
//! considered corrupt.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SequenceError;

#[derive(Debug, Default)]
pub struct Sequencer {
    last: AtomicU64,
}

impl Sequencer {
    /// Sequencer expecting token 1 next.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted token (0 before the first command).
    #[inline]
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }

    /// Accept `token` if it is `last + 1`, advancing `last` to it.
    /// A rejected token leaves `last` untouched.
    pub fn advance(&self, token: u64) -> Result<u64, SequenceError> {
        let Some(previous) = token.checked_sub(1) else {
            return Err(SequenceError::OutOfSequence {
                expected: self.last().wrapping_add(1),
                received: token,
            });
        };

        self.last
            .compare_exchange(previous, token, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| token)
            .map_err(|actual| SequenceError::OutOfSequence {
                expected: actual.wrapping_add(1),
                received: token,
            })
    }
}
