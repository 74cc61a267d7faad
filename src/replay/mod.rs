//! Replay of scripted command streams.
//!
//! A [`Replayer`] owns an [`OrderBook`] and hands out tokens itself, so a
//! script only lists commands. After a run it produces a [`ReplayReceipt`]
//! whose state root can be compared across machines or runs.
//!
//! ```
//! use seqbook::engine::EventLog;
//! use seqbook::replay::{parse_script, Replayer};
//!
//! let commands = parse_script("1 L S 2 100 0 N\n2 L B 1 100 0 N\n").unwrap();
//! let mut replayer = Replayer::new(EventLog::new());
//! let receipt = replayer.run(&commands).unwrap();
//!
//! assert_eq!(receipt.commands, 2);
//! assert_eq!(receipt.trades, 1);
//! assert_eq!(replayer.handler().lines()[2], "1 2 FilledPartial FilledComplete 1 100");
//! ```

mod receipt;
mod script;

pub use receipt::ReplayReceipt;
pub use script::{parse_script, Command};

use crate::engine::{EngineConfig, NotificationHandler, OrderBook};
use crate::error::EncodeError;
use crate::types::{Order, OrderEvent, OrderStatus, Trade};

/// Forwards every notification and counts trades and rejections.
#[derive(Debug, Default)]
pub struct Counting<N> {
    inner: N,
    trades: u64,
    rejections: u64,
}

impl<N> Counting<N> {
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            trades: 0,
            rejections: 0,
        }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut N {
        &mut self.inner
    }

    pub fn trades(&self) -> u64 {
        self.trades
    }

    pub fn rejections(&self) -> u64 {
        self.rejections
    }
}

impl<N: NotificationHandler> NotificationHandler for Counting<N> {
    fn put_order(&mut self, event: OrderEvent) {
        if event.status == OrderStatus::Rejected {
            self.rejections += 1;
        }
        self.inner.put_order(event);
    }

    fn put_trade(&mut self, trade: Trade) {
        self.trades += 1;
        self.inner.put_trade(trade);
    }
}

/// Drives an [`OrderBook`] from [`Command`]s, assigning consecutive tokens.
#[derive(Debug)]
pub struct Replayer<N: NotificationHandler> {
    book: OrderBook<Counting<N>>,
    first_token: u64,
    commands: u64,
}

impl<N: NotificationHandler> Replayer<N> {
    pub fn new(handler: N) -> Self {
        Self::with_config(handler, EngineConfig::default())
    }

    pub fn with_config(handler: N, config: EngineConfig) -> Self {
        let book = OrderBook::with_config(Counting::new(handler), config);
        let first_token = book.last_token() + 1;
        Self {
            book,
            first_token,
            commands: 0,
        }
    }

    /// Token the next command will carry.
    #[inline]
    pub fn next_token(&self) -> u64 {
        self.book.last_token() + 1
    }

    /// Apply one command. Best-price queries return a copy of the order found.
    pub fn apply(&mut self, command: &Command) -> Option<Order> {
        let token = self.next_token();
        self.commands += 1;

        match *command {
            Command::Place {
                id,
                class,
                side,
                quantity,
                price,
                trig_price,
                flags,
            } => {
                self.book
                    .place_order(token, id, class, side, quantity, price, trig_price, flags);
                None
            }
            Command::Cancel { id } => {
                self.book.cancel_order(token, id);
                None
            }
            Command::BestAsk => self.book.best_ask(token).cloned(),
            Command::BestBid => self.book.best_bid(token).cloned(),
        }
    }

    /// Apply every command in order and summarise the replayer's whole history.
    pub fn run(&mut self, commands: &[Command]) -> Result<ReplayReceipt, EncodeError> {
        for command in commands {
            self.apply(command);
        }
        self.receipt()
    }

    /// Summary of everything applied since construction.
    pub fn receipt(&self) -> Result<ReplayReceipt, EncodeError> {
        let counts = self.book.handler();
        Ok(ReplayReceipt::new(
            self.first_token,
            self.book.last_token(),
            self.commands,
            counts.trades(),
            counts.rejections(),
            self.book.state_root()?,
        ))
    }

    pub fn book(&self) -> &OrderBook<Counting<N>> {
        &self.book
    }

    pub fn handler(&self) -> &N {
        self.book.handler().inner()
    }

    pub fn handler_mut(&mut self) -> &mut N {
        self.book.handler_mut().inner_mut()
    }

    pub fn into_handler(self) -> N {
        self.book.into_handler().inner
    }
}
