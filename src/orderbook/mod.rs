/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Order book: orders, price ladders and the matching state machine.

pub mod book;
pub mod config;
pub mod dedup;
pub mod error;
pub mod ladder;
pub mod level;
pub mod order;
/// Trade and cancel collaborators, retry policy and dead letters.
pub mod report;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod tests;

pub use book::OrderBook;
pub use config::{BookConfig, DEFAULT_DEDUP_CAPACITY, DEFAULT_QUEUE_CAPACITY};
pub use dedup::IdempotencyIndex;
pub use error::{BookError, ReportError};
pub use ladder::Ladder;
pub use level::PriceLevel;
pub use order::{Order, OrderId, OrderType, Side};
pub use report::{CancelReporter, DeadLetter, DeliveryKind, RetryPolicy, Trade, TradeReporter};
pub use snapshot::{BookSnapshot, LevelSnapshot};
