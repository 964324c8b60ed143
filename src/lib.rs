/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # orderbook-core
//!
//! Single-instrument limit order book with price-time priority matching,
//! driven by one worker task behind a bounded command queue.
//!
//! ## Features
//!
//! - **Price-time priority**: best price first, oldest first within a price
//! - **Limit and market orders**: limit remainders rest, market remainders
//!   are discarded
//! - **Idempotent commands**: each order id is applied at most once per
//!   action, with a bounded memory of seen ids
//! - **Single writer**: producers submit through cloneable handles; one
//!   worker owns all book state, so nothing is locked
//! - **Backpressure**: submitting waits while the queue is full
//! - **Reliable reporting**: trade and cancel collaborators are retried until
//!   they accept, or dead-lettered under a bounded policy
//! - **Events and snapshots**: sequenced events for listeners and
//!   checksummed depth snapshots
//!
//! ## Example
//!
//! ```
//! use orderbook_core::{
//!     BookConfig, Order, OrderAction, OrderBook, OrderId, ReportError, Sequencer, Side, Trade,
//! };
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let trades = Arc::new(Mutex::new(Vec::new()));
//! let sink = trades.clone();
//! let book = OrderBook::new(
//!     BookConfig::new("BTC/USD"),
//!     move |trade: &Trade| -> Result<(), ReportError> {
//!         sink.lock().unwrap().push(*trade);
//!         Ok(())
//!     },
//!     |_: &Order| -> Result<(), ReportError> { Ok(()) },
//! );
//!
//! let sequencer = Sequencer::new(book);
//! let handle = sequencer.handle();
//! let worker = sequencer.spawn();
//!
//! handle
//!     .submit(Order::limit(OrderId::new(), Side::Bid, 10, 5), OrderAction::Create)
//!     .await?;
//! handle
//!     .submit_and_wait(Order::limit(OrderId::new(), Side::Ask, 10, 3), OrderAction::Create)
//!     .await?;
//!
//! let snapshot = handle.snapshot(10).await?;
//! assert_eq!(snapshot.best_bid(), Some(10));
//! assert_eq!(snapshot.bids[0].total_amount, 2);
//! assert_eq!(trades.lock().unwrap()[0].amount, 3);
//!
//! drop(handle);
//! worker.wait().await?;
//! # Ok(())
//! # }
//! ```

pub mod orderbook;
pub mod sequencer;
mod utils;

pub use orderbook::{
    BookConfig, BookError, BookSnapshot, CancelReporter, DeadLetter, DeliveryKind, Ladder,
    LevelSnapshot, Order, OrderBook, OrderId, OrderType, ReportError, RetryPolicy, Side, Trade,
    TradeReporter,
};
pub use sequencer::{
    BookEvent, BookHandle, BookReceipt, Command, CommandOutcome, OrderAction, Sequencer,
    SequencerHandle,
};
pub use utils::nanos_since_epoch;
