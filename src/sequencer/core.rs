/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! The single worker that owns an [`OrderBook`].
//!
//! Producers hold [`BookHandle`]s that feed one bounded queue. The worker
//! drains it in FIFO order, so acceptance into the queue is the order in
//! which commands take effect.

use super::command::{Command, Request};
use super::event::BookEvent;
use super::handle::BookHandle;
use super::receipt::BookReceipt;
use crate::orderbook::OrderBook;
use crate::utils::nanos_since_epoch;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&BookEvent) + Send + Sync>;

/// Owns an [`OrderBook`] and applies queued commands to it one at a time.
///
/// Take every [`BookHandle`] you need before calling [`spawn`](Self::spawn):
/// the worker stops once all handles are dropped.
///
/// # Examples
///
/// ```
/// use orderbook_core::{
///     BookConfig, Order, OrderAction, OrderBook, OrderId, ReportError, Sequencer, Side, Trade,
/// };
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let book = OrderBook::new(
///     BookConfig::new("BTC/USD"),
///     |_: &Trade| -> Result<(), ReportError> { Ok(()) },
///     |_: &Order| -> Result<(), ReportError> { Ok(()) },
/// );
/// let sequencer = Sequencer::new(book);
/// let handle = sequencer.handle();
/// let worker = sequencer.spawn();
///
/// let order = Order::limit(OrderId::new(), Side::Bid, 100, 5);
/// let receipt = handle.submit_and_wait(order, OrderAction::Create).await?;
/// assert_eq!(receipt.sequence_num, 1);
/// assert!(receipt.outcome.is_resting());
///
/// drop(handle);
/// worker.wait().await?;
/// # Ok(())
/// # }
/// ```
pub struct Sequencer {
    book: OrderBook,
    command_tx: mpsc::Sender<Request>,
    command_rx: mpsc::Receiver<Request>,
    event_listeners: Vec<EventListener>,
}

impl Sequencer {
    /// Wraps `book`, sizing the queue from its configuration.
    #[must_use]
    pub fn new(book: OrderBook) -> Self {
        let capacity = book.config().queue_capacity;
        Self::with_capacity(book, capacity)
    }

    /// Wraps `book` with an explicit queue capacity (minimum 1).
    #[must_use]
    pub fn with_capacity(book: OrderBook, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity.max(1));

        Self {
            book,
            command_tx,
            command_rx,
            event_listeners: Vec::new(),
        }
    }

    /// Registers an event listener.
    ///
    /// Listeners run on the worker, in registration order, before the
    /// producer's receipt is sent.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&BookEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Returns a new producer handle.
    #[must_use]
    pub fn handle(&self) -> BookHandle {
        BookHandle::new(self.command_tx.clone())
    }

    /// Spawns [`run`](Self::run) on the current tokio runtime.
    #[must_use]
    pub fn spawn(self) -> SequencerHandle {
        let handle = tokio::spawn(self.run());
        SequencerHandle { handle }
    }

    /// Applies queued requests until every handle is dropped and the queue
    /// is drained. Returns the book in its final state.
    pub async fn run(self) -> OrderBook {
        let Self {
            mut book,
            command_tx,
            mut command_rx,
            event_listeners,
        } = self;
        // Only external handles keep the queue open.
        drop(command_tx);

        info!(symbol = %book.symbol(), "order book worker started");
        let mut last_sequence = 0u64;

        while let Some(request) = command_rx.recv().await {
            match request {
                Request::Command { command, reply } => {
                    last_sequence += 1;
                    let event = apply(&mut book, last_sequence, command).await;
                    for listener in &event_listeners {
                        listener(&event);
                    }
                    if let Some(reply) = reply {
                        // The producer may have stopped waiting.
                        let _ = reply.send(BookReceipt::new(last_sequence, event.outcome));
                    }
                }
                Request::Snapshot { depth, reply } => {
                    let mut snapshot = book.snapshot(depth);
                    snapshot.sequence_num = last_sequence;
                    let _ = reply.send(snapshot);
                }
            }
        }

        info!(
            symbol = %book.symbol(),
            last_sequence,
            "order book worker stopped"
        );
        book
    }
}

async fn apply(book: &mut OrderBook, sequence: u64, command: Command) -> BookEvent {
    let outcome = book.apply(&command).await;
    debug!(
        sequence,
        order_id = %command.order.id(),
        action = %command.action,
        duplicate = outcome.is_duplicate(),
        "command applied"
    );
    BookEvent::new(sequence, nanos_since_epoch(), command, outcome)
}

/// Handle to a spawned worker task.
pub struct SequencerHandle {
    handle: tokio::task::JoinHandle<OrderBook>,
}

impl SequencerHandle {
    /// Waits for the worker to stop.
    ///
    /// # Errors
    ///
    /// Returns the join error if the worker task panicked or was aborted.
    pub async fn wait(self) -> Result<(), tokio::task::JoinError> {
        self.handle.await.map(drop)
    }

    /// Waits for the worker to stop and returns its book.
    ///
    /// # Errors
    ///
    /// Returns the join error if the worker task panicked or was aborted.
    pub async fn join(self) -> Result<OrderBook, tokio::task::JoinError> {
        self.handle.await
    }
}
