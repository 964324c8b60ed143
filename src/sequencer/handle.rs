/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Producer side of the worker queue.

use super::command::{Command, OrderAction, Request};
use super::receipt::BookReceipt;
use crate::orderbook::{BookError, BookSnapshot, Order};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

/// Cloneable entry point for producers.
///
/// Every method validates the command before it is queued. A command that
/// fails validation never reaches the book.
#[derive(Debug, Clone)]
pub struct BookHandle {
    command_tx: mpsc::Sender<Request>,
}

impl BookHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Request>) -> Self {
        Self { command_tx }
    }

    /// Queues a command, waiting for space while the queue is full.
    ///
    /// Returns once the command is accepted into the queue, before it is
    /// applied.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidOrder`] if the command fails validation
    /// - [`BookError::Shutdown`] if the worker is gone
    pub async fn submit(&self, order: Order, action: OrderAction) -> Result<(), BookError> {
        let request = command_request(order, action, None)?;
        self.command_tx
            .send(request)
            .await
            .map_err(|_| BookError::Shutdown)?;
        trace!(order_id = %order.id(), action = %action, "command queued");
        Ok(())
    }

    /// Same as [`submit`](Self::submit) for producers outside an async
    /// context.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context, as
    /// [`mpsc::Sender::blocking_send`] does.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidOrder`] if the command fails validation
    /// - [`BookError::Shutdown`] if the worker is gone
    pub fn blocking_submit(&self, order: Order, action: OrderAction) -> Result<(), BookError> {
        let request = command_request(order, action, None)?;
        self.command_tx
            .blocking_send(request)
            .map_err(|_| BookError::Shutdown)
    }

    /// Queues a command only if there is space right now.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidOrder`] if the command fails validation
    /// - [`BookError::QueueFull`] if the queue is at capacity
    /// - [`BookError::Shutdown`] if the worker is gone
    pub fn try_submit(&self, order: Order, action: OrderAction) -> Result<(), BookError> {
        let request = command_request(order, action, None)?;
        self.command_tx.try_send(request).map_err(|err| match err {
            TrySendError::Full(_) => BookError::QueueFull,
            TrySendError::Closed(_) => BookError::Shutdown,
        })
    }

    /// Queues a command and waits until the worker has applied it.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidOrder`] if the command fails validation
    /// - [`BookError::Shutdown`] if the worker is gone
    pub async fn submit_and_wait(
        &self,
        order: Order,
        action: OrderAction,
    ) -> Result<BookReceipt, BookError> {
        let (tx, rx) = oneshot::channel();
        let request = command_request(order, action, Some(tx))?;
        self.command_tx
            .send(request)
            .await
            .map_err(|_| BookError::Shutdown)?;
        rx.await.map_err(|_| BookError::Shutdown)
    }

    /// Depth snapshot taken by the worker between two commands.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::Shutdown`] if the worker is gone.
    pub async fn snapshot(&self, depth: usize) -> Result<BookSnapshot, BookError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Request::Snapshot { depth, reply })
            .await
            .map_err(|_| BookError::Shutdown)?;
        rx.await.map_err(|_| BookError::Shutdown)
    }

    /// Commands the queue can still accept without waiting.
    #[must_use]
    pub fn available_capacity(&self) -> usize {
        self.command_tx.capacity()
    }

    /// Returns `true` once the worker has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}

fn command_request(
    order: Order,
    action: OrderAction,
    reply: Option<oneshot::Sender<BookReceipt>>,
) -> Result<Request, BookError> {
    let command = Command::new(order, action);
    command.validate()?;
    Ok(Request::Command { command, reply })
}
