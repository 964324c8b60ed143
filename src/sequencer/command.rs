/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Command types accepted by the book worker.

use crate::orderbook::{BookError, BookSnapshot, Order};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::oneshot;

use super::receipt::BookReceipt;

/// What a command asks the book to do with its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderAction {
    /// Match the order, then rest any limit remainder.
    Create,
    /// Notify the cancel collaborator and remove the order if it rests.
    Cancel,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Cancel => write!(f, "CANCEL"),
        }
    }
}

impl FromStr for OrderAction {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "CANCEL" => Ok(Self::Cancel),
            _ => Err(BookError::UnknownAction(s.to_string())),
        }
    }
}

/// An order paired with the action to apply to it.
///
/// # Examples
///
/// ```
/// use orderbook_core::{Command, Order, OrderAction, OrderId, Side};
///
/// let command = Command::new(Order::limit(OrderId::new(), Side::Bid, 100, 5), OrderAction::Create);
/// assert!(command.validate().is_ok());
///
/// let empty = Command::new(Order::limit(OrderId::new(), Side::Bid, 100, 0), OrderAction::Create);
/// assert!(empty.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub order: Order,
    pub action: OrderAction,
}

impl Command {
    #[must_use]
    pub fn new(order: Order, action: OrderAction) -> Self {
        Self { order, action }
    }

    /// Structural checks applied before a command is queued.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::InvalidOrder`] if the order is malformed, or if a
    /// create carries nothing left to match.
    pub fn validate(&self) -> Result<(), BookError> {
        self.order.validate()?;
        if self.action == OrderAction::Create && self.order.remaining_amount() == 0 {
            return Err(self
                .order
                .invalid("create requires a positive remaining amount"));
        }
        Ok(())
    }
}

/// A request travelling through the worker queue.
pub(crate) enum Request {
    Command {
        command: Command,
        reply: Option<oneshot::Sender<BookReceipt>>,
    },
    Snapshot {
        depth: usize,
        reply: oneshot::Sender<BookSnapshot>,
    },
}
