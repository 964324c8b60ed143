/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! What applying a command did to the book.

use super::command::OrderAction;
use crate::orderbook::{DeadLetter, OrderId};
use serde::{Deserialize, Serialize};

/// Outcome of applying one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// A create was matched and, if it was a limit order with a remainder,
    /// rested.
    Created {
        order_id: OrderId,
        /// Match steps executed.
        trades: usize,
        /// Whether a remainder now rests in the book.
        rested: bool,
        /// Unmatched market remainder that was dropped.
        discarded_amount: u64,
        /// Trade reports abandoned under a bounded retry policy.
        undelivered: Vec<DeadLetter>,
    },

    /// A cancel was notified and the order, if resting, removed.
    Cancelled {
        order_id: OrderId,
        was_resting: bool,
        undelivered: Vec<DeadLetter>,
    },

    /// The id was already seen for this action; nothing happened.
    Duplicate {
        order_id: OrderId,
        action: OrderAction,
    },
}

impl CommandOutcome {
    #[must_use]
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::Created { order_id, .. }
            | Self::Cancelled { order_id, .. }
            | Self::Duplicate { order_id, .. } => *order_id,
        }
    }

    /// Returns `true` if a create left a remainder resting in the book.
    #[inline]
    #[must_use]
    pub fn is_resting(&self) -> bool {
        matches!(self, Self::Created { rested: true, .. })
    }

    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Deliveries abandoned while applying the command.
    #[must_use]
    pub fn undelivered(&self) -> &[DeadLetter] {
        match self {
            Self::Created { undelivered, .. } | Self::Cancelled { undelivered, .. } => undelivered,
            Self::Duplicate { .. } => &[],
        }
    }
}
