/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types for the order book.

use super::order::OrderId;
use thiserror::Error;

/// Errors returned by the order book's public surface.
///
/// Malformed commands are reported to the caller through this type instead
/// of aborting the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// The order violates a structural invariant.
    #[error("invalid order {order_id}: {reason}")]
    InvalidOrder {
        /// Id of the offending order.
        order_id: OrderId,
        /// What was wrong with it.
        reason: String,
    },

    /// A side string did not name a known side.
    #[error("unknown side: {0}")]
    UnknownSide(String),

    /// An order type string did not name a known type.
    #[error("unknown order type: {0}")]
    UnknownOrderType(String),

    /// An action string did not name a known action.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The order cannot rest in this ladder (market order, nothing
    /// remaining, or wrong side).
    #[error("order {order_id} cannot rest: {reason}")]
    NotRestable {
        /// Id of the rejected order.
        order_id: OrderId,
        /// Why it was rejected.
        reason: String,
    },

    /// An order with the same id is already resting.
    #[error("order {0} is already resting")]
    DuplicateResting(OrderId),

    /// The command queue is full and the caller asked not to wait.
    #[error("command queue is full")]
    QueueFull,

    /// The worker is no longer receiving commands.
    #[error("order book worker has shut down")]
    Shutdown,

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failure reported by an external collaborator.
///
/// Collaborator failures are transient from the book's point of view: the
/// delivery is retried according to the configured
/// [`RetryPolicy`](super::RetryPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("collaborator failed: {message}")]
pub struct ReportError {
    message: String,
}

impl ReportError {
    /// Creates a new collaborator error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The collaborator's description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
