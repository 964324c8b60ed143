/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Receipt returned to a producer once its command has been applied.

use super::result::CommandOutcome;
use serde::{Deserialize, Serialize};

/// Sequence number and outcome of one applied command.
///
/// # Examples
///
/// ```
/// use orderbook_core::{BookReceipt, CommandOutcome, OrderAction, OrderId};
///
/// let receipt = BookReceipt::new(
///     42,
///     CommandOutcome::Duplicate { order_id: OrderId::new(), action: OrderAction::Cancel },
/// );
/// assert_eq!(receipt.sequence_num, 42);
/// assert!(receipt.outcome.is_duplicate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReceipt {
    /// Position of the command in the book's total order, starting at 1.
    pub sequence_num: u64,

    pub outcome: CommandOutcome,
}

impl BookReceipt {
    #[must_use]
    pub fn new(sequence_num: u64, outcome: CommandOutcome) -> Self {
        Self {
            sequence_num,
            outcome,
        }
    }
}
