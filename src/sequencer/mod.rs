/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Single-writer command sequencing for an [`OrderBook`](crate::OrderBook).
//!
//! # Architecture
//!
//! - Producers submit through cloneable [`BookHandle`]s into one bounded queue
//! - Submitting waits while the queue is full (backpressure)
//! - One worker task owns the book and applies commands in FIFO order
//! - Each command receives a gap-free sequence number starting at 1
//! - Events are emitted to registered listeners in sequence order
//! - Collaborator retries run on the worker, so they hold up the queue

pub mod command;
pub mod core;
pub mod event;
pub mod handle;
pub mod receipt;
pub mod result;

#[cfg(test)]
mod tests;

pub use command::{Command, OrderAction};
pub use core::{Sequencer, SequencerHandle};
pub use event::BookEvent;
pub use handle::BookHandle;
pub use receipt::BookReceipt;
pub use result::CommandOutcome;
