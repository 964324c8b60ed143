/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Events emitted by the worker after each command.

use super::command::Command;
use super::result::CommandOutcome;
use serde::{Deserialize, Serialize};

/// Emitted to every listener after a command is applied, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEvent {
    /// Monotonically increasing, gap-free sequence number.
    pub sequence_num: u64,

    /// Nanoseconds since the Unix epoch when the command was applied.
    pub timestamp_ns: u64,

    /// The command as it was submitted.
    pub command: Command,

    pub outcome: CommandOutcome,
}

impl BookEvent {
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        command: Command,
        outcome: CommandOutcome,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            command,
            outcome,
        }
    }
}
