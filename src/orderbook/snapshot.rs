/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Point-in-time views of the book.

use super::error::BookError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Aggregate of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Level price in ticks.
    pub price: u128,
    /// Sum of remaining amounts resting at this price.
    pub total_amount: u64,
    /// Number of resting orders at this price.
    pub order_count: usize,
}

/// Depth view of both ladders, best level first on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Instrument symbol.
    pub symbol: String,
    /// Sequence number of the last command applied before the snapshot.
    pub sequence_num: u64,
    /// Nanosecond timestamp at which the snapshot was taken.
    pub timestamp_ns: u64,
    /// Ask levels, lowest price first.
    pub asks: Vec<LevelSnapshot>,
    /// Bid levels, highest price first.
    pub bids: Vec<LevelSnapshot>,
}

#[derive(Serialize)]
struct ChecksumView<'a> {
    symbol: &'a str,
    asks: &'a [LevelSnapshot],
    bids: &'a [LevelSnapshot],
}

impl BookSnapshot {
    #[must_use]
    pub fn best_ask(&self) -> Option<u128> {
        self.asks.first().map(|l| l.price)
    }

    #[must_use]
    pub fn best_bid(&self) -> Option<u128> {
        self.bids.first().map(|l| l.price)
    }

    /// Best ask minus best bid, when both sides are populated and the book
    /// is not crossed.
    #[must_use]
    pub fn spread(&self) -> Option<u128> {
        self.best_ask()?.checked_sub(self.best_bid()?)
    }

    /// SHA-256 hex digest of the symbol and level data.
    ///
    /// Sequence number and timestamp are left out, so two books holding the
    /// same liquidity produce the same checksum.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::Serialization`] if the levels cannot be encoded.
    pub fn checksum(&self) -> Result<String, BookError> {
        let view = ChecksumView {
            symbol: &self.symbol,
            asks: &self.asks,
            bids: &self.bids,
        };
        let bytes = serde_json::to_vec(&view)?;
        let digest = Sha256::digest(&bytes);
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest.iter() {
            let _ = write!(hex, "{byte:02x}");
        }
        Ok(hex)
    }
}
