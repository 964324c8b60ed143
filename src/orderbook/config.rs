/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Book configuration.

use super::error::BookError;
use super::report::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Default command queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// Default number of ids each idempotency index retains.
pub const DEFAULT_DEDUP_CAPACITY: usize = 1 << 20;

/// Settings for one order book.
///
/// Price and amount precision are carried for producers and collaborators;
/// the book itself works in integer ticks and lots and does not enforce them.
///
/// # Examples
///
/// ```
/// use orderbook_core::BookConfig;
///
/// let config = BookConfig::from_json(r#"{ "symbol": "ETH/USD", "queue_capacity": 16 }"#).unwrap();
/// assert_eq!(config.symbol, "ETH/USD");
/// assert_eq!(config.queue_capacity, 16);
/// assert_eq!(config.retry.delay_ms, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Instrument symbol.
    pub symbol: String,
    /// Decimal places one price tick represents.
    pub price_precision: u32,
    /// Decimal places one amount lot represents.
    pub amount_precision: u32,
    /// Commands the queue holds before `submit` starts waiting.
    pub queue_capacity: usize,
    /// Ids retained per idempotency index; `None` retains all.
    pub dedup_capacity: Option<usize>,
    /// Retry policy for collaborator deliveries.
    pub retry: RetryPolicy,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            price_precision: 0,
            amount_precision: 0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            dedup_capacity: Some(DEFAULT_DEDUP_CAPACITY),
            retry: RetryPolicy::default(),
        }
    }
}

impl BookConfig {
    /// Default configuration for `symbol`.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_precision(mut self, price_precision: u32, amount_precision: u32) -> Self {
        self.price_precision = price_precision;
        self.amount_precision = amount_precision;
        self
    }

    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    #[must_use]
    pub fn with_dedup_capacity(mut self, dedup_capacity: Option<usize>) -> Self {
        self.dedup_capacity = dedup_capacity;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// - [`BookError::Serialization`] if the JSON is malformed
    /// - [`BookError::InvalidConfig`] if a value is out of range
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a book.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::InvalidConfig`] if the queue capacity is zero,
    /// the dedup capacity is `Some(0)`, or the retry policy allows zero
    /// attempts.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.queue_capacity == 0 {
            return Err(BookError::InvalidConfig(
                "queue_capacity must be positive".to_string(),
            ));
        }
        if self.dedup_capacity == Some(0) {
            return Err(BookError::InvalidConfig(
                "dedup_capacity must be positive or null".to_string(),
            ));
        }
        if self.retry.max_attempts == Some(0) {
            return Err(BookError::InvalidConfig(
                "retry.max_attempts must be positive or null".to_string(),
            ));
        }
        Ok(())
    }
}
