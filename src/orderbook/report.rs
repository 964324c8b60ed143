/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Outbound collaborators and the retry loop that delivers to them.
//!
//! The book reports every match through a [`TradeReporter`] and every
//! accepted cancel through a [`CancelReporter`]. A failed delivery is retried
//! on the worker itself, so nothing else in the queue is processed until the
//! collaborator accepts it (or, under a bounded [`RetryPolicy`], until it is
//! recorded as a [`DeadLetter`]).

use super::error::ReportError;
use super::order::{Order, OrderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};

/// One match step between the aggressor and a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The aggressor, as it stands after this fill.
    pub taker: Order,
    /// The resting counter-order, as it stands after this fill.
    pub maker: Order,
    /// Amount exchanged in this step.
    pub amount: u64,
    /// Execution price: the maker's price.
    pub price: u128,
}

/// Receives a report for every match step.
///
/// Implementations must tolerate being called again for the same trade when
/// they previously returned an error. A successful call is never repeated.
pub trait TradeReporter: Send + Sync {
    /// Reports one trade.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the trade could not be accepted; the book
    /// will retry.
    fn report_trade(&self, trade: &Trade) -> Result<(), ReportError>;
}

impl<F> TradeReporter for F
where
    F: Fn(&Trade) -> Result<(), ReportError> + Send + Sync,
{
    fn report_trade(&self, trade: &Trade) -> Result<(), ReportError> {
        self(trade)
    }
}

/// Receives a notice for every accepted cancel command, whether or not the
/// order was still resting.
pub trait CancelReporter: Send + Sync {
    /// Reports one cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the notice could not be accepted; the book
    /// will retry.
    fn report_cancel(&self, order: &Order) -> Result<(), ReportError>;
}

impl<F> CancelReporter for F
where
    F: Fn(&Order) -> Result<(), ReportError> + Send + Sync,
{
    fn report_cancel(&self, order: &Order) -> Result<(), ReportError> {
        self(order)
    }
}

/// How failed collaborator deliveries are retried.
///
/// The default retries forever every 100ms and starts logging at error level
/// after 10 consecutive failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Fixed delay between attempts, in milliseconds.
    pub delay_ms: u64,
    /// Consecutive failures after which each further failure is logged at
    /// error level.
    pub escalate_after: u32,
    /// Total attempts before a delivery is abandoned as a [`DeadLetter`].
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            escalate_after: 10,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Unbounded retry with a fixed delay.
    #[must_use]
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            ..Self::default()
        }
    }

    /// Retry at most `max_attempts` times, then dead-letter.
    #[must_use]
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            max_attempts: Some(max_attempts),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Which collaborator a delivery was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryKind {
    Trade,
    Cancel,
}

/// A delivery abandoned under a bounded [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub kind: DeliveryKind,
    /// The order the delivery concerned (the taker, for trades).
    pub order_id: OrderId,
    /// The trade that was not delivered, for trade deliveries.
    pub trade: Option<Trade>,
    pub attempts: u32,
    /// Message of the last failure.
    pub last_error: String,
}

/// Result of a delivery loop.
#[derive(Debug)]
pub(crate) enum Delivery {
    Delivered,
    Abandoned { attempts: u32, error: ReportError },
}

/// Calls `attempt` until it succeeds or the policy gives up.
///
/// Sleeps for the policy delay between attempts. The caller holds the only
/// writer of the book, so the whole queue waits with it.
pub(crate) async fn deliver<F>(
    policy: &RetryPolicy,
    kind: DeliveryKind,
    order_id: OrderId,
    mut attempt: F,
) -> Delivery
where
    F: FnMut() -> Result<(), ReportError>,
{
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        let err = match attempt() {
            Ok(()) => return Delivery::Delivered,
            Err(err) => err,
        };

        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            error!(
                ?kind,
                order_id = %order_id,
                attempts,
                error = %err,
                "giving up on collaborator delivery"
            );
            return Delivery::Abandoned {
                attempts,
                error: err,
            };
        }

        if attempts >= policy.escalate_after {
            error!(?kind, order_id = %order_id, attempt = attempts, error = %err, "collaborator still failing");
        } else {
            warn!(?kind, order_id = %order_id, attempt = attempts, error = %err, "collaborator failed, retrying");
        }
        tokio::time::sleep(policy.delay()).await;
    }
}
