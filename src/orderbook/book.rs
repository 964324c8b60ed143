/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Matching state machine.
//!
//! [`OrderBook`] owns both ladders, the two idempotency indexes and the
//! collaborators. It is driven by exactly one writer (the
//! [`Sequencer`](crate::sequencer::Sequencer) worker), so it carries no locks.

use super::config::BookConfig;
use super::dedup::IdempotencyIndex;
use super::ladder::Ladder;
use super::order::{Order, OrderId, Side};
use super::report::{
    CancelReporter, DeadLetter, Delivery, DeliveryKind, Trade, TradeReporter, deliver,
};
use super::snapshot::BookSnapshot;
use crate::sequencer::{Command, CommandOutcome, OrderAction};
use crate::utils::nanos_since_epoch;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Single-instrument order book with price-time priority matching.
pub struct OrderBook {
    config: BookConfig,
    asks: Ladder,
    bids: Ladder,
    create_index: IdempotencyIndex,
    cancel_index: IdempotencyIndex,
    trade_reporter: Arc<dyn TradeReporter>,
    cancel_reporter: Arc<dyn CancelReporter>,
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("symbol", &self.config.symbol)
            .field("asks", &self.asks.len())
            .field("bids", &self.bids.len())
            .finish_non_exhaustive()
    }
}

impl OrderBook {
    /// Creates an empty book reporting to the given collaborators.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderbook_core::{BookConfig, Order, OrderBook, OrderId, ReportError, Side, Trade};
    ///
    /// let book = OrderBook::new(
    ///     BookConfig::new("BTC/USD"),
    ///     |_: &Trade| -> Result<(), ReportError> { Ok(()) },
    ///     |_: &Order| -> Result<(), ReportError> { Ok(()) },
    /// );
    /// assert!(book.asks().is_empty());
    /// assert!(book.bids().is_empty());
    /// ```
    #[must_use]
    pub fn new(
        config: BookConfig,
        trade_reporter: impl TradeReporter + 'static,
        cancel_reporter: impl CancelReporter + 'static,
    ) -> Self {
        Self::with_reporters(config, Arc::new(trade_reporter), Arc::new(cancel_reporter))
    }

    /// Creates an empty book from shared collaborator handles.
    #[must_use]
    pub fn with_reporters(
        config: BookConfig,
        trade_reporter: Arc<dyn TradeReporter>,
        cancel_reporter: Arc<dyn CancelReporter>,
    ) -> Self {
        Self {
            create_index: IdempotencyIndex::new(config.dedup_capacity),
            cancel_index: IdempotencyIndex::new(config.dedup_capacity),
            config,
            asks: Ladder::new(Side::Ask),
            bids: Ladder::new(Side::Bid),
            trade_reporter,
            cancel_reporter,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    #[must_use]
    pub fn asks(&self) -> &Ladder {
        &self.asks
    }

    #[must_use]
    pub fn bids(&self) -> &Ladder {
        &self.bids
    }

    /// The ladder holding resting orders of `side`.
    #[must_use]
    pub fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        }
    }

    /// Returns the resting order with `order_id` on either side.
    #[must_use]
    pub fn resting(&self, order_id: OrderId) -> Option<&Order> {
        self.asks.get(order_id).or_else(|| self.bids.get(order_id))
    }

    /// Depth view of both sides, best `depth` levels each.
    ///
    /// The book does not know command sequence numbers, so `sequence_num` is
    /// always `0` here. [`BookHandle::snapshot`](crate::BookHandle::snapshot)
    /// stamps the sequence number of the last applied command.
    #[must_use]
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            symbol: self.config.symbol.clone(),
            sequence_num: 0,
            timestamp_ns: nanos_since_epoch(),
            asks: self.asks.depth(depth),
            bids: self.bids.depth(depth),
        }
    }

    /// Dispatches one command by action.
    pub async fn apply(&mut self, command: &Command) -> CommandOutcome {
        match command.action {
            OrderAction::Create => self.create_order(command.order).await,
            OrderAction::Cancel => self.cancel_order(command.order).await,
        }
    }

    /// Matches `order` against the opposite ladder, then rests any limit
    /// remainder.
    ///
    /// Applied at most once per id; a replay, or any create whose id is
    /// still resting, returns [`CommandOutcome::Duplicate`] without side
    /// effects. Every match step
    /// is reported to the trade collaborator before the walk continues.
    pub async fn create_order(&mut self, mut order: Order) -> CommandOutcome {
        let order_id = order.id();
        // A resting id stays a duplicate even after the index has evicted it.
        if self.resting(order_id).is_some() || !self.create_index.mark(order_id) {
            debug!(order_id = %order_id, "duplicate create ignored");
            return CommandOutcome::Duplicate {
                order_id,
                action: OrderAction::Create,
            };
        }

        let Self {
            config,
            asks,
            bids,
            trade_reporter,
            ..
        } = self;
        let (own, opposite) = match order.side() {
            Side::Ask => (asks, bids),
            Side::Bid => (bids, asks),
        };

        let mut trades = 0usize;
        let mut undelivered = Vec::new();
        let mut cursor = opposite.cursor();
        while order.remaining_amount() > 0 {
            let Some(opponent) = cursor.current_mut() else {
                break;
            };
            // The ladder is price ordered: once one opponent fails to cross,
            // none behind it can.
            if !order.crosses(opponent.price()) {
                break;
            }

            let amount = order.remaining_amount().min(opponent.remaining_amount());
            order.fill(amount);
            opponent.fill(amount);
            let maker = *opponent;
            if maker.is_filled() {
                cursor.remove_current();
            } else {
                cursor.advance();
            }

            let trade = Trade {
                taker: order,
                maker,
                amount,
                price: maker.price(),
            };
            trades += 1;
            trace!(
                taker = %order_id,
                maker = %maker.id(),
                amount,
                price = %trade.price,
                "matched"
            );

            let delivery = deliver(&config.retry, DeliveryKind::Trade, order_id, || {
                trade_reporter.report_trade(&trade)
            })
            .await;
            if let Delivery::Abandoned { attempts, error } = delivery {
                undelivered.push(DeadLetter {
                    kind: DeliveryKind::Trade,
                    order_id,
                    trade: Some(trade),
                    attempts,
                    last_error: error.message().to_string(),
                });
            }
        }
        drop(cursor);

        let mut rested = false;
        let mut discarded_amount = 0;
        if order.remaining_amount() > 0 {
            if order.is_market() {
                discarded_amount = order.remaining_amount();
                debug!(
                    order_id = %order_id,
                    discarded_amount,
                    "market order remainder discarded"
                );
            } else {
                match own.insert(order) {
                    Ok(()) => rested = true,
                    Err(err) => {
                        discarded_amount = order.remaining_amount();
                        warn!(
                            order_id = %order_id,
                            discarded_amount,
                            error = %err,
                            "remainder not rested"
                        );
                    }
                }
            }
        }

        debug!(order_id = %order_id, trades, rested, "create applied");
        CommandOutcome::Created {
            order_id,
            trades,
            rested,
            discarded_amount,
            undelivered,
        }
    }

    /// Notifies the cancel collaborator, then removes the order from its
    /// ladder if it is resting.
    ///
    /// The notice is sent even when nothing rests under this id. When the
    /// order does rest, the notice carries the resting copy with its current
    /// fill state.
    pub async fn cancel_order(&mut self, order: Order) -> CommandOutcome {
        let order_id = order.id();
        if !self.cancel_index.mark(order_id) {
            debug!(order_id = %order_id, "duplicate cancel ignored");
            return CommandOutcome::Duplicate {
                order_id,
                action: OrderAction::Cancel,
            };
        }

        let notice = self
            .ladder(order.side())
            .get(order_id)
            .copied()
            .unwrap_or(order);

        let mut undelivered = Vec::new();
        let reporter = &self.cancel_reporter;
        let delivery = deliver(&self.config.retry, DeliveryKind::Cancel, order_id, || {
            reporter.report_cancel(&notice)
        })
        .await;
        if let Delivery::Abandoned { attempts, error } = delivery {
            undelivered.push(DeadLetter {
                kind: DeliveryKind::Cancel,
                order_id,
                trade: None,
                attempts,
                last_error: error.message().to_string(),
            });
        }

        let was_resting = self.ladder_mut(order.side()).remove(order_id).is_some();
        debug!(order_id = %order_id, was_resting, "cancel applied");
        CommandOutcome::Cancelled {
            order_id,
            was_resting,
            undelivered,
        }
    }
}
