/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Tests for the matching state machine.


use crate::orderbook::{BookConfig, Order, OrderBook, ReportError, Trade};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Collaborator double that records every accepted delivery and can be told
/// to reject the next few.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    trades: Arc<Mutex<Vec<Trade>>>,
    cancels: Arc<Mutex<Vec<Order>>>,
    trade_attempts: Arc<AtomicU32>,
    cancel_attempts: Arc<AtomicU32>,
    failing_trades: Arc<AtomicU32>,
    failing_cancels: Arc<AtomicU32>,
}

impl Recorder {
    pub(crate) fn book(&self) -> OrderBook {
        self.book_with(BookConfig::new("BTC/USD"))
    }

    pub(crate) fn book_with(&self, config: BookConfig) -> OrderBook {
        let trades = self.trades.clone();
        let trade_attempts = self.trade_attempts.clone();
        let failing_trades = self.failing_trades.clone();
        let cancels = self.cancels.clone();
        let cancel_attempts = self.cancel_attempts.clone();
        let failing_cancels = self.failing_cancels.clone();

        OrderBook::new(
            config,
            move |trade: &Trade| -> Result<(), ReportError> {
                trade_attempts.fetch_add(1, Ordering::SeqCst);
                if take_failure(&failing_trades) {
                    return Err(ReportError::new("trade sink unavailable"));
                }
                trades.lock().unwrap().push(*trade);
                Ok(())
            },
            move |order: &Order| -> Result<(), ReportError> {
                cancel_attempts.fetch_add(1, Ordering::SeqCst);
                if take_failure(&failing_cancels) {
                    return Err(ReportError::new("cancel sink unavailable"));
                }
                cancels.lock().unwrap().push(*order);
                Ok(())
            },
        )
    }

    pub(crate) fn trades(&self) -> Vec<Trade> {
        self.trades.lock().unwrap().clone()
    }

    pub(crate) fn cancels(&self) -> Vec<Order> {
        self.cancels.lock().unwrap().clone()
    }

    pub(crate) fn trade_attempts(&self) -> u32 {
        self.trade_attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn cancel_attempts(&self) -> u32 {
        self.cancel_attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next_trades(&self, count: u32) {
        self.failing_trades.store(count, Ordering::SeqCst);
    }

    pub(crate) fn fail_next_cancels(&self, count: u32) {
        self.failing_cancels.store(count, Ordering::SeqCst);
    }
}

fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// Asserts the conservation and resting invariants over both ladders.
pub(crate) fn assert_book_invariants(book: &OrderBook) {
    for ladder in [book.asks(), book.bids()] {
        for level in ladder.levels() {
            assert!(!level.is_empty(), "empty level persisted");
            for order in level.iter() {
                assert_eq!(order.price(), level.price());
                assert_eq!(order.side(), ladder.side());
                assert!(!order.is_market(), "market order resting");
                assert!(order.remaining_amount() > 0, "filled order resting");
                assert_eq!(
                    order.filled_amount() + order.remaining_amount(),
                    order.amount()
                );
            }
        }
    }
}
