/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

mod config_tests;
mod scenario_tests;
mod validation_tests;

use orderbook_core::{BookConfig, Order, OrderBook, ReportError, Sequencer, Trade};
use std::sync::{Arc, Mutex, Once};

static TRACING: Once = Once::new();

/// Routes library logs through the test harness's captured output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Trades and cancel notices captured from a book's collaborators.
#[derive(Clone, Default)]
pub struct Captured {
    pub trades: Arc<Mutex<Vec<Trade>>>,
    pub cancels: Arc<Mutex<Vec<Order>>>,
}

impl Captured {
    pub fn book(&self, config: BookConfig) -> OrderBook {
        let trades = self.trades.clone();
        let cancels = self.cancels.clone();
        OrderBook::new(
            config,
            move |trade: &Trade| -> Result<(), ReportError> {
                trades.lock().unwrap().push(*trade);
                Ok(())
            },
            move |order: &Order| -> Result<(), ReportError> {
                cancels.lock().unwrap().push(*order);
                Ok(())
            },
        )
    }

    pub fn sequencer(&self) -> Sequencer {
        init_tracing();
        Sequencer::new(self.book(BookConfig::new("BTC/USD")))
    }

    pub fn trades(&self) -> Vec<Trade> {
        self.trades.lock().unwrap().clone()
    }

    pub fn cancels(&self) -> Vec<Order> {
        self.cancels.lock().unwrap().clone()
    }
}
