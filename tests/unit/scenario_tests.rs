/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

#[cfg(test)]
mod tests {
    use crate::Captured;
    use orderbook_core::{CommandOutcome, Order, OrderAction, OrderId, Side};

    #[tokio::test]
    async fn test_partial_fill_of_resting_bid() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let worker = sequencer.spawn();

        let b1 = Order::limit(OrderId::new(), Side::Bid, 10, 5);
        let a1 = Order::limit(OrderId::new(), Side::Ask, 10, 3);
        handle.submit(b1, OrderAction::Create).await.unwrap();
        handle.submit(a1, OrderAction::Create).await.unwrap();

        drop(handle);
        let book = worker.join().await.unwrap();

        let trades = captured.trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].taker.id(), a1.id());
        assert_eq!(trades[0].maker.id(), b1.id());
        assert_eq!(trades[0].amount, 3);
        assert!(book.resting(a1.id()).is_none());
        assert_eq!(book.resting(b1.id()).unwrap().remaining_amount(), 2);
    }

    #[tokio::test]
    async fn test_non_crossing_ask_rests_in_full() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        handle
            .submit(Order::limit(OrderId::new(), Side::Bid, 8, 4), OrderAction::Create)
            .await
            .unwrap();
        let receipt = handle
            .submit_and_wait(Order::limit(OrderId::new(), Side::Ask, 9, 10), OrderAction::Create)
            .await
            .unwrap();

        assert!(receipt.outcome.is_resting());
        assert!(captured.trades().is_empty());
        let snapshot = handle.snapshot(1).await.unwrap();
        assert_eq!(snapshot.best_ask(), Some(9));
        assert_eq!(snapshot.asks[0].total_amount, 10);
    }

    #[tokio::test]
    async fn test_market_bid_sweeps_and_discards_remainder() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        for (price, amount) in [(9, 10), (10, 5)] {
            handle
                .submit(
                    Order::limit(OrderId::new(), Side::Ask, price, amount),
                    OrderAction::Create,
                )
                .await
                .unwrap();
        }
        let receipt = handle
            .submit_and_wait(Order::market(OrderId::new(), Side::Bid, 100), OrderAction::Create)
            .await
            .unwrap();

        assert!(matches!(
            receipt.outcome,
            CommandOutcome::Created {
                trades: 2,
                rested: false,
                discarded_amount: 85,
                ..
            }
        ));
        let amounts: Vec<u64> = captured.trades().iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![10, 5]);

        let snapshot = handle.snapshot(5).await.unwrap();
        assert!(snapshot.asks.is_empty());
        assert!(snapshot.bids.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_after_fill_only_notifies() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        let bid = Order::limit(OrderId::new(), Side::Bid, 10, 2);
        handle.submit(bid, OrderAction::Create).await.unwrap();
        handle
            .submit(Order::limit(OrderId::new(), Side::Ask, 10, 2), OrderAction::Create)
            .await
            .unwrap();
        let before = handle.snapshot(5).await.unwrap();

        let receipt = handle
            .submit_and_wait(bid, OrderAction::Cancel)
            .await
            .unwrap();
        let after = handle.snapshot(5).await.unwrap();

        assert!(matches!(
            receipt.outcome,
            CommandOutcome::Cancelled {
                was_resting: false,
                ..
            }
        ));
        assert_eq!(captured.cancels().len(), 1);
        assert_eq!(before.checksum().unwrap(), after.checksum().unwrap());
    }

    #[tokio::test]
    async fn test_replayed_commands_are_ignored() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        let ask = Order::limit(OrderId::new(), Side::Ask, 10, 5);
        for _ in 0..3 {
            handle.submit(ask, OrderAction::Create).await.unwrap();
            handle.submit(ask, OrderAction::Cancel).await.unwrap();
        }
        let snapshot = handle.snapshot(5).await.unwrap();

        assert_eq!(snapshot.sequence_num, 6);
        assert!(snapshot.asks.is_empty());
        assert_eq!(captured.cancels().len(), 1);
    }
}
