/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

#[cfg(test)]
mod tests {
    use crate::{Captured, init_tracing};
    use orderbook_core::{BookConfig, BookError, Order, OrderAction, OrderId, Sequencer, Side};

    #[test]
    fn test_config_from_json_defaults() {
        let config = BookConfig::from_json(r#"{ "symbol": "ETH/USD" }"#).unwrap();
        assert_eq!(config.queue_capacity, 8192);
        assert_eq!(config.retry.delay_ms, 100);
        assert_eq!(config.retry.escalate_after, 10);
        assert_eq!(config.retry.max_attempts, None);
    }

    #[test]
    fn test_config_rejects_zero_attempts() {
        let err = BookConfig::from_json(r#"{ "retry": { "max_attempts": 0 } }"#).unwrap_err();
        assert!(matches!(err, BookError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_queue_sized_from_config() {
        init_tracing();
        let captured = Captured::default();
        let config = BookConfig::from_json(r#"{ "symbol": "ETH/USD", "queue_capacity": 4 }"#).unwrap();
        let sequencer = Sequencer::new(captured.book(config));
        let handle = sequencer.handle();

        // Nothing drains the queue until the worker is spawned.
        for i in 0..4 {
            let order = Order::limit(OrderId::new(), Side::Bid, 100 + i, 1);
            handle.try_submit(order, OrderAction::Create).unwrap();
        }
        let overflow = Order::limit(OrderId::new(), Side::Bid, 99, 1);
        assert_eq!(
            handle.try_submit(overflow, OrderAction::Create),
            Err(BookError::QueueFull)
        );

        let worker = sequencer.spawn();
        let snapshot = handle.snapshot(10).await.unwrap();
        assert_eq!(snapshot.symbol, "ETH/USD");
        assert_eq!(snapshot.sequence_num, 4);
        assert_eq!(snapshot.bids.len(), 4);

        drop(handle);
        worker.wait().await.unwrap();
    }
}
