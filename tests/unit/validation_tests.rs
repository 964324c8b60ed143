/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

#[cfg(test)]
mod tests {
    use crate::Captured;
    use orderbook_core::{BookError, Order, OrderAction, OrderId, OrderType, Side};

    // --- textual inputs ---

    #[test]
    fn test_side_parsing() {
        assert_eq!("bid".parse::<Side>().unwrap(), Side::Bid);
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Ask);
        assert_eq!(
            "sideways".parse::<Side>(),
            Err(BookError::UnknownSide("sideways".to_string()))
        );
    }

    #[test]
    fn test_order_type_parsing() {
        assert_eq!("market".parse::<OrderType>().unwrap(), OrderType::Market);
        assert!(matches!(
            "stop".parse::<OrderType>(),
            Err(BookError::UnknownOrderType(_))
        ));
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("Cancel".parse::<OrderAction>().unwrap(), OrderAction::Cancel);
        assert!(matches!(
            "modify".parse::<OrderAction>(),
            Err(BookError::UnknownAction(_))
        ));
    }

    // --- structural checks at the handle ---

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        let order = Order::market(OrderId::new(), Side::Bid, 0);
        let err = handle
            .submit(order, OrderAction::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, BookError::InvalidOrder { order_id, .. } if order_id == order.id()));
    }

    #[tokio::test]
    async fn test_limit_without_price_rejected() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        let order = Order::limit(OrderId::new(), Side::Ask, 0, 1);
        assert!(matches!(
            handle.try_submit(order, OrderAction::Create),
            Err(BookError::InvalidOrder { .. })
        ));
    }

    #[tokio::test]
    async fn test_inconsistent_amounts_rejected() {
        let captured = Captured::default();
        let sequencer = captured.sequencer();
        let handle = sequencer.handle();
        let _worker = sequencer.spawn();

        // Decoded from the wire with fill state that does not add up.
        let id = OrderId::new();
        let json = format!(
            r#"{{"id":"{id}","side":"BID","order_type":"LIMIT","price":10,"amount":5,"remaining_amount":5,"filled_amount":2}}"#
        );
        let order: Order = serde_json::from_str(&json).unwrap();

        let err = handle
            .submit_and_wait(order, OrderAction::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, BookError::InvalidOrder { .. }));

        let snapshot = handle.snapshot(1).await.unwrap();
        assert_eq!(snapshot.sequence_num, 0);
    }
}
