use matching_engine::{
    errors::{CancelError, SubmitError},
    execution::ExecutionType,
    instrument::BTC_USD,
    orderbook::{Book, DepthLevel},
    orders::{OrderData, Side},
};

fn limit_order(client_id: u64, side: Side, price: u64, shares: u64) -> OrderData {
    OrderData::new(client_id, side, price, shares)
}

#[test]
fn rest_then_match() {
    let mut book = Book::new(BTC_USD);

    book.submit(limit_order(1, Side::Buy, 100, 10)).unwrap();
    assert!(book.drain_executions().is_empty());
    assert_eq!(book.best_bid(), Some(100));
    assert_eq!(
        book.depth(Side::Buy, 1),
        vec![DepthLevel {
            price: 100,
            total_volume: 10,
            orders: 1
        }]
    );

    book.submit(limit_order(2, Side::Sell, 100, 4)).unwrap();
    let execs = book.drain_executions();
    assert_eq!(execs.len(), 1);
    let e = &execs[0];
    assert_eq!(e.exec_price, 100);
    assert_eq!(e.exec_size, 4);
    assert_eq!(e.maker_exec_type, ExecutionType::PartialFill);
    assert_eq!(e.taker_exec_type, ExecutionType::FullFill);
    assert_eq!(e.maker_leaves_qty, 6);
    assert_eq!(e.taker_leaves_qty, 0);
    assert_eq!(e.maker_cum_qty, 4);
    assert_eq!(e.taker_cum_qty, 4);
    assert_eq!(e.maker_client_id, 1);
    assert_eq!(e.taker_client_id, 2);

    assert_eq!(book.best_bid(), Some(100));
    assert_eq!(
        book.depth(Side::Buy, 1),
        vec![DepthLevel {
            price: 100,
            total_volume: 6,
            orders: 1
        }]
    );
}

#[test]
fn time_priority_at_one_price() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Buy, 100, 5)).unwrap();
    book.submit(limit_order(2, Side::Buy, 100, 5)).unwrap();
    book.submit(limit_order(3, Side::Sell, 100, 6)).unwrap();

    let execs = book.drain_executions();
    assert_eq!(execs.len(), 2);

    assert_eq!(execs[0].maker_client_id, 1);
    assert_eq!(execs[0].exec_size, 5);
    assert_eq!(execs[0].maker_exec_type, ExecutionType::FullFill);
    assert_eq!(execs[0].taker_exec_type, ExecutionType::PartialFill);

    assert_eq!(execs[1].maker_client_id, 2);
    assert_eq!(execs[1].exec_size, 1);
    assert_eq!(execs[1].maker_exec_type, ExecutionType::PartialFill);
    assert_eq!(execs[1].taker_exec_type, ExecutionType::FullFill);
}

#[test]
fn price_improvement_walk() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Sell, 101, 3)).unwrap();
    book.submit(limit_order(2, Side::Sell, 102, 5)).unwrap();
    book.submit(limit_order(3, Side::Buy, 102, 7)).unwrap();

    let execs = book.drain_executions();
    assert_eq!(execs.len(), 2);
    assert_eq!((execs[0].exec_price, execs[0].exec_size), (101, 3));
    assert_eq!((execs[1].exec_price, execs[1].exec_size), (102, 4));
    assert_eq!(execs[1].taker_exec_type, ExecutionType::FullFill);

    assert_eq!(
        book.depth(Side::Sell, 2),
        vec![DepthLevel {
            price: 102,
            total_volume: 1,
            orders: 1
        }]
    );
}

#[test]
fn self_trade_rejection() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Buy, 100, 5)).unwrap();

    let err = book.submit(limit_order(1, Side::Sell, 100, 3)).unwrap_err();
    assert!(matches!(err, SubmitError::SelfTradeRejected { client_id: 1, .. }));
    assert!(book.drain_executions().is_empty());
    assert_eq!(
        book.depth(Side::Buy, 1),
        vec![DepthLevel {
            price: 100,
            total_volume: 5,
            orders: 1
        }]
    );
    assert_eq!(book.best_ask(), None);
}

#[test]
fn self_trade_after_partial_cross() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Buy, 100, 2)).unwrap();
    book.submit(limit_order(2, Side::Buy, 100, 3)).unwrap();

    let err = book.submit(limit_order(2, Side::Sell, 100, 4)).unwrap_err();
    assert!(matches!(err, SubmitError::SelfTradeRejected { client_id: 2, .. }));

    let execs = book.drain_executions();
    assert_eq!(execs.len(), 1);
    assert_eq!(execs[0].exec_price, 100);
    assert_eq!(execs[0].exec_size, 2);
    assert_eq!(execs[0].maker_client_id, 1);

    // the residual of the rejected sell never rested
    assert_eq!(book.best_ask(), None);
    assert_eq!(
        book.depth(Side::Buy, 2),
        vec![DepthLevel {
            price: 100,
            total_volume: 3,
            orders: 1
        }]
    );
}

#[test]
fn cancel_then_cancel_again() {
    let mut book = Book::new(BTC_USD);
    let id = book.submit(limit_order(1, Side::Buy, 100, 10)).unwrap();

    book.cancel(id).unwrap();
    assert_eq!(book.best_bid(), None);
    assert_eq!(book.resting_orders(), 0);

    assert_eq!(book.cancel(id), Err(CancelError::UnknownOrder(id)));
}

#[test]
fn taker_average_price_across_levels() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Sell, 101, 5)).unwrap();
    book.submit(limit_order(2, Side::Sell, 103, 5)).unwrap();
    book.submit(limit_order(3, Side::Buy, 103, 10)).unwrap();

    let execs = book.drain_executions();
    assert_eq!(execs.len(), 2);
    // (5 * 101 + 5 * 103) / 10
    assert_eq!(execs[1].taker_avg_price, 102.0);
    assert_eq!(execs[1].taker_cum_qty, 10);
    assert_eq!(execs[1].taker_exec_type, ExecutionType::FullFill);
}

#[test]
fn resting_residual_carries_its_fill_state() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Sell, 100, 4)).unwrap();
    // buys 4 at 100, rests 6 at 101
    let id = book.submit(limit_order(2, Side::Buy, 101, 10)).unwrap();
    book.drain_executions();

    assert!(book.contains_order(id));
    assert_eq!(book.best_bid(), Some(101));

    // the residual's cumulative state continues when it later fills
    book.submit(limit_order(3, Side::Sell, 101, 6)).unwrap();
    let execs = book.drain_executions();
    assert_eq!(execs.len(), 1);
    assert_eq!(execs[0].maker_order_id, id);
    assert_eq!(execs[0].maker_cum_qty, 10);
    assert_eq!(execs[0].maker_leaves_qty, 0);
    assert_eq!(execs[0].maker_exec_type, ExecutionType::FullFill);
    // (4 * 100 + 6 * 101) / 10
    assert_eq!(execs[0].maker_avg_price, 100.6);
}

#[test]
fn executions_serialize_with_full_field_set() {
    let mut book = Book::new(BTC_USD);
    book.submit(limit_order(1, Side::Buy, 100, 5)).unwrap();
    book.submit(limit_order(2, Side::Sell, 100, 5)).unwrap();

    let execs = book.drain_executions();
    let json = serde_json::to_value(&execs[0]).unwrap();
    assert_eq!(json["symbol"], "BTC-USD");
    assert_eq!(json["exec_price"], 100);
    assert_eq!(json["exec_size"], 5);
    assert_eq!(json["maker_exec_type"], "FullFill");
    assert_eq!(json["taker_exec_type"], "FullFill");
    assert_eq!(json["maker_side"], "Buy");
    assert_eq!(json["taker_side"], "Sell");
}
