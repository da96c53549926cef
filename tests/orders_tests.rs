// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketfolio::models::{NewOrder, OrderSide, OrderStatus};
use pocketfolio::store::LedgerStore;
use rust_decimal::Decimal;
use std::str::FromStr;

fn order(ticker: &str, status: OrderStatus) -> NewOrder {
    NewOrder {
        ticker: ticker.into(),
        quantity: Decimal::from_str("1.5").unwrap(),
        price: Decimal::from_str("100").unwrap(),
        side: OrderSide::Buy,
        date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        status,
    }
}

#[test]
fn order_round_trip() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store.add_order(&order("BTC", OrderStatus::Open)).unwrap();
    let o = store.get_order(id).unwrap().unwrap();
    assert_eq!(o.ticker, "BTC");
    assert_eq!(o.quantity, Decimal::from_str("1.5").unwrap());
    assert_eq!(o.side, OrderSide::Buy);
    assert_eq!(o.status, OrderStatus::Open);
}

#[test]
fn close_order_is_idempotent() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store.add_order(&order("BTC", OrderStatus::Open)).unwrap();

    assert!(store.close_order(id).unwrap());
    assert_eq!(
        store.get_order(id).unwrap().unwrap().status,
        OrderStatus::Closed
    );

    // Second close succeeds and leaves the row untouched.
    let before = store.get_order(id).unwrap().unwrap();
    assert!(store.close_order(id).unwrap());
    let after = store.get_order(id).unwrap().unwrap();
    assert_eq!(after.status, OrderStatus::Closed);
    assert_eq!(after.updated_at, before.updated_at);
}

#[test]
fn update_cannot_reopen_a_closed_order() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store.add_order(&order("BTC", OrderStatus::Open)).unwrap();
    store.close_order(id).unwrap();

    // A full generic update leaves the status alone: OrderPatch carries no
    // status field, so open is unreachable once closed.
    let patch = pocketfolio::models::OrderPatch {
        ticker: Some("ETH".into()),
        quantity: Some(Decimal::from_str("2").unwrap()),
        price: Some(Decimal::from_str("3200").unwrap()),
        side: Some(OrderSide::Sell),
        date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
    };
    assert!(store.update_order(id, &patch).unwrap());

    let o = store.get_order(id).unwrap().unwrap();
    assert_eq!(o.ticker, "ETH");
    assert_eq!(o.status, OrderStatus::Closed);
}

#[test]
fn close_order_missing_id_is_false() {
    let store = LedgerStore::open_in_memory().unwrap();
    assert!(!store.close_order(42).unwrap());
}

#[test]
fn close_all_reports_transition_count() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add_order(&order("BTC", OrderStatus::Open)).unwrap();
    store.add_order(&order("ETH", OrderStatus::Open)).unwrap();
    store.add_order(&order("AAPL", OrderStatus::Closed)).unwrap();

    assert_eq!(store.close_all_open_orders().unwrap(), 2);
    assert!(store.list_orders(Some(OrderStatus::Open)).unwrap().is_empty());
    assert_eq!(store.list_orders(Some(OrderStatus::Closed)).unwrap().len(), 3);

    // Nothing left to close.
    assert_eq!(store.close_all_open_orders().unwrap(), 0);
}

#[test]
fn status_filter_is_exact() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add_order(&order("BTC", OrderStatus::Open)).unwrap();
    store.add_order(&order("ETH", OrderStatus::Closed)).unwrap();

    let open = store.list_orders(Some(OrderStatus::Open)).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].ticker, "BTC");
    assert_eq!(store.list_orders(None).unwrap().len(), 2);
}
