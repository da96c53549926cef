// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketfolio::models::{AssetClass, NewAsset, NewTransaction, TransactionKind};
use pocketfolio::store::LedgerStore;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(amount: &str, category: &str, kind: TransactionKind) -> NewTransaction {
    NewTransaction {
        date: ymd(2024, 1, 10),
        amount: dec(amount),
        category: category.into(),
        kind,
        description: None,
    }
}

fn asset(ticker: &str, qty: &str, buy: &str, current: Option<&str>, class: AssetClass, day: u32) -> NewAsset {
    NewAsset {
        ticker: ticker.into(),
        quantity: dec(qty),
        price_buy: dec(buy),
        date_buy: ymd(2024, 1, day),
        current_price: current.map(dec),
        asset_class: class,
    }
}

#[test]
fn balance_sums_personal_only() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add_transaction(&tx("3000.0", "salary", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("-50.0", "groceries", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("-30.0", "transport", TransactionKind::Personal)).unwrap();
    assert_eq!(store.balance().unwrap(), dec("2920.0"));

    store.add_transaction(&tx("-1000.0", "brokerage", TransactionKind::Investment)).unwrap();
    assert_eq!(store.balance().unwrap(), dec("2920.0"));
}

#[test]
fn balance_reflects_mutations_immediately() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store.add_transaction(&tx("100", "misc", TransactionKind::Personal)).unwrap();
    assert_eq!(store.balance().unwrap(), dec("100"));
    store.delete_transaction(id).unwrap();
    assert_eq!(store.balance().unwrap(), Decimal::ZERO);
}

#[test]
fn category_summary_groups_signed_totals_and_counts() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add_transaction(&tx("-50", "groceries", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("-25", "groceries", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("10", "groceries", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("3000", "salary", TransactionKind::Personal)).unwrap();

    let summary = store.category_summary().unwrap();
    assert_eq!(summary.len(), 2);
    let groceries = summary.iter().find(|c| c.category == "groceries").unwrap();
    // Signed sum, not absolute values.
    assert_eq!(groceries.total, dec("-65"));
    assert_eq!(groceries.count, 3);
    let salary = summary.iter().find(|c| c.category == "salary").unwrap();
    assert_eq!(salary.total, dec("3000"));
    assert_eq!(salary.count, 1);
}

#[test]
fn portfolio_value_uses_current_price_with_buy_fallback() {
    let store = LedgerStore::open_in_memory().unwrap();
    store
        .add_asset(&asset("BTC", "0.5", "50000", Some("52000"), AssetClass::Crypto, 1))
        .unwrap();
    store
        .add_asset(&asset("ETH", "2.0", "3000", Some("3200"), AssetClass::Crypto, 2))
        .unwrap();
    assert_eq!(store.portfolio_value().unwrap(), dec("32400"));

    // A never-refreshed asset contributes quantity * price_buy.
    store
        .add_asset(&asset("AAPL", "10", "180", None, AssetClass::Stock, 3))
        .unwrap();
    assert_eq!(store.portfolio_value().unwrap(), dec("34200"));
}

#[test]
fn portfolio_summary_percentages_sum_to_hundred() {
    let store = LedgerStore::open_in_memory().unwrap();
    store
        .add_asset(&asset("BTC", "1", "30000", None, AssetClass::Crypto, 1))
        .unwrap();
    store
        .add_asset(&asset("AAPL", "50", "200", None, AssetClass::Stock, 2))
        .unwrap();

    let summary = store.portfolio_summary().unwrap();
    assert_eq!(summary.total_value, dec("40000"));
    assert_eq!(summary.allocation.len(), 2);
    let crypto = summary
        .allocation
        .iter()
        .find(|s| s.asset_class == AssetClass::Crypto)
        .unwrap();
    assert_eq!(crypto.value, dec("30000"));
    assert_eq!(crypto.percent, dec("75"));
    let total_pct: Decimal = summary.allocation.iter().map(|s| s.percent).sum();
    assert_eq!(total_pct, dec("100"));
}

#[test]
fn empty_portfolio_summary_is_zero_with_no_slices() {
    let store = LedgerStore::open_in_memory().unwrap();
    let summary = store.portfolio_summary().unwrap();
    assert_eq!(summary.total_value, Decimal::ZERO);
    assert!(summary.allocation.is_empty());
}

#[test]
fn asset_performance_matches_reference_numbers() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store
        .add_asset(&asset("BTC", "0.5", "50000", Some("55000"), AssetClass::Crypto, 15))
        .unwrap();
    let perf = store.asset_performance(id).unwrap().unwrap();
    assert_eq!(perf.total_cost, dec("25000"));
    assert_eq!(perf.current_value, dec("27500"));
    assert_eq!(perf.gain_loss, dec("2500"));
    assert_eq!(perf.gain_loss_percent, dec("10"));
}

#[test]
fn asset_performance_zero_cost_reports_zero_percent() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store
        .add_asset(&asset("AIR", "0", "0", Some("100"), AssetClass::Stock, 1))
        .unwrap();
    let perf = store.asset_performance(id).unwrap().unwrap();
    assert_eq!(perf.total_cost, Decimal::ZERO);
    assert_eq!(perf.gain_loss_percent, Decimal::ZERO);

    assert!(store.asset_performance(999).unwrap().is_none());
}

#[test]
fn stats_counts_every_table() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add_transaction(&tx("1", "misc", TransactionKind::Personal)).unwrap();
    store.add_transaction(&tx("2", "misc", TransactionKind::Personal)).unwrap();
    store
        .add_asset(&asset("BTC", "1", "100", None, AssetClass::Crypto, 1))
        .unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.transactions, 2);
    assert_eq!(stats.assets, 1);
    assert_eq!(stats.orders, 0);
}
