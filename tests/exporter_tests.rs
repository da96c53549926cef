// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketfolio::commands::exporter;
use pocketfolio::models::{AssetClass, NewAsset, NewTransaction, TransactionKind};
use pocketfolio::store::LedgerStore;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn seeded_store() -> LedgerStore {
    let store = LedgerStore::open_in_memory().unwrap();
    store
        .add_transaction(&NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            amount: dec("-12.34"),
            category: "groceries".into(),
            kind: TransactionKind::Personal,
            description: Some("Corner shop".into()),
        })
        .unwrap();
    store
        .add_asset(&NewAsset {
            ticker: "BTC".into(),
            quantity: dec("0.5"),
            price_buy: dec("50000"),
            date_buy: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            current_price: Some(dec("52000")),
            asset_class: AssetClass::Crypto,
        })
        .unwrap();
    store
        .add_asset(&NewAsset {
            ticker: "AAPL".into(),
            quantity: dec("10"),
            price_buy: dec("180"),
            date_buy: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            current_price: None,
            asset_class: AssetClass::Stock,
        })
        .unwrap();
    store
}

#[test]
fn transactions_csv_has_fixed_columns() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");

    exporter::export_transactions(&store, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "id,date,amount,category,kind,description");
    assert_eq!(
        lines.next().unwrap(),
        "1,2024-01-05,-12.34,groceries,personal,Corner shop"
    );
    assert!(lines.next().is_none());
}

#[test]
fn assets_csv_leaves_missing_current_price_empty() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out = dir.path().join("assets.csv");

    exporter::export_assets(&store, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "id,ticker,quantity,price_buy,date_buy,current_price,asset_class"
    );
    assert_eq!(lines[1], "1,BTC,0.5,50000,2024-01-15,52000,crypto");
    assert_eq!(lines[2], "2,AAPL,10,180,2024-02-01,,stock");
}

#[test]
fn portfolio_summary_csv_ends_with_total_row() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out = dir.path().join("portfolio.csv");

    exporter::export_portfolio_summary(&store, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "asset_class,value,percent");
    // 0.5 * 52000 = 26000 crypto, 10 * 180 = 1800 stock, total 27800.
    assert!(lines[1].starts_with("crypto,26000,"));
    assert!(lines[2].starts_with("stock,1800,"));
    assert_eq!(*lines.last().unwrap(), "total,27800,");
}

#[test]
fn category_summary_csv_round_trips_through_csv_reader() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out = dir.path().join("categories.csv");

    exporter::export_category_summary(&store, &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        rdr.headers().unwrap(),
        &csv::StringRecord::from(vec!["category", "total", "count"])
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0], &csv::StringRecord::from(vec!["groceries", "-12.34", "1"]));
}

