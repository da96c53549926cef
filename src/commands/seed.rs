// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{
    AssetClass, NewAsset, NewOrder, NewTransaction, OrderSide, OrderStatus, TransactionKind,
};
use crate::store::LedgerStore;
use crate::utils::{parse_date, parse_decimal};

/// Load a small, deterministic data set for trying the tool out. Safe to run
/// against an existing database except for the sample assets, whose
/// (ticker, date_buy) pairs collide on a second run.
pub fn handle(store: &LedgerStore) -> Result<()> {
    let transactions = [
        ("2024-01-05", "3000.0", "salary", TransactionKind::Personal, "Monthly salary"),
        ("2024-01-08", "-50.0", "groceries", TransactionKind::Personal, "Weekly shop"),
        ("2024-01-12", "-30.0", "transport", TransactionKind::Personal, "Metro card"),
        ("2024-01-15", "-1000.0", "brokerage", TransactionKind::Investment, "Transfer to broker"),
        ("2024-02-05", "3000.0", "salary", TransactionKind::Personal, "Monthly salary"),
        ("2024-02-09", "-120.5", "dining", TransactionKind::Personal, "Anniversary dinner"),
    ];
    for (date, amount, category, kind, desc) in transactions {
        store.add_transaction(&NewTransaction {
            date: parse_date(date)?,
            amount: parse_decimal(amount)?,
            category: category.to_string(),
            kind,
            description: Some(desc.to_string()),
        })?;
    }

    let assets = [
        ("BTC", "0.5", "50000", "2024-01-15", AssetClass::Crypto),
        ("ETH", "2.0", "3000", "2024-01-20", AssetClass::Crypto),
        ("AAPL", "10", "180", "2024-02-01", AssetClass::Stock),
        ("TLT", "25", "95", "2024-02-10", AssetClass::Bond),
    ];
    for (ticker, qty, price, date_buy, class) in assets {
        store.add_asset(&NewAsset {
            ticker: ticker.to_string(),
            quantity: parse_decimal(qty)?,
            price_buy: parse_decimal(price)?,
            date_buy: parse_date(date_buy)?,
            current_price: None,
            asset_class: class,
        })?;
    }

    let orders = [
        ("BTC", "0.1", "52000", OrderSide::Buy, "2024-02-15", OrderStatus::Open),
        ("AAPL", "5", "190", OrderSide::Sell, "2024-02-20", OrderStatus::Open),
        ("ETH", "1.0", "3200", OrderSide::Buy, "2024-01-25", OrderStatus::Closed),
    ];
    for (ticker, qty, price, side, date, status) in orders {
        store.add_order(&NewOrder {
            ticker: ticker.to_string(),
            quantity: parse_decimal(qty)?,
            price: parse_decimal(price)?,
            side,
            date: parse_date(date)?,
            status,
        })?;
    }

    let stats = store.stats()?;
    println!(
        "Seeded sample data: {} transactions, {} assets, {} orders",
        stats.transactions, stats.assets, stats.orders
    );
    Ok(())
}
