// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use crate::store::LedgerStore;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let (which, sub) = match m.subcommand() {
        Some(pair) => pair,
        None => return Ok(()),
    };
    let out = sub.get_one::<String>("out").unwrap();
    let path = Path::new(out);
    match which {
        "transactions" => export_transactions(store, path)?,
        "assets" => export_assets(store, path)?,
        "orders" => export_orders(store, path)?,
        "portfolio" => export_portfolio_summary(store, path)?,
        "categories" => export_category_summary(store, path)?,
        _ => return Ok(()),
    }
    println!("Exported {} to {}", which, out);
    Ok(())
}

pub fn export_transactions(store: &LedgerStore, out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["id", "date", "amount", "category", "kind", "description"])?;
    for t in store.list_transactions(None)? {
        wtr.write_record([
            t.id.to_string(),
            t.date.to_string(),
            t.amount.to_string(),
            t.category,
            t.kind.to_string(),
            t.description.unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_assets(store: &LedgerStore, out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "ticker",
        "quantity",
        "price_buy",
        "date_buy",
        "current_price",
        "asset_class",
    ])?;
    for a in store.list_assets(None)? {
        wtr.write_record([
            a.id.to_string(),
            a.ticker,
            a.quantity.to_string(),
            a.price_buy.to_string(),
            a.date_buy.to_string(),
            a.current_price.map(|p| p.to_string()).unwrap_or_default(),
            a.asset_class.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_orders(store: &LedgerStore, out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["id", "ticker", "quantity", "price", "side", "date", "status"])?;
    for o in store.list_orders(None)? {
        wtr.write_record([
            o.id.to_string(),
            o.ticker,
            o.quantity.to_string(),
            o.price.to_string(),
            o.side.to_string(),
            o.date.to_string(),
            o.status.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_portfolio_summary(store: &LedgerStore, out: &Path) -> Result<()> {
    let summary = store.portfolio_summary()?;
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["asset_class", "value", "percent"])?;
    for slice in &summary.allocation {
        wtr.write_record([
            slice.asset_class.to_string(),
            slice.value.to_string(),
            slice.percent.round_dp(4).to_string(),
        ])?;
    }
    let total = summary.total_value.to_string();
    wtr.write_record(["total", total.as_str(), ""])?;
    wtr.flush()?;
    Ok(())
}

pub fn export_category_summary(store: &LedgerStore, out: &Path) -> Result<()> {
    let data = store.category_summary()?;
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["category", "total", "count"])?;
    for c in data {
        wtr.write_record([c.category, c.total.to_string(), c.count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
