// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::transactions::parse_id;
use crate::models::{Asset, AssetClass, AssetPatch, NewAsset};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("get", sub)) => get(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("performance", sub)) => performance(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let ticker = sub.get_one::<String>("ticker").unwrap().trim().to_string();
    let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap())?;
    let price_buy = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let date_buy = parse_date(sub.get_one::<String>("date").unwrap())?;
    let asset_class: AssetClass = sub.get_one::<String>("class").unwrap().trim().parse()?;
    let current_price = sub
        .get_one::<String>("current")
        .map(|s| parse_decimal(s))
        .transpose()?;

    let id = store.add_asset(&NewAsset {
        ticker: ticker.clone(),
        quantity,
        price_buy,
        date_buy,
        current_price,
        asset_class,
    })?;
    println!(
        "Added {} asset #{}: {} x {} @ {} ({})",
        asset_class, id, quantity, ticker, price_buy, date_buy
    );
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let class = sub
        .get_one::<String>("class")
        .map(|s| s.trim().parse::<AssetClass>())
        .transpose()?;
    let data = store.list_assets(class)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows_plain(&data);
    }
    Ok(())
}

fn print_rows_plain(data: &[Asset]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.ticker.clone(),
                a.quantity.to_string(),
                a.price_buy.to_string(),
                a.date_buy.to_string(),
                a.current_price
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".into()),
                a.asset_class.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Ticker", "Qty", "Buy Price", "Buy Date", "Current", "Class"],
            rows
        )
    );
}

fn get(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    match store.get_asset(id)? {
        Some(a) => {
            maybe_print_json(true, false, &a)?;
        }
        None => println!("No asset with id {}", id),
    }
    Ok(())
}

fn update(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let patch = AssetPatch {
        ticker: sub.get_one::<String>("ticker").map(|s| s.trim().to_string()),
        quantity: sub
            .get_one::<String>("quantity")
            .map(|s| parse_decimal(s))
            .transpose()?,
        price_buy: sub
            .get_one::<String>("price")
            .map(|s| parse_decimal(s))
            .transpose()?,
        date_buy: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        current_price: if sub.get_flag("clear-current") {
            // Back to valuing the lot at its buy price.
            Some(None)
        } else {
            sub.get_one::<String>("current")
                .map(|s| parse_decimal(s).map(Some))
                .transpose()?
        },
        asset_class: sub
            .get_one::<String>("class")
            .map(|s| s.trim().parse())
            .transpose()?,
    };
    if store.update_asset(id, &patch)? {
        println!("Updated asset #{}", id);
    } else {
        println!("No asset with id {}", id);
    }
    Ok(())
}

fn rm(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if store.delete_asset(id)? {
        println!("Removed asset #{}", id);
    } else {
        println!("No asset with id {}", id);
    }
    Ok(())
}

fn performance(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(asset) = store.get_asset(id)? else {
        println!("No asset with id {}", id);
        return Ok(());
    };
    let Some(perf) = store.asset_performance(id)? else {
        println!("No asset with id {}", id);
        return Ok(());
    };
    let rows = vec![vec![
        asset.ticker.clone(),
        asset.effective_price().to_string(),
        format!("{:.2}", perf.total_cost),
        format!("{:.2}", perf.current_value),
        format!("{:.2}", perf.gain_loss),
        format!("{:.2}%", perf.gain_loss_percent),
    ]];
    println!(
        "{}",
        pretty_table(
            &["Ticker", "Eff. Price", "Cost", "Value", "Gain/Loss", "Gain/Loss %"],
            rows
        )
    );
    Ok(())
}
