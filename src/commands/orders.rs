// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::transactions::parse_id;
use crate::models::{NewOrder, Order, OrderPatch, OrderSide, OrderStatus};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("get", sub)) => get(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("close", sub)) => close(store, sub)?,
        Some(("close-all", _)) => close_all(store)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let ticker = sub.get_one::<String>("ticker").unwrap().trim().to_string();
    let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap())?;
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let side: OrderSide = sub.get_one::<String>("side").unwrap().trim().parse()?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let status: OrderStatus = sub
        .get_one::<String>("status")
        .map(|s| s.trim())
        .unwrap_or("open")
        .parse()?;

    let id = store.add_order(&NewOrder {
        ticker: ticker.clone(),
        quantity,
        price,
        side,
        date,
        status,
    })?;
    println!("Recorded {} order #{}: {} x {} @ {}", side, id, quantity, ticker, price);
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.trim().parse::<OrderStatus>())
        .transpose()?;
    let data = store.list_orders(status)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows_plain(&data);
    }
    Ok(())
}

fn print_rows_plain(data: &[Order]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                o.ticker.clone(),
                o.quantity.to_string(),
                o.price.to_string(),
                o.side.to_string(),
                o.date.to_string(),
                o.status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Ticker", "Qty", "Price", "Side", "Date", "Status"],
            rows
        )
    );
}

fn get(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    match store.get_order(id)? {
        Some(o) => {
            maybe_print_json(true, false, &o)?;
        }
        None => println!("No order with id {}", id),
    }
    Ok(())
}

fn update(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let patch = OrderPatch {
        ticker: sub.get_one::<String>("ticker").map(|s| s.trim().to_string()),
        quantity: sub
            .get_one::<String>("quantity")
            .map(|s| parse_decimal(s))
            .transpose()?,
        price: sub
            .get_one::<String>("price")
            .map(|s| parse_decimal(s))
            .transpose()?,
        side: sub
            .get_one::<String>("side")
            .map(|s| s.trim().parse())
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    if store.update_order(id, &patch)? {
        println!("Updated order #{}", id);
    } else {
        println!("No order with id {}", id);
    }
    Ok(())
}

fn rm(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if store.delete_order(id)? {
        println!("Removed order #{}", id);
    } else {
        println!("No order with id {}", id);
    }
    Ok(())
}

fn close(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if store.close_order(id)? {
        println!("Order #{} closed", id);
    } else {
        println!("No order with id {}", id);
    }
    Ok(())
}

fn close_all(store: &LedgerStore) -> Result<()> {
    let n = store.close_all_open_orders()?;
    println!("Closed {} open order(s)", n);
    Ok(())
}
