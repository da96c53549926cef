// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("portfolio", sub)) => portfolio(store, sub)?,
        Some(("stats", sub)) => stats(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn balance(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let bal = store.balance()?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &json!({ "balance": bal }))? {
        println!("Balance (personal): {:.2}", bal);
    }
    Ok(())
}

fn categories(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.category_summary()?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|c| vec![c.category, format!("{:.2}", c.total), c.count.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
    }
    Ok(())
}

fn portfolio(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let summary = store.portfolio_summary()?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = summary
            .allocation
            .iter()
            .map(|s| {
                vec![
                    s.asset_class.to_string(),
                    format!("{:.2}", s.value),
                    format!("{:.2}%", s.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Class", "Value", "Share"], rows));
        println!("Total portfolio value: {:.2}", summary.total_value);
    }
    Ok(())
}

fn stats(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let s = store.stats()?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["transactions".to_string(), s.transactions.to_string()],
            vec!["assets".to_string(), s.assets.to_string()],
            vec!["orders".to_string(), s.orders.to_string()],
        ];
        println!("{}", pretty_table(&["Table", "Rows"], rows));
    }
    Ok(())
}
