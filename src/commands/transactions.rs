// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::models::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("get", sub)) => get(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("search", sub)) => search(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn parse_id(sub: &clap::ArgMatches) -> Result<i64> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", raw))
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let kind: TransactionKind = sub
        .get_one::<String>("kind")
        .map(|s| s.trim())
        .unwrap_or("personal")
        .parse()?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    let id = store.add_transaction(&NewTransaction {
        date,
        amount,
        category: category.clone(),
        kind,
        description,
    })?;
    println!("Recorded {} transaction #{} ({} on {})", kind, id, amount, date);
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.trim().parse::<TransactionKind>())
        .transpose()?;
    let data = store.list_transactions(kind)?;
    print_rows(sub, &data)
}

fn search(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let text = sub.get_one::<String>("TEXT").unwrap();
    let data = store.search_transactions(text)?;
    print_rows_plain(&data);
    Ok(())
}

fn print_rows(sub: &clap::ArgMatches, data: &[Transaction]) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows_plain(data);
    }
    Ok(())
}

fn print_rows_plain(data: &[Transaction]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.amount.to_string(),
                t.category.clone(),
                t.kind.to_string(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Amount", "Category", "Kind", "Description"], rows)
    );
}

fn get(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    match store.get_transaction(id)? {
        Some(t) => {
            maybe_print_json(true, false, &t)?;
        }
        None => println!("No transaction with id {}", id),
    }
    Ok(())
}

fn update(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let patch = TransactionPatch {
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        kind: sub
            .get_one::<String>("kind")
            .map(|s| s.trim().parse())
            .transpose()?,
        description: sub
            .get_one::<String>("description")
            .map(|s| Some(s.to_string())),
    };
    if store.update_transaction(id, &patch)? {
        println!("Updated transaction #{}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn rm(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if store.delete_transaction(id)? {
        println!("Removed transaction #{}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
