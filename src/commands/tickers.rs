// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::error::StoreError;
use crate::models::AssetPatch;
use crate::store::LedgerStore;
use crate::utils::normalize_ticker;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("normalize", _)) => normalize(store)?,
        _ => {}
    }
    Ok(())
}

/// Rewrite composite symbols ("ARB - ARBITRUM (SCALING SOLUTION)") down to
/// the bare ticker, across assets and orders. A rewrite that would collide
/// with an existing (ticker, date_buy) pair is skipped and reported.
fn normalize(store: &LedgerStore) -> Result<()> {
    let mut changed = 0usize;
    let mut skipped = 0usize;

    for asset in store.list_assets(None)? {
        let clean = normalize_ticker(&asset.ticker);
        if clean == asset.ticker {
            continue;
        }
        let patch = AssetPatch {
            ticker: Some(clean.clone()),
            ..Default::default()
        };
        match store.update_asset(asset.id, &patch) {
            Ok(_) => {
                println!("asset #{}: '{}' -> '{}'", asset.id, asset.ticker, clean);
                changed += 1;
            }
            Err(StoreError::Conflict(_)) => {
                eprintln!(
                    "warning: asset #{}: '{}' -> '{}' collides with an existing lot, left as-is",
                    asset.id, asset.ticker, clean
                );
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    for order in store.list_orders(None)? {
        let clean = normalize_ticker(&order.ticker);
        if clean == order.ticker {
            continue;
        }
        store.update_order(
            order.id,
            &crate::models::OrderPatch {
                ticker: Some(clean.clone()),
                ..Default::default()
            },
        )?;
        println!("order #{}: '{}' -> '{}'", order.id, order.ticker, clean);
        changed += 1;
    }

    if changed == 0 && skipped == 0 {
        println!("All tickers already normalized");
    } else {
        println!("Normalized {} ticker(s), {} skipped", changed, skipped);
    }
    Ok(())
}
