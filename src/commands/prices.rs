// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Config;
use crate::prices::coingecko::CoinGecko;
use crate::prices::yahoo::Yahoo;
use crate::prices::{PriceCache, refresh_asset_prices};
use crate::store::LedgerStore;
use crate::utils::http_client;

/// The cache lives at process scope (built in `main`) so repeated refreshes
/// within one run share the five-minute memo instead of refetching.
pub fn handle(
    store: &LedgerStore,
    cfg: &Config,
    cache: &mut PriceCache,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("refresh", _)) => refresh(store, cfg, cache)?,
        _ => {}
    }
    Ok(())
}

fn refresh(store: &LedgerStore, cfg: &Config, cache: &mut PriceCache) -> Result<()> {
    let total = store.list_assets(None)?.len();
    if total == 0 {
        println!("No assets to refresh");
        return Ok(());
    }

    let crypto = CoinGecko::new(http_client(cfg.http_timeout)?);
    let equity = Yahoo::new(http_client(cfg.http_timeout)?);

    let outcome = refresh_asset_prices(store, cache, &crypto, &equity, &cfg.currency)?;

    for (ticker, err) in &outcome.failed {
        eprintln!("warning: {}: {}", ticker, err);
    }
    println!(
        "Prices: {} fetched, {} from cache, {} stale fallback, {} failed",
        outcome.refreshed,
        outcome.cached,
        outcome.fallback,
        outcome.failed.len()
    );
    Ok(())
}
