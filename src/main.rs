// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketfolio::{cli, commands, config::Config, prices::PriceCache, store::LedgerStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::load()?;
    let store = LedgerStore::open(&cfg.db_path)?;
    // Process-lifetime price memo shared by every refresh in this run.
    let mut price_cache = PriceCache::new(cfg.price_cache_ttl);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&store, sub)?,
        Some(("order", sub)) => commands::orders::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("price", sub)) => commands::prices::handle(&store, &cfg, &mut price_cache, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("seed", _)) => commands::seed::handle(&store)?,
        Some(("tickers", sub)) => commands::tickers::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
