// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod coingecko;
pub mod yahoo;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::error::{FetchError, StoreResult};
use crate::models::AssetClass;
use crate::store::LedgerStore;

/// A quote source. The store knows nothing about providers; providers know
/// nothing about the store.
pub trait PriceProvider {
    fn price(&self, ticker: &str, currency: &str) -> Result<Decimal, FetchError>;
}

struct CachedPrice {
    price: Decimal,
    fetched_at: Instant,
}

/// Per-ticker price memo. Entries expire on read after the TTL; an expired
/// entry is kept around and served only as a fallback when a live fetch
/// fails, never in preference to a fresh fetch.
pub struct PriceCache {
    ttl: Duration,
    entries: HashMap<String, CachedPrice>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        PriceCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn fresh(&self, ticker: &str) -> Option<Decimal> {
        self.fresh_at(ticker, Instant::now())
    }

    /// Any remembered price, regardless of age.
    pub fn stale(&self, ticker: &str) -> Option<Decimal> {
        self.entries.get(ticker).map(|c| c.price)
    }

    pub fn put(&mut self, ticker: &str, price: Decimal) {
        self.put_at(ticker, price, Instant::now());
    }

    fn fresh_at(&self, ticker: &str, now: Instant) -> Option<Decimal> {
        let cached = self.entries.get(ticker)?;
        if now.duration_since(cached.fetched_at) < self.ttl {
            Some(cached.price)
        } else {
            None
        }
    }

    fn put_at(&mut self, ticker: &str, price: Decimal, now: Instant) {
        self.entries.insert(
            ticker.to_string(),
            CachedPrice {
                price,
                fetched_at: now,
            },
        );
    }
}

/// End-of-batch accounting for a price refresh.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    /// Tickers priced by a live provider call.
    pub refreshed: usize,
    /// Tickers served from a still-fresh cache entry.
    pub cached: usize,
    /// Tickers whose fetch failed but a stale cache entry covered them.
    pub fallback: usize,
    /// Tickers with no price at all, with the per-ticker error text.
    pub failed: Vec<(String, String)>,
}

impl RefreshOutcome {
    pub fn succeeded(&self) -> usize {
        self.refreshed + self.cached + self.fallback
    }
}

/// Refresh `current_price` for every asset. Each ticker is fetched
/// independently; one failure never blocks the rest of the batch. Fetched
/// prices are written back through the store.
pub fn refresh_asset_prices(
    store: &LedgerStore,
    cache: &mut PriceCache,
    crypto: &dyn PriceProvider,
    equity: &dyn PriceProvider,
    currency: &str,
) -> StoreResult<RefreshOutcome> {
    let assets = store.list_assets(None)?;

    // Several lots may share a ticker; fetch once per (ticker, class).
    let mut tickers: Vec<(String, AssetClass)> = Vec::new();
    for asset in &assets {
        let key = (asset.ticker.clone(), asset.asset_class);
        if !tickers.contains(&key) {
            tickers.push(key);
        }
    }

    let mut outcome = RefreshOutcome::default();
    let mut priced: HashMap<String, Decimal> = HashMap::new();

    for (ticker, class) in tickers {
        if let Some(price) = cache.fresh(&ticker) {
            priced.insert(ticker, price);
            outcome.cached += 1;
            continue;
        }
        let provider: &dyn PriceProvider = match class {
            AssetClass::Crypto => crypto,
            AssetClass::Stock | AssetClass::Bond => equity,
        };
        match provider.price(&ticker, currency) {
            Ok(price) => {
                cache.put(&ticker, price);
                priced.insert(ticker, price);
                outcome.refreshed += 1;
            }
            Err(e) => match cache.stale(&ticker) {
                Some(price) => {
                    priced.insert(ticker, price);
                    outcome.fallback += 1;
                }
                None => outcome.failed.push((ticker, e.to_string())),
            },
        }
    }

    for asset in &assets {
        if let Some(&price) = priced.get(&asset.ticker) {
            store.set_current_price(asset.id, price)?;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn cache_entry_expires_after_ttl() {
        let mut cache = PriceCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.put_at("BTC", dec("52000"), t0);

        assert_eq!(cache.fresh_at("BTC", t0 + Duration::from_secs(299)), Some(dec("52000")));
        assert_eq!(cache.fresh_at("BTC", t0 + Duration::from_secs(300)), None);
        // Expired entries stay available as a fallback.
        assert_eq!(cache.stale("BTC"), Some(dec("52000")));
    }

    #[test]
    fn cache_misses_unknown_ticker() {
        let cache = PriceCache::new(Duration::from_secs(300));
        assert_eq!(cache.fresh("ETH"), None);
        assert_eq!(cache.stale("ETH"), None);
    }

    struct FixedProvider(Decimal);
    impl PriceProvider for FixedProvider {
        fn price(&self, _t: &str, _c: &str) -> Result<Decimal, FetchError> {
            Ok(self.0)
        }
    }

    struct FailingProvider;
    impl PriceProvider for FailingProvider {
        fn price(&self, t: &str, _c: &str) -> Result<Decimal, FetchError> {
            Err(FetchError::Unmapped(t.to_string()))
        }
    }

    fn store_with_assets() -> LedgerStore {
        use crate::models::NewAsset;
        let store = LedgerStore::open_in_memory().unwrap();
        store
            .add_asset(&NewAsset {
                ticker: "BTC".into(),
                quantity: dec("0.5"),
                price_buy: dec("50000"),
                date_buy: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                current_price: None,
                asset_class: AssetClass::Crypto,
            })
            .unwrap();
        store
            .add_asset(&NewAsset {
                ticker: "AAPL".into(),
                quantity: dec("10"),
                price_buy: dec("180"),
                date_buy: chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                current_price: None,
                asset_class: AssetClass::Stock,
            })
            .unwrap();
        store
    }

    #[test]
    fn refresh_writes_prices_back_per_class() {
        let store = store_with_assets();
        let mut cache = PriceCache::new(Duration::from_secs(300));
        let outcome = refresh_asset_prices(
            &store,
            &mut cache,
            &FixedProvider(dec("52000")),
            &FixedProvider(dec("190")),
            "usd",
        )
        .unwrap();

        assert_eq!(outcome.refreshed, 2);
        assert!(outcome.failed.is_empty());
        let assets = store.list_assets(None).unwrap();
        assert_eq!(assets[0].current_price, Some(dec("52000")));
        assert_eq!(assets[1].current_price, Some(dec("190")));
    }

    #[test]
    fn one_failure_never_blocks_the_batch() {
        let store = store_with_assets();
        let mut cache = PriceCache::new(Duration::from_secs(300));
        let outcome = refresh_asset_prices(
            &store,
            &mut cache,
            &FailingProvider,
            &FixedProvider(dec("190")),
            "usd",
        )
        .unwrap();

        assert_eq!(outcome.refreshed, 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "BTC");
        let assets = store.list_assets(None).unwrap();
        assert_eq!(assets[0].current_price, None);
        assert_eq!(assets[1].current_price, Some(dec("190")));
    }

    #[test]
    fn second_refresh_within_ttl_is_served_from_cache() {
        let store = store_with_assets();
        let mut cache = PriceCache::new(Duration::from_secs(300));

        let first = refresh_asset_prices(
            &store,
            &mut cache,
            &FixedProvider(dec("52000")),
            &FixedProvider(dec("190")),
            "usd",
        )
        .unwrap();
        assert_eq!(first.refreshed, 2);
        assert_eq!(first.cached, 0);

        // Same cache, providers now failing: the memo covers both tickers
        // without counting as a fallback.
        let second = refresh_asset_prices(
            &store,
            &mut cache,
            &FailingProvider,
            &FailingProvider,
            "usd",
        )
        .unwrap();
        assert_eq!(second.refreshed, 0);
        assert_eq!(second.cached, 2);
        assert_eq!(second.fallback, 0);
        assert!(second.failed.is_empty());
    }

    #[test]
    fn stale_cache_covers_a_failed_fetch() {
        let store = store_with_assets();
        let mut cache = PriceCache::new(Duration::from_secs(0));
        cache.put("BTC", dec("51000"));

        let outcome = refresh_asset_prices(
            &store,
            &mut cache,
            &FailingProvider,
            &FixedProvider(dec("190")),
            "usd",
        )
        .unwrap();

        assert_eq!(outcome.fallback, 1);
        assert!(outcome.failed.is_empty());
        let assets = store.list_assets(None).unwrap();
        assert_eq!(assets[0].current_price, Some(dec("51000")));
    }
}
