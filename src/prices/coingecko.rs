// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::FetchError;
use crate::prices::PriceProvider;

/// CoinGecko keys quotes by its own coin ids, not exchange tickers.
static COIN_IDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("BTC", "bitcoin"),
        ("ETH", "ethereum"),
        ("SOL", "solana"),
        ("ADA", "cardano"),
        ("DOT", "polkadot"),
        ("ARB", "arbitrum"),
        ("OP", "optimism"),
        ("MATIC", "matic-network"),
        ("DOGE", "dogecoin"),
        ("XRP", "ripple"),
        ("LINK", "chainlink"),
        ("AVAX", "avalanche-2"),
        ("ATOM", "cosmos"),
        ("LTC", "litecoin"),
        ("UNI", "uniswap"),
        ("AAVE", "aave"),
    ])
});

pub struct CoinGecko {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinGecko {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        CoinGecko {
            client,
            base_url: "https://api.coingecko.com/api/v3".to_string(),
        }
    }
}

impl PriceProvider for CoinGecko {
    fn price(&self, ticker: &str, currency: &str) -> Result<Decimal, FetchError> {
        let symbol = ticker.trim().to_uppercase();
        let id = COIN_IDS
            .get(symbol.as_str())
            .ok_or_else(|| FetchError::Unmapped(symbol.clone()))?;
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, id, currency
        );
        let resp: HashMap<String, HashMap<String, f64>> = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;
        resp.get(*id)
            .and_then(|quotes| quotes.get(currency))
            .and_then(|px| Decimal::from_f64_retain(*px))
            .ok_or_else(|| FetchError::MissingPrice(symbol))
    }
}
