// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::FetchError;
use crate::prices::PriceProvider;

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct QuoteEnvelope {
    quoteResponse: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    result: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "postMarketPrice")]
    post_market_price: Option<f64>,
    #[serde(rename = "preMarketPrice")]
    pre_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    close: Vec<Option<f64>>,
}

pub struct Yahoo {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Yahoo {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Yahoo {
            client,
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Most recent daily close, used when the quote endpoint has no live
    /// price field for the symbol.
    fn last_close(&self, symbol: &str) -> Result<Option<f64>, FetchError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=5d&interval=1d",
            self.base_url, symbol
        );
        let envelope: ChartEnvelope = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;
        let close = envelope
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.indicators.quote.into_iter().next())
            .and_then(|q| q.close.into_iter().rev().flatten().next());
        Ok(close)
    }
}

impl PriceProvider for Yahoo {
    fn price(&self, ticker: &str, _currency: &str) -> Result<Decimal, FetchError> {
        let symbol = ticker.trim().to_uppercase();
        let url = format!(
            "{}/v7/finance/quote?symbols={}",
            self.base_url, symbol
        );
        let envelope: QuoteEnvelope = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;

        // Live fields in preference order, then the historical fallback.
        let live = envelope.quoteResponse.result.first().and_then(|q| {
            q.regular_market_price
                .or(q.post_market_price)
                .or(q.pre_market_price)
        });
        let px = match live {
            Some(px) => px,
            None => self
                .last_close(&symbol)?
                .ok_or_else(|| FetchError::MissingPrice(symbol.clone()))?,
        };
        Decimal::from_f64_retain(px).ok_or(FetchError::MissingPrice(symbol))
    }
}
