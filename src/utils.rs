// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

const UA: &str = concat!("pocketfolio/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Collapse composite symbols like "ARB - ARBITRUM (SCALING SOLUTION)" to the
/// plain ticker before the first " - " separator.
pub fn normalize_ticker(raw: &str) -> String {
    match raw.split_once(" - ") {
        Some((head, _)) => head.trim().to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ticker_strips_composite_suffix() {
        assert_eq!(normalize_ticker("ARB - ARBITRUM (SCALING SOLUTION)"), "ARB");
        assert_eq!(normalize_ticker("BTC"), "BTC");
        assert_eq!(normalize_ticker("  ETH  "), "ETH");
        // A hyphen without surrounding spaces is part of the symbol.
        assert_eq!(normalize_ticker("BRK-B"), "BRK-B");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-01-15").is_ok());
        assert!(parse_date("15/01/2024").is_err());
    }
}
