// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Runtime settings, built once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Quote currency requested from price providers.
    pub currency: String,
    pub http_timeout: Duration,
    pub price_cache_ttl: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        let db_path = match std::env::var_os("POCKETFOLIO_DB") {
            Some(p) => PathBuf::from(p),
            None => default_db_path()?,
        };
        let currency = std::env::var("POCKETFOLIO_CURRENCY")
            .unwrap_or_else(|_| "usd".to_string())
            .to_lowercase();
        Ok(Config {
            db_path,
            currency,
            http_timeout: Duration::from_secs(10),
            price_cache_ttl: Duration::from_secs(300),
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com.pocketfolio", "Pocketfolio", "pocketfolio")
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    std::fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketfolio.sqlite"))
}
