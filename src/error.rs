// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures the ledger store can report. Missing rows are not errors:
/// lookups return `Option` and mutations return `bool`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A categorical field fell outside its allowed set.
    #[error("validation: {0}")]
    Validation(String),

    /// Asset (ticker, date_buy) uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything SQLite-level. Propagated unmodified, never retried.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Per-ticker price-provider failure. Non-fatal: one ticker failing never
/// aborts the rest of a refresh batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no provider mapping for ticker '{0}'")]
    Unmapped(String),

    #[error("no usable price in response for '{0}'")]
    MissingPrice(String),
}
