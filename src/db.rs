// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreResult;

pub fn open_or_init(path: &Path) -> StoreResult<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    // Decimals and dates are TEXT; categorical columns carry a CHECK as a
    // backstop behind the typed enums validated in Rust.
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('personal','investment')),
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);
    CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker TEXT NOT NULL,
        quantity TEXT NOT NULL,
        price_buy TEXT NOT NULL,
        date_buy TEXT NOT NULL,
        current_price TEXT,
        asset_class TEXT NOT NULL CHECK(asset_class IN ('crypto','stock','bond')),
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(ticker, date_buy)
    );
    CREATE INDEX IF NOT EXISTS idx_assets_ticker ON assets(ticker);
    CREATE INDEX IF NOT EXISTS idx_assets_class ON assets(asset_class);

    CREATE TABLE IF NOT EXISTS orders(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker TEXT NOT NULL,
        quantity TEXT NOT NULL,
        price TEXT NOT NULL,
        side TEXT NOT NULL CHECK(side IN ('buy','sell')),
        date TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('open','closed')),
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_orders_ticker ON orders(ticker);
    CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status);
    CREATE INDEX IF NOT EXISTS idx_orders_date ON orders(date);
    "#,
    )?;
    Ok(())
}
