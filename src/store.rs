// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use rusqlite::types::{Type, Value};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params, params_from_iter};
use rust_decimal::Decimal;

use crate::db;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    AllocationSlice, Asset, AssetClass, AssetPatch, AssetPerformance, CategorySummary,
    DatabaseStats, NewAsset, NewOrder, NewTransaction, Order, OrderPatch, OrderStatus,
    PortfolioSummary, Transaction, TransactionKind, TransactionPatch,
};

/// The ledger store: exclusive owner of the transactions, assets and orders
/// tables. All reads and writes go through here; aggregates are recomputed
/// from full scans on every call so mutations are reflected immediately.
pub struct LedgerStore {
    conn: Connection,
}

fn decimal_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    Decimal::from_str_exact(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn opt_decimal_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let s: Option<String> = r.get(idx)?;
    match s {
        Some(s) => Decimal::from_str_exact(&s)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

fn enum_col<T: FromStr<Err = StoreError>>(r: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let s: String = r.get(idx)?;
    T::from_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn tx_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get(1)?,
        amount: decimal_col(r, 2)?,
        category: r.get(3)?,
        kind: enum_col(r, 4)?,
        description: r.get(5)?,
        created_at: r.get(6)?,
        updated_at: r.get(7)?,
    })
}

fn asset_from_row(r: &Row<'_>) -> rusqlite::Result<Asset> {
    Ok(Asset {
        id: r.get(0)?,
        ticker: r.get(1)?,
        quantity: decimal_col(r, 2)?,
        price_buy: decimal_col(r, 3)?,
        date_buy: r.get(4)?,
        current_price: opt_decimal_col(r, 5)?,
        asset_class: enum_col(r, 6)?,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    })
}

fn order_from_row(r: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: r.get(0)?,
        ticker: r.get(1)?,
        quantity: decimal_col(r, 2)?,
        price: decimal_col(r, 3)?,
        side: enum_col(r, 4)?,
        date: r.get(5)?,
        status: enum_col(r, 6)?,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    })
}

const TX_COLS: &str = "id, date, amount, category, kind, description, created_at, updated_at";
const ASSET_COLS: &str =
    "id, ticker, quantity, price_buy, date_buy, current_price, asset_class, created_at, updated_at";
const ORDER_COLS: &str =
    "id, ticker, quantity, price, side, date, status, created_at, updated_at";

impl LedgerStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(LedgerStore {
            conn: db::open_or_init(path)?,
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(LedgerStore {
            conn: db::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ----- transactions -----

    pub fn add_transaction(&self, new: &NewTransaction) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO transactions(date, amount, category, kind, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.date.to_string(),
                new.amount.to_string(),
                new.category,
                new.kind.as_str(),
                new.description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_transaction(&self, id: i64) -> StoreResult<Option<Transaction>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id=?1", TX_COLS),
                params![id],
                tx_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
    ) -> StoreResult<Vec<Transaction>> {
        let mut sql = format!("SELECT {} FROM transactions", TX_COLS);
        let mut vals: Vec<Value> = Vec::new();
        if let Some(k) = kind {
            sql.push_str(" WHERE kind=?1");
            vals.push(Value::from(k.as_str().to_string()));
        }
        sql.push_str(" ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(vals), tx_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn search_transactions(&self, text: &str) -> StoreResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM transactions
             WHERE description IS NOT NULL
               AND instr(lower(description), lower(?1)) > 0
             ORDER BY id",
            TX_COLS
        ))?;
        let rows = stmt.query_map(params![text], tx_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> StoreResult<bool> {
        let mut sets: Vec<&str> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();
        if let Some(d) = patch.date {
            sets.push("date");
            vals.push(Value::from(d.to_string()));
        }
        if let Some(a) = patch.amount {
            sets.push("amount");
            vals.push(Value::from(a.to_string()));
        }
        if let Some(ref c) = patch.category {
            sets.push("category");
            vals.push(Value::from(c.clone()));
        }
        if let Some(k) = patch.kind {
            sets.push("kind");
            vals.push(Value::from(k.as_str().to_string()));
        }
        if let Some(ref desc) = patch.description {
            sets.push("description");
            vals.push(match desc {
                Some(s) => Value::from(s.clone()),
                None => Value::Null,
            });
        }
        self.apply_patch("transactions", id, sets, vals)
    }

    pub fn delete_transaction(&self, id: i64) -> StoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    // ----- assets -----

    pub fn add_asset(&self, new: &NewAsset) -> StoreResult<i64> {
        let res = self.conn.execute(
            "INSERT INTO assets(ticker, quantity, price_buy, date_buy, current_price, asset_class)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.ticker,
                new.quantity.to_string(),
                new.price_buy.to_string(),
                new.date_buy.to_string(),
                new.current_price.map(|p| p.to_string()),
                new.asset_class.as_str()
            ],
        );
        match res {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Conflict(format!(
                    "asset '{}' already recorded for {}",
                    new.ticker, new.date_buy
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_asset(&self, id: i64) -> StoreResult<Option<Asset>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM assets WHERE id=?1", ASSET_COLS),
                params![id],
                asset_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn list_assets(&self, class: Option<AssetClass>) -> StoreResult<Vec<Asset>> {
        let mut sql = format!("SELECT {} FROM assets", ASSET_COLS);
        let mut vals: Vec<Value> = Vec::new();
        if let Some(c) = class {
            sql.push_str(" WHERE asset_class=?1");
            vals.push(Value::from(c.as_str().to_string()));
        }
        sql.push_str(" ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(vals), asset_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn update_asset(&self, id: i64, patch: &AssetPatch) -> StoreResult<bool> {
        let mut sets: Vec<&str> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();
        if let Some(ref t) = patch.ticker {
            sets.push("ticker");
            vals.push(Value::from(t.clone()));
        }
        if let Some(q) = patch.quantity {
            sets.push("quantity");
            vals.push(Value::from(q.to_string()));
        }
        if let Some(p) = patch.price_buy {
            sets.push("price_buy");
            vals.push(Value::from(p.to_string()));
        }
        if let Some(d) = patch.date_buy {
            sets.push("date_buy");
            vals.push(Value::from(d.to_string()));
        }
        if let Some(ref cp) = patch.current_price {
            sets.push("current_price");
            vals.push(match cp {
                Some(p) => Value::from(p.to_string()),
                None => Value::Null,
            });
        }
        if let Some(c) = patch.asset_class {
            sets.push("asset_class");
            vals.push(Value::from(c.as_str().to_string()));
        }
        match self.apply_patch("assets", id, sets, vals) {
            Err(StoreError::Storage(rusqlite::Error::SqliteFailure(e, _)))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Conflict(format!(
                    "asset update for id {} collides on (ticker, date_buy)",
                    id
                )))
            }
            other => other,
        }
    }

    pub fn delete_asset(&self, id: i64) -> StoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM assets WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    /// Write-back hook for price refresh.
    pub fn set_current_price(&self, id: i64, price: Decimal) -> StoreResult<bool> {
        self.update_asset(
            id,
            &AssetPatch {
                current_price: Some(Some(price)),
                ..Default::default()
            },
        )
    }

    // ----- orders -----

    pub fn add_order(&self, new: &NewOrder) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO orders(ticker, quantity, price, side, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.ticker,
                new.quantity.to_string(),
                new.price.to_string(),
                new.side.as_str(),
                new.date.to_string(),
                new.status.as_str()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM orders WHERE id=?1", ORDER_COLS),
                params![id],
                order_from_row,
            )
            .optional()?;
        Ok(row)
    }

    pub fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        let mut sql = format!("SELECT {} FROM orders", ORDER_COLS);
        let mut vals: Vec<Value> = Vec::new();
        if let Some(s) = status {
            sql.push_str(" WHERE status=?1");
            vals.push(Value::from(s.as_str().to_string()));
        }
        sql.push_str(" ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(vals), order_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn update_order(&self, id: i64, patch: &OrderPatch) -> StoreResult<bool> {
        let mut sets: Vec<&str> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();
        if let Some(ref t) = patch.ticker {
            sets.push("ticker");
            vals.push(Value::from(t.clone()));
        }
        if let Some(q) = patch.quantity {
            sets.push("quantity");
            vals.push(Value::from(q.to_string()));
        }
        if let Some(p) = patch.price {
            sets.push("price");
            vals.push(Value::from(p.to_string()));
        }
        if let Some(s) = patch.side {
            sets.push("side");
            vals.push(Value::from(s.as_str().to_string()));
        }
        if let Some(d) = patch.date {
            sets.push("date");
            vals.push(Value::from(d.to_string()));
        }
        self.apply_patch("orders", id, sets, vals)
    }

    pub fn delete_order(&self, id: i64) -> StoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM orders WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    /// One-way open -> closed transition. Closing an already-closed order
    /// succeeds and leaves the row untouched.
    pub fn close_order(&self, id: i64) -> StoreResult<bool> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM orders WHERE id=?1",
                params![id],
                |r| r.get(0),
            )
            .optional()?;
        match status.as_deref() {
            None => Ok(false),
            Some("closed") => Ok(true),
            Some(_) => {
                self.conn.execute(
                    "UPDATE orders SET status='closed', updated_at=datetime('now') WHERE id=?1",
                    params![id],
                )?;
                Ok(true)
            }
        }
    }

    /// The only bulk mutation: returns how many orders transitioned.
    pub fn close_all_open_orders(&self) -> StoreResult<usize> {
        let n = self.conn.execute(
            "UPDATE orders SET status='closed', updated_at=datetime('now') WHERE status='open'",
            [],
        )?;
        Ok(n)
    }

    // ----- aggregates -----

    /// Sum of personal transaction amounts. Investment transactions are
    /// excluded by business rule.
    pub fn balance(&self) -> StoreResult<Decimal> {
        let mut stmt = self
            .conn
            .prepare("SELECT amount FROM transactions WHERE kind='personal'")?;
        let rows = stmt.query_map([], |r| decimal_col(r, 0))?;
        let mut total = Decimal::ZERO;
        for row in rows {
            total += row?;
        }
        Ok(total)
    }

    /// Signed total and row count per category, ordered by category name.
    pub fn category_summary(&self) -> StoreResult<Vec<CategorySummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM transactions")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, decimal_col(r, 1)?)))?;
        let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
        for row in rows {
            let (category, amount) = row?;
            let entry = groups.entry(category).or_insert((Decimal::ZERO, 0));
            entry.0 += amount;
            entry.1 += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(category, (total, count))| CategorySummary {
                category,
                total,
                count,
            })
            .collect())
    }

    pub fn portfolio_value(&self) -> StoreResult<Decimal> {
        let mut total = Decimal::ZERO;
        for asset in self.list_assets(None)? {
            total += asset.quantity * asset.effective_price();
        }
        Ok(total)
    }

    pub fn portfolio_summary(&self) -> StoreResult<PortfolioSummary> {
        let mut by_class: BTreeMap<AssetClass, Decimal> = BTreeMap::new();
        let mut total_value = Decimal::ZERO;
        for asset in self.list_assets(None)? {
            let value = asset.quantity * asset.effective_price();
            *by_class.entry(asset.asset_class).or_insert(Decimal::ZERO) += value;
            total_value += value;
        }
        let hundred = Decimal::from(100);
        let allocation = by_class
            .into_iter()
            .map(|(asset_class, value)| AllocationSlice {
                asset_class,
                value,
                percent: if total_value.is_zero() {
                    Decimal::ZERO
                } else {
                    value / total_value * hundred
                },
            })
            .collect();
        Ok(PortfolioSummary {
            total_value,
            allocation,
        })
    }

    pub fn asset_performance(&self, id: i64) -> StoreResult<Option<AssetPerformance>> {
        let Some(asset) = self.get_asset(id)? else {
            return Ok(None);
        };
        let total_cost = asset.quantity * asset.price_buy;
        let current_value = asset.quantity * asset.effective_price();
        let gain_loss = current_value - total_cost;
        let gain_loss_percent = if total_cost.is_zero() {
            Decimal::ZERO
        } else {
            gain_loss / total_cost * Decimal::from(100)
        };
        Ok(Some(AssetPerformance {
            total_cost,
            current_value,
            gain_loss,
            gain_loss_percent,
        }))
    }

    pub fn stats(&self) -> StoreResult<DatabaseStats> {
        let count = |table: &str| -> StoreResult<i64> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
            Ok(n)
        };
        Ok(DatabaseStats {
            transactions: count("transactions")?,
            assets: count("assets")?,
            orders: count("orders")?,
        })
    }

    // ----- internals -----

    fn apply_patch(
        &self,
        table: &str,
        id: i64,
        sets: Vec<&str>,
        mut vals: Vec<Value>,
    ) -> StoreResult<bool> {
        if sets.is_empty() {
            // Nothing to change; report whether the row exists.
            let exists: Option<i64> = self
                .conn
                .query_row(
                    &format!("SELECT id FROM {} WHERE id=?1", table),
                    params![id],
                    |r| r.get(0),
                )
                .optional()?;
            return Ok(exists.is_some());
        }
        let assignments: Vec<String> = sets
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{}=?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, updated_at=datetime('now') WHERE id=?{}",
            table,
            assignments.join(", "),
            sets.len() + 1
        );
        vals.push(Value::from(id));
        let n = self.conn.execute(&sql, params_from_iter(vals))?;
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr as _;

    fn sample_tx(amount: &str, kind: TransactionKind) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount: Decimal::from_str(amount).unwrap(),
            category: "general".into(),
            kind,
            description: None,
        }
    }

    #[test]
    fn balance_ignores_investment_transactions() {
        let store = LedgerStore::open_in_memory().unwrap();
        store
            .add_transaction(&sample_tx("3000.0", TransactionKind::Personal))
            .unwrap();
        store
            .add_transaction(&sample_tx("-50.0", TransactionKind::Personal))
            .unwrap();
        store
            .add_transaction(&sample_tx("-30.0", TransactionKind::Personal))
            .unwrap();
        assert_eq!(store.balance().unwrap(), Decimal::from_str("2920.0").unwrap());

        store
            .add_transaction(&sample_tx("-1000.0", TransactionKind::Investment))
            .unwrap();
        assert_eq!(store.balance().unwrap(), Decimal::from_str("2920.0").unwrap());
    }

    #[test]
    fn empty_patch_reports_existence() {
        let store = LedgerStore::open_in_memory().unwrap();
        let id = store
            .add_transaction(&sample_tx("1", TransactionKind::Personal))
            .unwrap();
        assert!(store
            .update_transaction(id, &TransactionPatch::default())
            .unwrap());
        assert!(!store
            .update_transaction(id + 1, &TransactionPatch::default())
            .unwrap());
    }

}
