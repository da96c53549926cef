// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Transaction kind. Investment transactions are excluded from the personal
/// balance by business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Personal,
    Investment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Personal => "personal",
            TransactionKind::Investment => "investment",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(TransactionKind::Personal),
            "investment" => Ok(TransactionKind::Investment),
            other => Err(StoreError::Validation(format!(
                "unknown transaction kind '{}' (use personal|investment)",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Crypto,
    Stock,
    Bond,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Stock => "stock",
            AssetClass::Bond => "bond",
        }
    }
}

impl FromStr for AssetClass {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crypto" => Ok(AssetClass::Crypto),
            "stock" => Ok(AssetClass::Stock),
            "bond" => Ok(AssetClass::Bond),
            other => Err(StoreError::Validation(format!(
                "unknown asset class '{}' (use crypto|stock|bond)",
                other
            ))),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl FromStr for OrderSide {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(StoreError::Validation(format!(
                "unknown order side '{}' (use buy|sell)",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status. The only exposed transition is open -> closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OrderStatus::Open),
            "closed" => Ok(OrderStatus::Closed),
            other => Err(StoreError::Validation(format!(
                "unknown order status '{}' (use open|closed)",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub ticker: String,
    pub quantity: Decimal,
    pub price_buy: Decimal,
    pub date_buy: NaiveDate,
    pub current_price: Option<Decimal>,
    pub asset_class: AssetClass,
    pub created_at: String,
    pub updated_at: String,
}

impl Asset {
    /// Price used for valuation: the last refreshed price, or the purchase
    /// price when the asset has never been refreshed.
    pub fn effective_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.price_buy)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub ticker: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub side: OrderSide,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

// Insert shapes: ids and timestamps are assigned by the store.

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAsset {
    pub ticker: String,
    pub quantity: Decimal,
    pub price_buy: Decimal,
    pub date_buy: NaiveDate,
    pub current_price: Option<Decimal>,
    pub asset_class: AssetClass,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub ticker: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub side: OrderSide,
    pub date: NaiveDate,
    pub status: OrderStatus,
}

// Patch shapes: only supplied fields change; updated_at refreshes.

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetPatch {
    pub ticker: Option<String>,
    pub quantity: Option<Decimal>,
    pub price_buy: Option<Decimal>,
    pub date_buy: Option<NaiveDate>,
    pub current_price: Option<Option<Decimal>>,
    pub asset_class: Option<AssetClass>,
}

/// Status is deliberately absent: the only status mutations are the
/// close operations, so a closed order can never be reopened.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub ticker: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub side: Option<OrderSide>,
    pub date: Option<NaiveDate>,
}

// Aggregate results, recomputed from full scans on every call.

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationSlice {
    pub asset_class: AssetClass,
    pub value: Decimal,
    pub percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub allocation: Vec<AllocationSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetPerformance {
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub transactions: i64,
    pub assets: i64,
    pub orders: i64,
}
