use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::Asset;

/// Which way a trade went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    /// Exchanging cash for an asset
    Buy,
    /// Exchanging an asset back into cash
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeSortOrder {
    /// Most recent execution first (default for display)
    NewestFirst,
    /// Oldest execution first
    OldestFirst,
    /// Largest cash amount first
    TotalDesc,
    /// Smallest cash amount first
    TotalAsc,
    /// Alphabetical by asset symbol
    AssetAsc,
    /// Reverse alphabetical by asset symbol
    AssetDesc,
}

/// Immutable record of one executed trade.
///
/// Created exactly once per successful buy/sell, never mutated afterwards.
/// The asset is embedded whole so history rows render without any lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Execution instant
    pub executed_at: DateTime<Utc>,

    /// Buy or Sell
    pub side: TradeSide,

    /// The asset traded
    pub asset: Asset,

    /// Units traded (always positive)
    pub quantity: f64,

    /// Price per unit at execution time
    pub unit_price: f64,

    /// Cash exchanged: `quantity * unit_price`
    pub total: f64,
}

impl Transaction {
    pub fn new(side: TradeSide, asset: Asset, quantity: f64, unit_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            executed_at: Utc::now(),
            side,
            asset,
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

/// What a successful buy/sell hands back to the caller: the created
/// transaction plus the cash balance after the trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub transaction: Transaction,
    pub cash_balance: f64,
}

/// Append-only trade history, stored newest-first.
///
/// Entries are only ever prepended (on trade execution) or cleared wholesale
/// (on ledger reset) — individual records are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a freshly-executed transaction (most recent first).
    pub fn append(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    /// Empty the log. Only called on full ledger reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
