use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// Valuation of a single open position against a current price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingValuation {
    /// The asset
    pub asset: Asset,

    /// Units held
    pub quantity: f64,

    /// Price per unit used for this valuation
    pub current_price: f64,

    /// Market value: `quantity * current_price`
    pub current_value: f64,

    /// Total cash spent acquiring the position
    pub cost_basis: f64,

    /// Average acquisition cost per unit
    pub average_cost: f64,

    /// Unrealized gain/loss: `current_value - cost_basis`
    pub pnl_amount: f64,

    /// Unrealized return: `pnl_amount / cost_basis * 100` (0 when basis is 0)
    pub pnl_percent: f64,

    /// Whether the position is at or above break-even
    pub is_profit: bool,

    /// Share of total portfolio value (this value / total value × 100)
    pub allocation_pct: f64,
}

/// Snapshot of the whole account at a point in time.
///
/// Holdings with no available quote are listed in `unpriced` and excluded
/// from every total — one dead quote never corrupts the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Instant this summary was computed
    pub as_of: DateTime<Utc>,

    /// Currency label for all monetary values
    pub currency: String,

    /// Cash available for buys
    pub cash_balance: f64,

    /// Market value of all priced holdings
    pub holdings_value: f64,

    /// `cash_balance + holdings_value`
    pub total_value: f64,

    /// Cost basis of the priced holdings
    pub total_cost_basis: f64,

    /// `holdings_value - total_cost_basis`
    pub unrealized_pnl: f64,

    /// `unrealized_pnl / total_cost_basis * 100` (0 when basis is 0)
    pub unrealized_pnl_pct: f64,

    /// Number of executed trades on record
    pub trade_count: usize,

    /// Execution instant of the earliest recorded trade, if any
    pub first_trade_at: Option<DateTime<Utc>>,

    /// Per-position valuations, largest allocation first
    pub holdings: Vec<HoldingValuation>,

    /// Held assets excluded from the totals for lack of a quote
    pub unpriced: Vec<Asset>,
}
