use chrono::{DateTime, Utc};

use crate::models::ledger::{Holding, Ledger};
use crate::models::summary::{HoldingValuation, PortfolioSummary};
use crate::models::transaction::TransactionLog;

/// Computes market valuations and profit/loss from current prices.
///
/// Every function here is a pure query: prices come in as arguments and no
/// ledger state is touched. A holding with no available price is treated as
/// "unknown" and skipped, never as an error — a single dead quote must not
/// sink an aggregate.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value one position at `current_price`.
    ///
    /// `pnl_percent` guards the zero-cost-basis case (a position that
    /// somehow carries no cost reports 0%, it does not divide).
    /// `allocation_pct` is left at 0 here; `portfolio_summary` fills it
    /// once the total is known.
    #[must_use]
    pub fn valuate(&self, holding: &Holding, current_price: f64) -> HoldingValuation {
        let current_value = holding.quantity * current_price;
        let pnl_amount = current_value - holding.cost_basis;
        let pnl_percent = if holding.cost_basis > 0.0 {
            pnl_amount / holding.cost_basis * 100.0
        } else {
            0.0
        };

        HoldingValuation {
            asset: holding.asset.clone(),
            quantity: holding.quantity,
            current_price,
            current_value,
            cost_basis: holding.cost_basis,
            average_cost: holding.average_cost(),
            pnl_amount,
            pnl_percent,
            is_profit: pnl_amount >= 0.0,
            allocation_pct: 0.0,
        }
    }

    /// Total account value: cash plus the market value of every holding a
    /// price is available for. Assets `price_of` cannot answer contribute
    /// zero rather than failing the computation.
    #[must_use]
    pub fn total_portfolio_value<F>(&self, ledger: &Ledger, price_of: F) -> f64
    where
        F: Fn(&str) -> Option<f64>,
    {
        let holdings_value: f64 = ledger
            .holdings
            .values()
            .filter_map(|h| price_of(&h.asset.id).map(|price| h.quantity * price))
            .sum();
        ledger.cash_balance + holdings_value
    }

    /// Full account snapshot: per-position valuations with allocation
    /// percentages (largest first) plus portfolio-wide totals.
    ///
    /// Holdings without a quote are reported in `unpriced` and excluded
    /// from every total.
    #[must_use]
    pub fn portfolio_summary<F>(
        &self,
        ledger: &Ledger,
        log: &TransactionLog,
        as_of: DateTime<Utc>,
        currency: &str,
        price_of: F,
    ) -> PortfolioSummary
    where
        F: Fn(&str) -> Option<f64>,
    {
        let mut valuations = Vec::new();
        let mut unpriced = Vec::new();
        let mut holdings_value = 0.0;
        let mut total_cost_basis = 0.0;

        for holding in ledger.holdings.values() {
            match price_of(&holding.asset.id) {
                Some(price) => {
                    let valuation = self.valuate(holding, price);
                    holdings_value += valuation.current_value;
                    total_cost_basis += valuation.cost_basis;
                    valuations.push(valuation);
                }
                None => unpriced.push(holding.asset.clone()),
            }
        }

        let total_value = ledger.cash_balance + holdings_value;
        for valuation in &mut valuations {
            valuation.allocation_pct = if total_value > 0.0 {
                valuation.current_value / total_value * 100.0
            } else {
                0.0
            };
        }

        // Largest allocation first
        valuations.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        unpriced.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let unrealized_pnl = holdings_value - total_cost_basis;
        let unrealized_pnl_pct = if total_cost_basis > 0.0 {
            unrealized_pnl / total_cost_basis * 100.0
        } else {
            0.0
        };

        let first_trade_at = log.all().iter().map(|t| t.executed_at).min();

        PortfolioSummary {
            as_of,
            currency: currency.to_string(),
            cash_balance: ledger.cash_balance,
            holdings_value,
            total_value,
            total_cost_basis,
            unrealized_pnl,
            unrealized_pnl_pct,
            trade_count: log.len(),
            first_trade_at,
            holdings: valuations,
            unpriced,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
