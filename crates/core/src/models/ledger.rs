use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::asset::Asset;

/// Accumulated position in one asset.
///
/// `cost_basis` is the total cash spent to acquire the currently-held
/// `quantity` (not a unit price). Average cost per unit is
/// `cost_basis / quantity` while the position is open.
///
/// A holding with zero quantity never persists in the ledger — it is
/// removed from the map when fully sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// The asset held (id, symbol, name — denormalized for display)
    pub asset: Asset,

    /// Units currently held; always >= 0
    pub quantity: f64,

    /// Total cash spent acquiring `quantity`, average-cost method
    pub cost_basis: f64,
}

impl Holding {
    /// A fresh, empty position — created on first buy of an asset.
    pub fn opened(asset: Asset) -> Self {
        Self {
            asset,
            quantity: 0.0,
            cost_basis: 0.0,
        }
    }

    /// Average acquisition cost per unit, 0 for an empty position.
    #[must_use]
    pub fn average_cost(&self) -> f64 {
        if self.quantity > 0.0 {
            self.cost_basis / self.quantity
        } else {
            0.0
        }
    }
}

/// The simulated account: virtual cash plus per-asset holdings.
///
/// Everything in here gets serialized and saved as the portfolio snapshot.
/// Mutation goes exclusively through `LedgerService` — holders of a
/// `&Ledger` can only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Virtual cash available for buys; always >= 0
    pub cash_balance: f64,

    /// Open positions keyed by asset id
    pub holdings: HashMap<String, Holding>,
}

impl Ledger {
    /// A fresh account funded with `starting_balance` cash and no positions.
    pub fn new(starting_balance: f64) -> Self {
        Self {
            cash_balance: starting_balance,
            holdings: HashMap::new(),
        }
    }

    /// Look up the holding for an asset id, if any.
    #[must_use]
    pub fn holding(&self, asset_id: &str) -> Option<&Holding> {
        self.holdings.get(asset_id)
    }

    /// Number of open positions.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Total cost basis across all open positions.
    #[must_use]
    pub fn total_cost_basis(&self) -> f64 {
        self.holdings.values().map(|h| h.cost_basis).sum()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(0.0)
    }
}
