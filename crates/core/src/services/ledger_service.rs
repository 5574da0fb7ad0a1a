use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::ledger::{Holding, Ledger};
use crate::models::transaction::{TradeSide, Transaction, TransactionLog};

/// Residual quantity below which a position counts as fully closed.
/// Partial sells leave floating-point dust; anything at or under this
/// threshold removes the holding and discards the leftover cost.
pub const DUST_EPSILON: f64 = 1e-9;

/// Executes trades against the ledger: the sole authority for cash and
/// holdings. Guarantees no operation can produce a negative balance or an
/// overdrawn position.
///
/// Pure business logic — no I/O, no clock beyond transaction stamping.
/// Buys and sells are atomic: every validation runs before the first
/// mutation, so a rejected trade leaves ledger and log untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Execute a buy: exchange cash for `quantity` units of `asset` at
    /// `unit_price`.
    ///
    /// Creates the holding on first purchase, then accumulates quantity and
    /// cost basis. Appends a Buy transaction on success.
    pub fn buy(
        &self,
        ledger: &mut Ledger,
        log: &mut TransactionLog,
        asset: Asset,
        quantity: f64,
        unit_price: f64,
    ) -> Result<Transaction, CoreError> {
        Self::validate_quantity(quantity)?;
        Self::validate_price(unit_price)?;

        let total = quantity * unit_price;
        if total > ledger.cash_balance {
            return Err(CoreError::InsufficientFunds {
                required: total,
                available: ledger.cash_balance,
            });
        }

        ledger.cash_balance -= total;
        let holding = ledger
            .holdings
            .entry(asset.id.clone())
            .or_insert_with(|| Holding::opened(asset.clone()));
        holding.quantity += quantity;
        holding.cost_basis += total;

        let transaction = Transaction::new(TradeSide::Buy, asset, quantity, unit_price);
        log.append(transaction.clone());
        Ok(transaction)
    }

    /// Execute a sell: exchange `quantity` units of the held asset back
    /// into cash at `unit_price`.
    ///
    /// Cost basis is reduced by the average-cost method, computed on the
    /// quantity held before the decrement. Selling the entire position
    /// removes the holding, discarding any floating-point residue.
    /// Short selling is rejected — you can only sell what you hold.
    pub fn sell(
        &self,
        ledger: &mut Ledger,
        log: &mut TransactionLog,
        asset_id: &str,
        quantity: f64,
        unit_price: f64,
    ) -> Result<Transaction, CoreError> {
        Self::validate_quantity(quantity)?;
        Self::validate_price(unit_price)?;

        let holding = ledger
            .holdings
            .get_mut(asset_id)
            .ok_or_else(|| CoreError::NoSuchHolding(asset_id.to_string()))?;

        if quantity > holding.quantity {
            return Err(CoreError::InsufficientHoldings {
                requested: quantity,
                held: holding.quantity,
            });
        }

        // Average cost uses the pre-decrement quantity. The zero guard is
        // unreachable given the checks above, but must not divide.
        let removed_cost = if holding.quantity > 0.0 {
            holding.cost_basis / holding.quantity * quantity
        } else {
            0.0
        };

        holding.cost_basis -= removed_cost;
        holding.quantity -= quantity;

        let asset = holding.asset.clone();
        if holding.quantity <= DUST_EPSILON {
            ledger.holdings.remove(asset_id);
        }

        let total = quantity * unit_price;
        ledger.cash_balance += total;

        let transaction = Transaction::new(TradeSide::Sell, asset, quantity, unit_price);
        log.append(transaction.clone());
        Ok(transaction)
    }

    /// Wipe the account back to its initial state: full starting balance,
    /// no positions, empty history. Irreversible — callers should confirm
    /// with the user first.
    pub fn reset(&self, ledger: &mut Ledger, log: &mut TransactionLog, starting_balance: f64) {
        *ledger = Ledger::new(starting_balance);
        log.clear();
    }

    fn validate_quantity(quantity: f64) -> Result<(), CoreError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        Ok(())
    }

    fn validate_price(unit_price: f64) -> Result<(), CoreError> {
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(CoreError::InvalidPrice(unit_price));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
