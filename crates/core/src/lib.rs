pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{Duration, Utc};

use models::{
    asset::Asset,
    ledger::{Holding, Ledger},
    quote::{PriceQuote, QuoteCache},
    settings::Settings,
    summary::{HoldingValuation, PortfolioSummary},
    transaction::{TradeReceipt, TradeSide, TradeSortOrder, Transaction, TransactionLog},
};
use providers::registry::ProviderRegistry;
use services::{
    ledger_service::LedgerService, quote_service::QuoteService,
    valuation_service::ValuationService,
};
use storage::manager::{AccountSnapshot, StorageManager};
use storage::store::Store;

use errors::CoreError;

/// Main entry point for the Paper Trader core library.
/// Holds the simulated account state and all services needed to operate on it.
#[must_use]
pub struct PaperTrader {
    ledger: Ledger,
    log: TransactionLog,
    settings: Settings,
    quote_cache: QuoteCache,
    ledger_service: LedgerService,
    valuation_service: ValuationService,
    quote_service: QuoteService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for PaperTrader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperTrader")
            .field("cash_balance", &self.ledger.cash_balance)
            .field("holdings", &self.ledger.holding_count())
            .field("transactions", &self.log.len())
            .field("cached_quotes", &self.quote_cache.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PaperTrader {
    /// Create a brand new account with default settings (10,000 starting cash).
    pub fn create_new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a brand new account with custom settings.
    pub fn with_settings(settings: Settings) -> Self {
        let ledger = Ledger::new(settings.starting_balance);
        Self::build(ledger, TransactionLog::new(), settings, QuoteCache::new())
    }

    /// Load an account from a store. An empty store is not an error — it
    /// yields a fresh account with default settings.
    pub fn load_from_store(store: &dyn Store) -> Result<Self, CoreError> {
        let log = StorageManager::load_log(store)?;
        match StorageManager::load_state(store)? {
            Some(snapshot) => Ok(Self::build(
                snapshot.ledger,
                log,
                snapshot.settings,
                snapshot.quote_cache,
            )),
            None => {
                let settings = Settings::default();
                let ledger = Ledger::new(settings.starting_balance);
                Ok(Self::build(ledger, log, settings, QuoteCache::new()))
            }
        }
    }

    /// Persist the account state and transaction history.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_store(&mut self, store: &mut dyn Store) -> Result<(), CoreError> {
        let snapshot = AccountSnapshot {
            ledger: self.ledger.clone(),
            settings: self.settings.clone(),
            quote_cache: self.quote_cache.clone(),
        };
        StorageManager::save_state(store, &snapshot)?;
        StorageManager::save_log(store, &self.log)?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if the account has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy `quantity` units of `asset` at `unit_price`.
    /// Fails without mutating anything if the cash balance can't cover it.
    pub fn buy(
        &mut self,
        asset: Asset,
        quantity: f64,
        unit_price: f64,
    ) -> Result<TradeReceipt, CoreError> {
        let transaction =
            self.ledger_service
                .buy(&mut self.ledger, &mut self.log, asset, quantity, unit_price)?;
        self.dirty = true;
        Ok(TradeReceipt {
            transaction,
            cash_balance: self.ledger.cash_balance,
        })
    }

    /// Sell `quantity` units of the held asset at `unit_price`.
    /// Fails without mutating anything when the position can't cover it.
    pub fn sell(
        &mut self,
        asset_id: &str,
        quantity: f64,
        unit_price: f64,
    ) -> Result<TradeReceipt, CoreError> {
        let transaction = self.ledger_service.sell(
            &mut self.ledger,
            &mut self.log,
            asset_id,
            quantity,
            unit_price,
        )?;
        self.dirty = true;
        Ok(TradeReceipt {
            transaction,
            cash_balance: self.ledger.cash_balance,
        })
    }

    /// Wipe the account back to its starting state: full starting balance,
    /// no positions, empty history. Irreversible — the UI should confirm
    /// with the user before calling this.
    pub fn reset(&mut self) {
        self.ledger_service
            .reset(&mut self.ledger, &mut self.log, self.settings.starting_balance);
        self.dirty = true;
    }

    // ── Balance & Holdings ──────────────────────────────────────────

    /// Cash currently available for buys.
    #[must_use]
    pub fn cash_balance(&self) -> f64 {
        self.ledger.cash_balance
    }

    /// All open positions, sorted by asset symbol.
    #[must_use]
    pub fn holdings(&self) -> Vec<&Holding> {
        let mut holdings: Vec<&Holding> = self.ledger.holdings.values().collect();
        holdings.sort_by(|a, b| a.asset.symbol.cmp(&b.asset.symbol));
        holdings
    }

    /// The position in one asset, if any.
    #[must_use]
    pub fn holding(&self, asset_id: &str) -> Option<&Holding> {
        self.ledger.holding(asset_id)
    }

    /// Number of open positions.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.ledger.holding_count()
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Value the position in `asset_id` at `current_price`.
    /// Pure query; calling it twice with the same inputs is identical.
    pub fn valuate(
        &self,
        asset_id: &str,
        current_price: f64,
    ) -> Result<HoldingValuation, CoreError> {
        let holding = self
            .ledger
            .holding(asset_id)
            .ok_or_else(|| CoreError::NoSuchHolding(asset_id.to_string()))?;
        Ok(self.valuation_service.valuate(holding, current_price))
    }

    /// Total account value using caller-supplied prices. Holdings the
    /// lookup can't price contribute zero instead of failing the total.
    #[must_use]
    pub fn total_portfolio_value<F>(&self, price_of: F) -> f64
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.valuation_service.total_portfolio_value(&self.ledger, price_of)
    }

    /// Total account value using the last-known cached quotes.
    #[must_use]
    pub fn total_portfolio_value_cached(&self) -> f64 {
        self.valuation_service
            .total_portfolio_value(&self.ledger, |id| self.quote_cache.price(id))
    }

    /// Full account snapshot valued at the last-known cached quotes.
    #[must_use]
    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.valuation_service.portfolio_summary(
            &self.ledger,
            &self.log,
            Utc::now(),
            &self.settings.display_currency,
            |id| self.quote_cache.price(id),
        )
    }

    // ── Transaction History ─────────────────────────────────────────

    /// All executed trades, newest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.log.all()
    }

    /// Trades involving one asset, newest first.
    #[must_use]
    pub fn transactions_for_asset(&self, asset_id: &str) -> Vec<&Transaction> {
        self.log
            .all()
            .iter()
            .filter(|t| t.asset.id == asset_id)
            .collect()
    }

    /// Trades of one side (Buy or Sell), newest first.
    #[must_use]
    pub fn transactions_by_side(&self, side: TradeSide) -> Vec<&Transaction> {
        self.log.all().iter().filter(|t| t.side == side).collect()
    }

    /// Trades sorted by a specific order.
    #[must_use]
    pub fn transactions_sorted(&self, order: &TradeSortOrder) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.log.all().iter().collect();
        match order {
            TradeSortOrder::NewestFirst => {
                transactions.sort_by(|a, b| b.executed_at.cmp(&a.executed_at))
            }
            TradeSortOrder::OldestFirst => {
                transactions.sort_by(|a, b| a.executed_at.cmp(&b.executed_at))
            }
            TradeSortOrder::TotalDesc => transactions.sort_by(|a, b| {
                b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal)
            }),
            TradeSortOrder::TotalAsc => transactions.sort_by(|a, b| {
                a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal)
            }),
            TradeSortOrder::AssetAsc => {
                transactions.sort_by(|a, b| a.asset.symbol.cmp(&b.asset.symbol))
            }
            TradeSortOrder::AssetDesc => {
                transactions.sort_by(|a, b| b.asset.symbol.cmp(&a.asset.symbol))
            }
        }
        transactions
    }

    /// Search trades by matching query against symbol, name, and id
    /// (case-insensitive).
    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        let q = query.to_lowercase();
        self.log
            .all()
            .iter()
            .filter(|t| {
                t.asset.symbol.to_lowercase().contains(&q)
                    || t.asset.name.to_lowercase().contains(&q)
                    || t.asset.id.contains(&q)
            })
            .collect()
    }

    /// Total number of executed trades.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.log.len()
    }

    /// Execution instant of the earliest trade on record.
    #[must_use]
    pub fn first_trade_at(&self) -> Option<chrono::DateTime<Utc>> {
        self.log.all().iter().map(|t| t.executed_at).min()
    }

    /// Execution instant of the most recent trade on record.
    #[must_use]
    pub fn latest_trade_at(&self) -> Option<chrono::DateTime<Utc>> {
        self.log.all().first().map(|t| t.executed_at)
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// Get the current price of one asset, from cache when fresh enough,
    /// otherwise from the providers (stale cache as a last resort).
    pub async fn quote(&mut self, asset_id: &str) -> Result<PriceQuote, CoreError> {
        let ttl = self.quote_ttl();
        self.quote_service
            .get_quote(&mut self.quote_cache, asset_id, ttl)
            .await
    }

    /// Refresh quotes for every held asset. Individual failures are
    /// logged and skipped; returns how many assets have a usable quote.
    pub async fn refresh_quotes(&mut self) -> usize {
        let ids: Vec<String> = self.ledger.holdings.keys().cloned().collect();
        let ttl = self.quote_ttl();
        self.quote_service
            .refresh_quotes(&mut self.quote_cache, &ids, ttl)
            .await
    }

    /// Last-known cached price for an asset, regardless of age.
    #[must_use]
    pub fn cached_price(&self, asset_id: &str) -> Option<f64> {
        self.quote_cache.price(asset_id)
    }

    /// Manually insert a quote into the cache (useful for testing, offline
    /// use, or prices obtained out of band).
    pub fn set_cached_quote(&mut self, quote: PriceQuote) {
        self.quote_cache.insert(quote);
        self.dirty = true;
    }

    /// Number of assets with a cached quote.
    #[must_use]
    pub fn quote_count(&self) -> usize {
        self.quote_cache.len()
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the transaction history as a JSON string, newest first.
    pub fn export_transactions_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self.log.all())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions: {e}")))
    }

    /// Export the transaction history as a CSV string, newest first.
    /// Columns: id, executed_at, side, asset_id, symbol, name, quantity, unit_price, total
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv =
            String::from("id,executed_at,side,asset_id,symbol,name,quantity,unit_price,total\n");
        for t in self.log.all() {
            // Escape CSV: quote fields containing commas, quotes, or newlines
            let name = &t.asset.name;
            let escaped_name = if name.contains(',') || name.contains('"') || name.contains('\n') {
                format!("\"{}\"", name.replace('"', "\"\""))
            } else {
                name.clone()
            };
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                t.id,
                t.executed_at.to_rfc3339(),
                t.side,
                t.asset.id,
                t.asset.symbol,
                escaped_name,
                t.quantity,
                t.unit_price,
                t.total,
            ));
        }
        csv
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Current account settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        ledger: Ledger,
        log: TransactionLog,
        settings: Settings,
        quote_cache: QuoteCache,
    ) -> Self {
        let registry = ProviderRegistry::with_defaults();
        Self {
            ledger,
            log,
            settings,
            quote_cache,
            ledger_service: LedgerService::new(),
            valuation_service: ValuationService::new(),
            quote_service: QuoteService::new(registry),
            dirty: false,
        }
    }

    fn quote_ttl(&self) -> Duration {
        Duration::seconds(self.settings.quote_ttl_secs as i64)
    }
}
