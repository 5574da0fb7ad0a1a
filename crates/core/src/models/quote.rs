use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A price snapshot for one asset, as supplied by a market data provider.
///
/// The ledger never owns or caches these — a quote is passed in at each
/// valuation call. The cache below exists for the quote service and for
/// showing last-known prices while offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Asset id the price belongs to (e.g., "bitcoin")
    pub asset_id: String,

    /// Price per unit in the display currency
    pub price: f64,

    /// When the price was observed
    pub as_of: DateTime<Utc>,
}

/// Local cache of the latest quote per asset.
///
/// Saved inside the portfolio snapshot so the last-known prices survive a
/// restart — stale quotes are still useful as a display fallback when the
/// APIs are unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteCache {
    entries: HashMap<String, PriceQuote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cached quote for an asset, fresh or stale.
    #[must_use]
    pub fn get(&self, asset_id: &str) -> Option<&PriceQuote> {
        self.entries.get(asset_id)
    }

    /// Cached quote only if it is no older than `ttl` as of `now`.
    #[must_use]
    pub fn get_fresh(
        &self,
        asset_id: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<&PriceQuote> {
        self.entries
            .get(asset_id)
            .filter(|q| now - q.as_of <= ttl)
    }

    /// Last-known price for an asset, regardless of age.
    #[must_use]
    pub fn price(&self, asset_id: &str) -> Option<f64> {
        self.entries.get(asset_id).map(|q| q.price)
    }

    /// Insert or replace the quote for its asset.
    pub fn insert(&mut self, quote: PriceQuote) {
        self.entries.insert(quote.asset_id.clone(), quote);
    }

    /// Number of assets with a cached quote.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached quotes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
