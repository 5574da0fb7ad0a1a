use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;

/// Trait abstraction for all market data providers.
///
/// Each API (CoinGecko, CoinCap) implements this trait. If an API stops
/// working or changes, only that one implementation is replaced — the rest
/// of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current price of one asset in the display currency.
    async fn current_price(&self, asset_id: &str) -> Result<f64, CoreError>;

    /// Get current prices for several assets in one call.
    /// Returns a map of asset id → price; ids the provider does not know
    /// are simply absent from the map.
    async fn current_prices(
        &self,
        asset_ids: &[String],
    ) -> Result<HashMap<String, f64>, CoreError>;
}
