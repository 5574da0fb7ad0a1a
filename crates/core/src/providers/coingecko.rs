use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API provider for cryptocurrency prices.
///
/// - **Free**: No API key required on the public endpoints.
/// - **Data**: 10,000+ coins, addressed by lowercase ids ("bitcoin").
/// - **Endpoint**: `/simple/price?ids={ids}&vs_currencies=usd`
///
/// Registered first in the default registry; CoinCap is the fallback.
pub struct CoinGeckoProvider {
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    async fn simple_price(
        &self,
        ids: &str,
    ) -> Result<HashMap<String, SimplePriceEntry>, CoreError> {
        let url = format!("{BASE_URL}/simple/price?ids={ids}&vs_currencies=usd");
        let resp: HashMap<String, SimplePriceEntry> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse price response: {e}"),
            })?;
        Ok(resp)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct SimplePriceEntry {
    usd: Option<f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn current_price(&self, asset_id: &str) -> Result<f64, CoreError> {
        let id = asset_id.to_lowercase();
        let resp = self.simple_price(&id).await?;

        resp.get(&id)
            .and_then(|entry| entry.usd)
            .ok_or_else(|| CoreError::PriceUnavailable(asset_id.to_string()))
    }

    async fn current_prices(
        &self,
        asset_ids: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        if asset_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = asset_ids
            .iter()
            .map(|id| id.to_lowercase())
            .collect::<Vec<_>>()
            .join(",");
        let resp = self.simple_price(&ids).await?;

        let prices = resp
            .into_iter()
            .filter_map(|(id, entry)| entry.usd.map(|price| (id, price)))
            .collect();
        Ok(prices)
    }
}
