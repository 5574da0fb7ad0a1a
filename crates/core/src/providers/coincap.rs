use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.coincap.io/v2";

/// CoinCap API provider for cryptocurrency prices.
///
/// - **Free**: No API key required, no strict rate limits.
/// - **Data**: 2000+ cryptocurrencies, addressed by the same lowercase ids
///   as CoinGecko ("bitcoin", "ethereum").
/// - **Endpoints**: `/assets/{id}`, `/assets?ids={ids}`
///
/// Registered after CoinGecko as the fallback source.
pub struct CoinCapProvider {
    client: Client,
}

impl CoinCapProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    fn parse_price(asset_id: &str, price_usd: Option<&str>) -> Result<f64, CoreError> {
        price_usd
            .ok_or_else(|| CoreError::PriceUnavailable(asset_id.to_string()))?
            .parse()
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Invalid price format for {asset_id}: {e}"),
            })
    }
}

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetResponse {
    data: AssetData,
}

#[derive(Deserialize)]
struct AssetsResponse {
    data: Vec<AssetData>,
}

#[derive(Deserialize)]
struct AssetData {
    id: String,
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "CoinCap"
    }

    async fn current_price(&self, asset_id: &str) -> Result<f64, CoreError> {
        let id = asset_id.to_lowercase();
        let url = format!("{BASE_URL}/assets/{id}");

        let resp: AssetResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse response for {asset_id}: {e}"),
            })?;

        Self::parse_price(asset_id, resp.data.price_usd.as_deref())
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
        let url = format!("{BASE_URL}/assets?ids={ids}");

        let resp: AssetsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse batch response: {e}"),
            })?;

        let mut prices = HashMap::new();
        for asset in resp.data {
            if let Ok(price) = Self::parse_price(&asset.id, asset.price_usd.as_deref()) {
                prices.insert(asset.id, price);
            }
        }
        Ok(prices)
    }
}
