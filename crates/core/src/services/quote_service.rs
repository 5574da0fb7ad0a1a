use chrono::{Duration, Utc};

use crate::errors::CoreError;
use crate::models::quote::{PriceQuote, QuoteCache};
use crate::providers::registry::ProviderRegistry;

/// Fetches current asset prices from API providers with TTL caching.
///
/// Cache strategy:
/// - A quote younger than the TTL is served from cache without any network.
/// - On a miss, providers are tried in registration order until one
///   answers with a usable price.
/// - If every provider fails but a stale quote exists, the stale quote is
///   served (warn-logged) — last-known prices beat no prices.
///
/// **Note on precision**: prices are `f64` end to end, which is sufficient
/// for display and simulated trading; repeated arithmetic may accumulate
/// small floating-point errors.
pub struct QuoteService {
    registry: ProviderRegistry,
}

impl QuoteService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Names of the registered providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.registry
            .providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Get the current price of one asset, consulting the cache first.
    pub async fn get_quote(
        &self,
        cache: &mut QuoteCache,
        asset_id: &str,
        ttl: Duration,
    ) -> Result<PriceQuote, CoreError> {
        let now = Utc::now();
        if let Some(fresh) = cache.get_fresh(asset_id, now, ttl) {
            return Ok(fresh.clone());
        }

        match self.fetch_price(asset_id).await {
            Ok(price) => {
                let quote = PriceQuote {
                    asset_id: asset_id.to_string(),
                    price,
                    as_of: now,
                };
                cache.insert(quote.clone());
                Ok(quote)
            }
            Err(e) => {
                // Every provider failed; fall back to the last-known quote.
                if let Some(stale) = cache.get(asset_id) {
                    log::warn!(
                        "all providers failed for {asset_id} ({e}); serving quote from {}",
                        stale.as_of
                    );
                    return Ok(stale.clone());
                }
                Err(e)
            }
        }
    }

    /// Refresh quotes for many assets. A single failing asset is logged and
    /// skipped — the sweep itself never fails. Returns how many assets now
    /// hold a usable quote.
    pub async fn refresh_quotes(
        &self,
        cache: &mut QuoteCache,
        asset_ids: &[String],
        ttl: Duration,
    ) -> usize {
        let mut refreshed = 0;
        for asset_id in asset_ids {
            match self.get_quote(cache, asset_id, ttl).await {
                Ok(_) => refreshed += 1,
                Err(e) => {
                    log::warn!("quote refresh skipped {asset_id}: {e}");
                }
            }
        }
        refreshed
    }

    /// Internal: fetch one price with automatic provider fallback.
    ///
    /// Tries providers in registration order. Prices must be finite and
    /// non-negative; anything else counts as a provider failure.
    async fn fetch_price(&self, asset_id: &str) -> Result<f64, CoreError> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in providers {
            match provider.current_price(asset_id).await {
                Ok(price) => {
                    if !price.is_finite() || price < 0.0 {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!(
                                "Invalid price returned for {asset_id}: {price} (must be finite and non-negative)"
                            ),
                        });
                        continue;
                    }
                    return Ok(price);
                }
                Err(e) => {
                    log::debug!("provider {} failed for {asset_id}: {e}", provider.name());
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }
}
