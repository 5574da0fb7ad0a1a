use super::coincap::CoinCapProvider;
use super::coingecko::CoinGeckoProvider;
use super::traits::MarketDataProvider;

/// Registry of all available market data providers.
///
/// Providers are tried in registration order: if the first fails (API down,
/// rate limited, unknown asset), the caller falls back to the next one.
/// New providers can be added without modifying existing code.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn MarketDataProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers pre-configured:
    /// CoinGecko first, CoinCap as fallback. Neither needs an API key.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CoinGeckoProvider::new()));
        registry.register(Box::new(CoinCapProvider::new()));
        registry
    }

    /// Register a provider at the end of the fallback order.
    pub fn register(&mut self, provider: Box<dyn MarketDataProvider>) {
        self.providers.push(provider);
    }

    /// All providers, in fallback order.
    #[must_use]
    pub fn providers(&self) -> &[Box<dyn MarketDataProvider>] {
        &self.providers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
