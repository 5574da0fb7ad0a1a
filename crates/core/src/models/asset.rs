use serde::{Deserialize, Serialize};

/// A tradable cryptocurrency.
///
/// **Equality and hashing** are based solely on `id`, NOT on `symbol` or
/// `name`. The id is the stable lowercase identifier used by market data
/// APIs (e.g., "bitcoin"); symbol and name are denormalized for display
/// and may vary between data sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Stable asset identifier, lowercased (e.g., "bitcoin", "ethereum")
    pub id: String,

    /// Ticker symbol, uppercased (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Human-readable name (e.g., "Bitcoin", "Ethereum")
    pub name: String,
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}

impl std::hash::Hash for Asset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into().to_lowercase(),
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
