use serde::{Deserialize, Serialize};

/// Account configuration, stored inside the portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Cash the account starts with, and returns to on reset.
    pub starting_balance: f64,

    /// Currency label used for display formatting (e.g., "USD").
    /// Quotes are fetched in this currency; no conversion is performed.
    pub display_currency: String,

    /// How long a cached quote counts as fresh, in seconds.
    pub quote_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_balance: 10_000.0,
            display_currency: "USD".to_string(),
            quote_ttl_secs: 60,
        }
    }
}
