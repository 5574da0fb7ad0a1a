use thiserror::Error;

/// Unified error type for the entire paper-trader-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Trade rejections (insufficient funds/holdings, bad inputs) are ordinary
/// expected outcomes: the caller shows a message and no state has changed.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Trade Execution ─────────────────────────────────────────────
    #[error("Insufficient funds: trade costs {required:.2} but only {available:.2} is available")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Insufficient holdings: tried to sell {requested} but only {held} is held")]
    InsufficientHoldings { requested: f64, held: f64 },

    #[error("No holding for asset: {0}")]
    NoSuchHolding(String),

    #[error("Invalid quantity: {0} (must be a positive number)")]
    InvalidQuantity(f64),

    #[error("Invalid price: {0} (must be a positive number)")]
    InvalidPrice(f64),

    // ── Quotes ──────────────────────────────────────────────────────
    #[error("Price not available for asset: {0}")]
    PriceUnavailable(String),

    #[error("No market data provider registered")]
    NoProvider,

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported record version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs embedded in the error message;
        // reqwest errors often carry full request URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
