use chrono::{Duration, Utc};
use paper_trader_core::models::asset::Asset;
use paper_trader_core::models::ledger::{Holding, Ledger};
use paper_trader_core::models::quote::{PriceQuote, QuoteCache};
use paper_trader_core::models::settings::Settings;
use paper_trader_core::models::transaction::{
    TradeSide, Transaction, TransactionLog,
};

fn btc() -> Asset {
    Asset::new("bitcoin", "btc", "Bitcoin")
}

fn eth() -> Asset {
    Asset::new("ethereum", "eth", "Ethereum")
}

// ═══════════════════════════════════════════════════════════════════
//  Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_normalizes_case() {
        let a = Asset::new("Bitcoin", "btc", "Bitcoin");
        assert_eq!(a.id, "bitcoin");
        assert_eq!(a.symbol, "BTC");
        assert_eq!(a.name, "Bitcoin");
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = Asset::new("bitcoin", "BTC", "Bitcoin");
        let b = Asset::new("bitcoin", "XBT", "Bitcoin Core");
        assert_eq!(a, b);
    }

    #[test]
    fn different_ids_are_not_equal() {
        assert_ne!(btc(), eth());
    }

    #[test]
    fn hash_follows_equality() {
        let mut set = HashSet::new();
        set.insert(Asset::new("bitcoin", "BTC", "Bitcoin"));
        set.insert(Asset::new("bitcoin", "XBT", "Bitcoin Core"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_shows_name_and_symbol() {
        assert_eq!(btc().to_string(), "Bitcoin (BTC)");
    }

    #[test]
    fn serde_roundtrip_json() {
        let a = btc();
        let json = serde_json::to_string(&a).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
        assert_eq!(back.symbol, "BTC");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holding & Ledger
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn opened_is_empty() {
        let h = Holding::opened(btc());
        assert_eq!(h.quantity, 0.0);
        assert_eq!(h.cost_basis, 0.0);
    }

    #[test]
    fn average_cost_is_basis_over_quantity() {
        let mut h = Holding::opened(btc());
        h.quantity = 5.0;
        h.cost_basis = 800.0;
        assert_eq!(h.average_cost(), 160.0);
    }

    #[test]
    fn average_cost_of_empty_position_is_zero() {
        let h = Holding::opened(btc());
        assert_eq!(h.average_cost(), 0.0);
    }
}

mod ledger {
    use super::*;

    #[test]
    fn new_has_full_cash_and_no_positions() {
        let l = Ledger::new(10_000.0);
        assert_eq!(l.cash_balance, 10_000.0);
        assert!(l.holdings.is_empty());
        assert_eq!(l.holding_count(), 0);
    }

    #[test]
    fn holding_lookup_by_id() {
        let mut l = Ledger::new(1_000.0);
        let mut h = Holding::opened(btc());
        h.quantity = 1.0;
        h.cost_basis = 100.0;
        l.holdings.insert("bitcoin".into(), h);

        assert!(l.holding("bitcoin").is_some());
        assert!(l.holding("ethereum").is_none());
    }

    #[test]
    fn total_cost_basis_sums_holdings() {
        let mut l = Ledger::new(0.0);
        let mut h1 = Holding::opened(btc());
        h1.quantity = 1.0;
        h1.cost_basis = 100.0;
        let mut h2 = Holding::opened(eth());
        h2.quantity = 2.0;
        h2.cost_basis = 50.0;
        l.holdings.insert("bitcoin".into(), h1);
        l.holdings.insert("ethereum".into(), h2);
        assert_eq!(l.total_cost_basis(), 150.0);
    }

    #[test]
    fn serde_roundtrip_json() {
        let mut l = Ledger::new(9_500.0);
        let mut h = Holding::opened(btc());
        h.quantity = 0.5;
        h.cost_basis = 500.0;
        l.holdings.insert("bitcoin".into(), h);

        let json = serde_json::to_string(&l).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TradeSide & Transaction
// ═══════════════════════════════════════════════════════════════════

mod trade_side {
    use super::*;

    #[test]
    fn display_buy() {
        assert_eq!(TradeSide::Buy.to_string(), "Buy");
    }

    #[test]
    fn display_sell() {
        assert_eq!(TradeSide::Sell.to_string(), "Sell");
    }

    #[test]
    fn equality() {
        assert_eq!(TradeSide::Buy, TradeSide::Buy);
        assert_ne!(TradeSide::Buy, TradeSide::Sell);
    }
}

mod transaction {
    use super::*;

    #[test]
    fn new_computes_total() {
        let t = Transaction::new(TradeSide::Buy, btc(), 2.0, 30_000.0);
        assert_eq!(t.total, 60_000.0);
        assert_eq!(t.quantity, 2.0);
        assert_eq!(t.unit_price, 30_000.0);
        assert_eq!(t.side, TradeSide::Buy);
        assert_eq!(t.asset.id, "bitcoin");
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(TradeSide::Buy, btc(), 1.0, 1.0);
        let b = Transaction::new(TradeSide::Buy, btc(), 1.0, 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serde_roundtrip_json() {
        let t = Transaction::new(TradeSide::Sell, eth(), 1.5, 2_000.0);
        let json = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionLog
// ═══════════════════════════════════════════════════════════════════

mod transaction_log {
    use super::*;

    #[test]
    fn starts_empty() {
        let log = TransactionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.all().is_empty());
    }

    #[test]
    fn append_prepends_newest_first() {
        let mut log = TransactionLog::new();
        let first = Transaction::new(TradeSide::Buy, btc(), 1.0, 100.0);
        let second = Transaction::new(TradeSide::Sell, btc(), 0.5, 110.0);
        log.append(first.clone());
        log.append(second.clone());

        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0].id, second.id);
        assert_eq!(log.all()[1].id, first.id);
    }

    #[test]
    fn timestamps_non_increasing_from_front() {
        let mut log = TransactionLog::new();
        for _ in 0..5 {
            log.append(Transaction::new(TradeSide::Buy, btc(), 1.0, 100.0));
        }
        let times: Vec<_> = log.all().iter().map(|t| t.executed_at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = TransactionLog::new();
        log.append(Transaction::new(TradeSide::Buy, btc(), 1.0, 100.0));
        log.clear();
        assert!(log.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceQuote & QuoteCache
// ═══════════════════════════════════════════════════════════════════

mod quote_cache {
    use super::*;

    fn quote(id: &str, price: f64, age_secs: i64) -> PriceQuote {
        PriceQuote {
            asset_id: id.to_string(),
            price,
            as_of: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn starts_empty() {
        let cache = QuoteCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.get("bitcoin").is_none());
    }

    #[test]
    fn insert_and_get() {
        let mut cache = QuoteCache::new();
        cache.insert(quote("bitcoin", 50_000.0, 0));
        assert_eq!(cache.price("bitcoin"), Some(50_000.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_replaces_previous_quote() {
        let mut cache = QuoteCache::new();
        cache.insert(quote("bitcoin", 50_000.0, 120));
        cache.insert(quote("bitcoin", 51_000.0, 0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.price("bitcoin"), Some(51_000.0));
    }

    #[test]
    fn get_fresh_honors_ttl() {
        let mut cache = QuoteCache::new();
        cache.insert(quote("bitcoin", 50_000.0, 30));
        let now = Utc::now();

        assert!(cache.get_fresh("bitcoin", now, Duration::seconds(60)).is_some());
        assert!(cache.get_fresh("bitcoin", now, Duration::seconds(10)).is_none());
        // Stale quotes are still reachable via get()
        assert!(cache.get("bitcoin").is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = QuoteCache::new();
        cache.insert(quote("bitcoin", 50_000.0, 0));
        cache.insert(quote("ethereum", 3_000.0, 0));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn serde_roundtrip_json() {
        let mut cache = QuoteCache::new();
        cache.insert(quote("bitcoin", 50_000.0, 0));
        let json = serde_json::to_string(&cache).unwrap();
        let back: QuoteCache = serde_json::from_str(&json).unwrap();
        assert_eq!(cache, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn default_values() {
        let s = Settings::default();
        assert_eq!(s.starting_balance, 10_000.0);
        assert_eq!(s.display_currency, "USD");
        assert_eq!(s.quote_ttl_secs, 60);
    }

    #[test]
    fn serde_roundtrip_json() {
        let s = Settings {
            starting_balance: 100_000.0,
            display_currency: "EUR".into(),
            quote_ttl_secs: 30,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
