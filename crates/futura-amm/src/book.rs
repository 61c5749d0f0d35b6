//! Per-market authoritative AMM state.
//!
//! Each market owns exactly one [`MarketBook`]. Quotes are computed on
//! `Copy` snapshots under a read lock; [`MarketBook::commit`] is the only
//! operation that changes inventory, and it runs under the write lock so the
//! fill price and the state update see the same inventory.
//!
//! ```text
//! MarketRegistry (DashMap<MarketKey, Arc<RwLock<MarketBook>>>)
//!   ├─ quote / average_price  → read lock → snapshot → pure pricing
//!   └─ commit_trade           → write lock → price fill → net_position += size
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futura_core::{CoreError, MarketKey, Side};
use futura_telemetry::Metrics;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CurveConfig;
use crate::curve::mark_price_within;
use crate::error::{AmmError, AmmResult};
use crate::execution::average_price_with;
use crate::quote_engine::{quote_within, PriceQuote};
use crate::state::AmmState;

/// Creation parameters for a market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    pub total_liquidity: f64,
    /// Falls back to `CurveConfig::default_initial_probability`.
    pub initial_probability: Option<f64>,
    /// Falls back to `CurveConfig::default_depth`.
    pub depth: Option<f64>,
}

impl MarketParams {
    pub fn new(total_liquidity: f64) -> Self {
        Self {
            total_liquidity,
            initial_probability: None,
            depth: None,
        }
    }

    pub fn with_probability(mut self, p: f64) -> Self {
        self.initial_probability = Some(p);
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }
}

/// Result of a committed trade.
#[derive(Debug, Clone, Serialize)]
pub struct Fill {
    pub market: MarketKey,
    pub side: Side,
    /// Signed trade size applied to the inventory.
    pub size: f64,
    /// Size-weighted average fill price.
    pub average_price: f64,
    /// Mark/slippage/impact against the pre-trade state.
    pub quote: PriceQuote,
    /// Net inventory after the trade.
    pub net_position: f64,
    /// 1-based trade sequence within the market.
    pub sequence: u64,
}

/// Read-only view of a market book.
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub market: MarketKey,
    pub mark_price: f64,
    pub state: AmmState,
    pub trade_count: u64,
    /// Cumulative unsigned traded size.
    pub volume: f64,
    pub last_trade_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub last_trade_at: Option<DateTime<Utc>>,
}

/// Authoritative state of a single market.
#[derive(Debug)]
pub struct MarketBook {
    key: MarketKey,
    state: AmmState,
    config: CurveConfig,
    trade_count: u64,
    volume: f64,
    last_trade_price: Option<f64>,
    created_at: DateTime<Utc>,
    last_trade_at: Option<DateTime<Utc>>,
}

impl MarketBook {
    /// Create a book around an existing state.
    pub fn new(key: MarketKey, state: AmmState, config: CurveConfig) -> AmmResult<Self> {
        config.validate()?;
        Ok(Self {
            key,
            state,
            config,
            trade_count: 0,
            volume: 0.0,
            last_trade_price: None,
            created_at: Utc::now(),
            last_trade_at: None,
        })
    }

    pub fn key(&self) -> &MarketKey {
        &self.key
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> AmmState {
        self.state
    }

    pub fn mark_price(&self) -> f64 {
        mark_price_within(&self.state, &self.config.bounds())
    }

    pub fn quote(&self, trade_size: f64) -> PriceQuote {
        quote_within(&self.state, trade_size, &self.config.bounds())
    }

    pub fn average_price(&self, trade_size: f64) -> AmmResult<f64> {
        Ok(average_price_with(&self.state, trade_size, &self.config)?)
    }

    /// Fill `trade_size` against the curve and apply it to the inventory.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero or non-finite size; the state is left
    /// unchanged.
    pub fn commit(&mut self, trade_size: f64) -> AmmResult<Fill> {
        let side = Side::from_signed(trade_size).ok_or_else(|| {
            CoreError::InvalidArgument(format!("cannot commit trade of size {trade_size}"))
        })?;

        let average_price = average_price_with(&self.state, trade_size, &self.config)?;
        let quote = quote_within(&self.state, trade_size, &self.config.bounds());

        self.state = self.state.shifted(trade_size);
        self.trade_count += 1;
        self.volume += trade_size.abs();
        self.last_trade_price = Some(average_price);
        self.last_trade_at = Some(Utc::now());

        debug!(
            market = %self.key,
            %side,
            size = trade_size,
            average_price,
            mark_price = quote.price,
            net_position = self.state.net_position(),
            "Trade committed"
        );

        Ok(Fill {
            market: self.key.clone(),
            side,
            size: trade_size,
            average_price,
            quote,
            net_position: self.state.net_position(),
            sequence: self.trade_count,
        })
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            market: self.key.clone(),
            mark_price: self.mark_price(),
            state: self.state,
            trade_count: self.trade_count,
            volume: self.volume,
            last_trade_price: self.last_trade_price,
            created_at: self.created_at,
            last_trade_at: self.last_trade_at,
        }
    }
}

type BookEntry = Arc<RwLock<MarketBook>>;

/// All markets known to the engine, one book per key.
pub struct MarketRegistry {
    markets: DashMap<MarketKey, BookEntry>,
    config: CurveConfig,
}

impl MarketRegistry {
    /// Create an empty registry; `config` applies to markets created
    /// without their own curve configuration.
    pub fn new(config: CurveConfig) -> AmmResult<Self> {
        config.validate()?;
        Ok(Self {
            markets: DashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Create a market using the registry-wide curve configuration.
    pub fn create_market(&self, key: MarketKey, params: MarketParams) -> AmmResult<AmmState> {
        self.create_market_with_config(key, params, self.config.clone())
    }

    /// Create a market with its own curve configuration (e.g. tighter bounds).
    pub fn create_market_with_config(
        &self,
        key: MarketKey,
        params: MarketParams,
        config: CurveConfig,
    ) -> AmmResult<AmmState> {
        let probability = params
            .initial_probability
            .unwrap_or(config.default_initial_probability);
        let depth = params.depth.unwrap_or(config.default_depth);

        let state = AmmState::initialize(params.total_liquidity, probability, depth)
            .map_err(|e| {
                Metrics::input_rejected(e.kind());
                e
            })?;

        let bounds = config.bounds();
        if probability < bounds.floor || probability > bounds.ceiling {
            warn!(
                market = %key,
                probability,
                floor = bounds.floor,
                ceiling = bounds.ceiling,
                "Initial probability outside price bounds, mark will be clamped"
            );
        }

        let book = MarketBook::new(key.clone(), state, config)?;
        let mark = book.mark_price();

        match self.markets.entry(key.clone()) {
            Entry::Occupied(_) => return Err(AmmError::MarketExists(key)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(book)));
            }
        }

        info!(
            market = %key,
            probability,
            depth,
            total_liquidity = params.total_liquidity,
            "Market created"
        );
        Metrics::market_created();
        Metrics::mark_price(key.as_str(), mark);

        Ok(state)
    }

    fn entry(&self, key: &MarketKey) -> AmmResult<BookEntry> {
        self.markets
            .get(key)
            .map(|e| e.value().clone())
            .ok_or_else(|| AmmError::MarketNotFound(key.clone()))
    }

    pub fn contains(&self, key: &MarketKey) -> bool {
        self.markets.contains_key(key)
    }

    /// Immutable snapshot of a market's state.
    pub fn snapshot(&self, key: &MarketKey) -> AmmResult<AmmState> {
        Ok(self.entry(key)?.read().snapshot())
    }

    /// Snapshot and curve configuration read under the same lock.
    pub fn snapshot_with_config(&self, key: &MarketKey) -> AmmResult<(AmmState, CurveConfig)> {
        let entry = self.entry(key)?;
        let book = entry.read();
        Ok((book.snapshot(), book.config().clone()))
    }

    pub fn mark_price(&self, key: &MarketKey) -> AmmResult<f64> {
        Ok(self.entry(key)?.read().mark_price())
    }

    /// Quote against the current state without changing it.
    pub fn quote(&self, key: &MarketKey, trade_size: f64) -> AmmResult<PriceQuote> {
        let quote = self.entry(key)?.read().quote(trade_size);
        if let Some(side) = Side::from_signed(trade_size) {
            Metrics::quote_computed(side.as_str());
            Metrics::price_impact(quote.impact);
        }
        Ok(quote)
    }

    pub fn average_price(&self, key: &MarketKey, trade_size: f64) -> AmmResult<f64> {
        self.entry(key)?
            .read()
            .average_price(trade_size)
            .map_err(|e| {
                Metrics::input_rejected(e.kind());
                e
            })
    }

    /// Fill a trade and update the market's inventory.
    pub fn commit_trade(&self, key: &MarketKey, trade_size: f64) -> AmmResult<Fill> {
        let entry = self.entry(key)?;
        let mut book = entry.write();
        let fill = book
            .commit(trade_size)
            .map_err(|e| {
                Metrics::input_rejected(e.kind());
                e
            })?;
        let mark = book.mark_price();
        drop(book);

        Metrics::trade_committed(key.as_str(), fill.side.as_str());
        Metrics::mark_price(key.as_str(), mark);
        Ok(fill)
    }

    pub fn summary(&self, key: &MarketKey) -> AmmResult<BookSummary> {
        Ok(self.entry(key)?.read().summary())
    }

    /// Market keys in sorted order.
    pub fn keys(&self) -> Vec<MarketKey> {
        let mut keys: Vec<MarketKey> = self.markets.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}
