//! Prometheus metrics for the Futura engine.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should crash on first use rather than fail silently.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram, register_int_counter,
    CounterVec, Encoder, GaugeVec, Histogram, IntCounter, TextEncoder,
};

use crate::error::TelemetryResult;

/// Markets created.
pub static MARKETS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("futura_markets_created_total", "Total markets created").unwrap()
});

/// Quotes computed.
/// Labels: side (buy/sell)
pub static QUOTES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!("futura_quotes_total", "Total trade quotes computed", &["side"])
        .unwrap()
});

/// Trades committed to a market book.
/// Labels: market, side
pub static TRADES_COMMITTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "futura_trades_committed_total",
        "Total trades committed against the AMM",
        &["market", "side"]
    )
    .unwrap()
});

/// Quoted price impact in percent.
pub static PRICE_IMPACT_PCT: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "futura_price_impact_pct",
        "Quoted price impact as a percentage of the pre-trade price",
        vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    )
    .unwrap()
});

/// Current mark price.
/// Labels: market
pub static MARK_PRICE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!("futura_mark_price", "Current AMM mark price", &["market"]).unwrap()
});

/// Inputs rejected by the engine.
/// Labels: reason
pub static INPUT_REJECTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "futura_input_rejected_total",
        "Total inputs rejected as out of domain",
        &["reason"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record market creation.
    pub fn market_created() {
        MARKETS_CREATED_TOTAL.inc();
    }

    /// Record a computed quote.
    pub fn quote_computed(side: &str) {
        QUOTES_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record quoted price impact.
    pub fn price_impact(impact_pct: f64) {
        PRICE_IMPACT_PCT.observe(impact_pct);
    }

    /// Record a committed trade.
    pub fn trade_committed(market: &str, side: &str) {
        TRADES_COMMITTED_TOTAL
            .with_label_values(&[market, side])
            .inc();
    }

    /// Update the mark price gauge.
    pub fn mark_price(market: &str, price: f64) {
        MARK_PRICE.with_label_values(&[market]).set(price);
    }

    /// Record a rejected input.
    pub fn input_rejected(reason: &str) {
        INPUT_REJECTED_TOTAL.with_label_values(&[reason]).inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let before = TRADES_COMMITTED_TOTAL
            .with_label_values(&["test-market", "buy"])
            .get();
        Metrics::trade_committed("test-market", "buy");
        let after = TRADES_COMMITTED_TOTAL
            .with_label_values(&["test-market", "buy"])
            .get();
        assert!(after >= before + 1.0);
    }

    #[test]
    fn test_mark_price_gauge() {
        Metrics::mark_price("gauge-market", 0.42);
        let value = MARK_PRICE.with_label_values(&["gauge-market"]).get();
        assert!((value - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_contains_metric_names() {
        Metrics::input_rejected("invalid_argument");
        Metrics::price_impact(1.5);
        let text = Metrics::render().unwrap();
        assert!(text.contains("futura_input_rejected_total"));
        assert!(text.contains("futura_price_impact_pct"));
    }
}
