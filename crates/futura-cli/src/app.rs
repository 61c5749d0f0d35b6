//! Application orchestration.
//!
//! Builds the market registry from configuration and runs one command
//! against it:
//! - Market listing
//! - Trade previews and commits
//! - Margin, health and PnL for a hypothetical position

use crate::cli::{Command, TradeArgs};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use futura_amm::{BookSummary, Fill, MarketRegistry};
use futura_core::{Contracts, CoreError, MarketKey, Price, Side};
use futura_risk::{
    assess, margin_with, pnl, pnl_pct_of_margin, preview_trade, HealthReport, MarginResult,
    Position, TradePreview,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one or more commits on a market.
#[derive(Debug, Clone, Serialize)]
pub struct TradeReport {
    pub fills: Vec<Fill>,
    /// The trader's resulting position, margined at the initial requirement.
    pub position: Position,
    pub book: BookSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarginReport {
    pub margin: MarginResult,
    pub health: Option<HealthReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PnlReport {
    pub pnl: Decimal,
    pub pnl_pct_of_margin: Option<Decimal>,
}

/// Main application.
pub struct Application {
    config: AppConfig,
    registry: MarketRegistry,
}

impl Application {
    /// Create the registry and every configured market.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let registry = MarketRegistry::new(config.curve.clone())?;

        for market in &config.markets {
            let key = MarketKey::new(market.contract_id.as_str())?;
            let params = market.params();
            match &market.curve {
                Some(curve) => registry.create_market_with_config(key, params, curve.clone())?,
                None => registry.create_market(key, params)?,
            };
        }
        info!(markets = registry.len(), "Markets initialized");

        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &MarketRegistry {
        &self.registry
    }

    /// Run `command` and return its result as JSON.
    pub fn execute(&self, command: &Command) -> AppResult<serde_json::Value> {
        debug!(?command, "Executing command");
        let value = match command {
            Command::Markets => serde_json::to_value(self.markets()?)?,
            Command::Quote(trade) => serde_json::to_value(self.quote(trade)?)?,
            Command::Trade { trade, repeat } => serde_json::to_value(self.trade(trade, *repeat)?)?,
            Command::Margin {
                contracts,
                entry,
                posted,
                mark,
            } => serde_json::to_value(self.margin(*contracts, *entry, *posted, *mark)?)?,
            Command::Pnl {
                contracts,
                entry,
                current,
                margin,
            } => serde_json::to_value(self.pnl(*contracts, *entry, *current, *margin)?)?,
        };
        Ok(value)
    }

    pub fn markets(&self) -> AppResult<Vec<BookSummary>> {
        self.registry
            .keys()
            .iter()
            .map(|key| self.registry.summary(key).map_err(AppError::from))
            .collect()
    }

    pub fn quote(&self, trade: &TradeArgs) -> AppResult<TradePreview> {
        let key = MarketKey::new(trade.market.as_str())?;
        let (state, curve) = self.registry.snapshot_with_config(&key)?;
        Ok(preview_trade(
            &state,
            trade.side.into(),
            trade.contracts,
            &curve,
            &self.config.risk,
        )?)
    }

    pub fn trade(&self, trade: &TradeArgs, repeat: u32) -> AppResult<TradeReport> {
        if repeat == 0 {
            return Err(CoreError::InvalidArgument("repeat must be at least 1".to_string()).into());
        }
        if trade.contracts <= Decimal::ZERO {
            return Err(CoreError::InvalidArgument(format!(
                "contracts must be positive, got {}",
                trade.contracts
            ))
            .into());
        }
        let key = MarketKey::new(trade.market.as_str())?;
        let side: Side = trade.side.into();
        let signed = side.signed(trade.contracts);
        let size = signed.to_f64();

        let mut fills = Vec::with_capacity(repeat as usize);
        let mut cost = Decimal::ZERO;
        for _ in 0..repeat {
            let fill = self.registry.commit_trade(&key, size)?;
            let fill_cost = trade
                .contracts
                .checked_mul(Price::from_f64(fill.average_price)?.inner())
                .ok_or_else(|| overflow("fill cost"))?;
            cost = cost.checked_add(fill_cost).ok_or_else(|| overflow("position cost"))?;
            fills.push(fill);
        }

        let total = trade
            .contracts
            .checked_mul(Decimal::from(repeat))
            .ok_or_else(|| overflow("position size"))?;
        let entry_price = cost
            .checked_div(total)
            .map(Price::new)
            .ok_or_else(|| overflow("entry price"))?;
        let contracts = side.signed(total);
        let margin = margin_with(contracts, entry_price, &self.config.risk)?.initial_margin;

        Ok(TradeReport {
            fills,
            position: Position::new(contracts, entry_price, margin),
            book: self.registry.summary(&key)?,
        })
    }

    pub fn margin(
        &self,
        contracts: Decimal,
        entry: Decimal,
        posted: Option<Decimal>,
        mark: Option<Decimal>,
    ) -> AppResult<MarginReport> {
        let entry = probability(entry)?;
        let contracts = Contracts::new(contracts);
        let margin = margin_with(contracts, entry, &self.config.risk)?;

        let health = match posted {
            Some(posted) => {
                let mark = mark.map(probability).transpose()?.unwrap_or(entry);
                let position = Position::new(contracts, entry, posted);
                Some(assess(&position, mark, &self.config.risk)?)
            }
            None => None,
        };

        Ok(MarginReport { margin, health })
    }

    pub fn pnl(
        &self,
        contracts: Decimal,
        entry: Decimal,
        current: Decimal,
        margin: Option<Decimal>,
    ) -> AppResult<PnlReport> {
        let value = pnl(
            Contracts::new(contracts),
            probability(entry)?,
            probability(current)?,
        );
        Ok(PnlReport {
            pnl: value,
            pnl_pct_of_margin: margin.and_then(|m| pnl_pct_of_margin(value, m)),
        })
    }
}

fn overflow(what: &str) -> AppError {
    CoreError::InvalidArgument(format!("{what} overflows decimal range")).into()
}

/// Prices supplied on the command line must be valid probabilities.
fn probability(value: Decimal) -> AppResult<Price> {
    let price = Price::new(value);
    if price.is_probability() {
        Ok(price)
    } else {
        Err(CoreError::InvalidArgument(format!("price must be within [0, 1], got {value}")).into())
    }
}
