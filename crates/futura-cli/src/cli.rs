//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use futura_core::Side;
use rust_decimal::Decimal;

/// Futura probability futures pricing engine
#[derive(Parser, Debug)]
#[command(name = "futura", version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (can also be set via FUTURA_CONFIG env var)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print Prometheus metrics after the command output
    #[arg(long, global = true)]
    pub dump_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List configured markets with their mark price
    Markets,

    /// Preview a trade without touching the book
    Quote(TradeArgs),

    /// Commit a trade against the in-memory book
    Trade {
        #[command(flatten)]
        trade: TradeArgs,

        /// Commit the same trade this many times
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Margin requirements (and health, if margin is posted) for a position
    Margin {
        /// Signed contract count (negative = short)
        #[arg(long, allow_hyphen_values = true)]
        contracts: Decimal,

        #[arg(long)]
        entry: Decimal,

        /// Collateral posted against the position
        #[arg(long)]
        posted: Option<Decimal>,

        /// Current mark; defaults to the entry price
        #[arg(long)]
        mark: Option<Decimal>,
    },

    /// Unrealized PnL for a position
    Pnl {
        /// Signed contract count (negative = short)
        #[arg(long, allow_hyphen_values = true)]
        contracts: Decimal,

        #[arg(long)]
        entry: Decimal,

        #[arg(long)]
        current: Decimal,

        /// Posted margin, for PnL as a percentage of margin
        #[arg(long)]
        margin: Option<Decimal>,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct TradeArgs {
    /// Contract identifier
    #[arg(long)]
    pub market: String,

    #[arg(long, value_enum)]
    pub side: SideArg,

    /// Unsigned contract count
    #[arg(long)]
    pub contracts: Decimal,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => Side::Buy,
            SideArg::Sell => Side::Sell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_quote() {
        let args = Args::try_parse_from([
            "futura",
            "quote",
            "--market",
            "btc-100k-7d",
            "--side",
            "buy",
            "--contracts",
            "1000",
        ])
        .unwrap();

        assert!(!args.dump_metrics);
        assert_eq!(
            args.command,
            Command::Quote(TradeArgs {
                market: "btc-100k-7d".to_string(),
                side: SideArg::Buy,
                contracts: dec!(1000),
            })
        );
    }

    #[test]
    fn test_parse_trade_with_repeat() {
        let args = Args::try_parse_from([
            "futura",
            "--dump-metrics",
            "trade",
            "--market",
            "eth-5k-14d",
            "--side",
            "sell",
            "--contracts",
            "2.5",
            "--repeat",
            "3",
        ])
        .unwrap();

        assert!(args.dump_metrics);
        match args.command {
            Command::Trade { trade, repeat } => {
                assert_eq!(trade.side, SideArg::Sell);
                assert_eq!(trade.contracts, dec!(2.5));
                assert_eq!(repeat, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_contracts() {
        let args = Args::try_parse_from([
            "futura",
            "margin",
            "--contracts",
            "-500",
            "--entry",
            "0.68",
        ])
        .unwrap();

        match args.command {
            Command::Margin {
                contracts, entry, ..
            } => {
                assert_eq!(contracts, dec!(-500));
                assert_eq!(entry, dec!(0.68));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::from(SideArg::Buy), Side::Buy);
        assert_eq!(Side::from(SideArg::Sell), Side::Sell);
    }
}
