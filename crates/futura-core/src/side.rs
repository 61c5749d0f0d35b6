//! Trade direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Contracts;

/// Trade side: buy (long the event) or sell (short the event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Signed contract count for an unsigned quantity on this side.
    pub fn signed(&self, quantity: Decimal) -> Contracts {
        let quantity = quantity.abs();
        match self {
            Self::Buy => Contracts::new(quantity),
            Self::Sell => Contracts::new(-quantity),
        }
    }

    /// Side implied by a signed trade size; `None` for zero.
    pub fn from_signed(size: f64) -> Option<Self> {
        if size > 0.0 {
            Some(Self::Buy)
        } else if size < 0.0 {
            Some(Self::Sell)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
