//! Execution pricer.
//!
//! A trade moves the curve continuously as it fills, so the trader realizes
//! the size-weighted average price along the path, not the final marginal
//! price. Two integrators are provided:
//!
//! - `Discrete`: left Riemann sum over equal slices of the trade
//! - `ClosedForm`: exact integral of the clamped logistic (softplus antiderivative)
//!
//! For a non-decreasing curve the discrete sum is a lower/upper Darboux sum,
//! so the gap between the two never exceeds `|post - pre| / steps`.

use futura_core::{CoreError, Result};

use crate::config::{CurveConfig, ExecutionMethod};
use crate::curve::{logit, mark_price_within, price_at, PriceBounds};
use crate::state::AmmState;

/// Slice count used when no configuration is supplied.
pub const DEFAULT_INTEGRATION_STEPS: u32 = 100;

/// Average fill price of `trade_size` with default bounds and 100 slices.
///
/// # Errors
/// `InvalidArgument` when `trade_size` is zero or not finite; the average
/// over an empty trade is undefined.
pub fn average_price(state: &AmmState, trade_size: f64) -> Result<f64> {
    discrete_average(
        state,
        trade_size,
        DEFAULT_INTEGRATION_STEPS,
        &PriceBounds::DEFAULT,
    )
}

/// Average fill price using the bounds, slice count and method of `config`.
pub fn average_price_with(state: &AmmState, trade_size: f64, config: &CurveConfig) -> Result<f64> {
    let bounds = config.bounds();
    match config.execution_method {
        ExecutionMethod::Discrete => {
            discrete_average(state, trade_size, config.integration_steps, &bounds)
        }
        ExecutionMethod::ClosedForm => closed_form_average(state, trade_size, &bounds),
    }
}

/// Left Riemann sum over `steps` equal slices.
///
/// Each slice fills at the curve price of the shadow inventory before the
/// slice. Slices are equal, so the size-weighted average is the plain mean
/// of the slice prices; a slice too small to represent fills at the mark.
pub fn discrete_average(
    state: &AmmState,
    trade_size: f64,
    steps: u32,
    bounds: &PriceBounds,
) -> Result<f64> {
    validate_size(trade_size)?;
    if steps == 0 {
        return Err(CoreError::InvalidArgument(
            "integration steps must be at least 1".to_string(),
        ));
    }

    let step_size = trade_size / f64::from(steps);
    let start = state.net_position();
    let mut price_sum = 0.0;

    for i in 0..steps {
        // Offset from the start instead of a running sum keeps slices exact.
        let inventory = start + step_size * f64::from(i);
        price_sum += price_at(state, inventory, bounds);
    }

    Ok(price_sum / f64::from(steps))
}

/// Exact average of the clamped logistic over the trade interval.
pub fn closed_form_average(state: &AmmState, trade_size: f64, bounds: &PriceBounds) -> Result<f64> {
    validate_size(trade_size)?;

    let k = state.liquidity_depth();
    let start = k * state.skew();
    let end = k * (state.skew() + trade_size);
    let (lo, hi) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let width = hi - lo;

    if !(lo.is_finite() && hi.is_finite()) || width <= 0.0 || !width.is_finite() {
        // Sizes too small to resolve or too large to represent in curve space.
        if width == 0.0 {
            return Ok(mark_price_within(state, bounds));
        }
        return discrete_average(state, trade_size, DEFAULT_INTEGRATION_STEPS, bounds);
    }

    Ok(clamped_logistic_integral(lo, hi, bounds) / width)
}

/// `∫ clamp(σ(u), floor, ceiling) du` over `[lo, hi]`.
fn clamped_logistic_integral(lo: f64, hi: f64, bounds: &PriceBounds) -> f64 {
    let z_floor = logit(bounds.floor);
    let z_ceiling = logit(bounds.ceiling);
    let mut area = 0.0;

    // Flat segment pinned at the floor.
    if lo < z_floor {
        area += bounds.floor * (hi.min(z_floor) - lo);
    }

    // Logistic segment: antiderivative of σ is softplus.
    let mid_lo = lo.max(z_floor);
    let mid_hi = hi.min(z_ceiling);
    if mid_hi > mid_lo {
        area += softplus(mid_hi) - softplus(mid_lo);
    }

    // Flat segment pinned at the ceiling.
    if hi > z_ceiling {
        area += bounds.ceiling * (hi - lo.max(z_ceiling));
    }

    area
}

/// `ln(1 + e^x)` without overflow.
#[inline]
fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

fn validate_size(trade_size: f64) -> Result<()> {
    if trade_size == 0.0 || !trade_size.is_finite() {
        return Err(CoreError::InvalidArgument(format!(
            "trade size must be non-zero and finite, got {trade_size}"
        )));
    }
    Ok(())
}
