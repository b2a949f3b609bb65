//! Conversion between American odds, decimal odds and implied probability
//!
//! - American `+x`: decimal = x / 100 + 1
//! - American `-x`: decimal = 100 / x + 1
//! - Implied probability = 1 / decimal
//!
//! Every function validates its input and fails with [`OddsError`] instead of
//! letting an infinite or undefined value flow into later calculations.

use super::OddsError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Convert American odds to decimal odds. The result is always above 1.
pub fn american_to_decimal(american: i64) -> Result<Decimal, OddsError> {
    if american == 0 {
        return Err(OddsError::InvalidAmerican(american));
    }

    if american > 0 {
        Ok(Decimal::from(american) / dec!(100) + Decimal::ONE)
    } else {
        Ok(dec!(100) / Decimal::from(american.unsigned_abs()) + Decimal::ONE)
    }
}

/// Break-even probability implied by decimal odds
pub fn decimal_to_implied_probability(decimal: Decimal) -> Result<Decimal, OddsError> {
    if decimal <= Decimal::ZERO {
        return Err(OddsError::InvalidDecimal(decimal));
    }

    Ok(Decimal::ONE / decimal)
}

/// Shorthand for American odds straight to implied probability
pub fn american_to_implied_probability(american: i64) -> Result<Decimal, OddsError> {
    decimal_to_implied_probability(american_to_decimal(american)?)
}

/// Convert decimal odds back to American odds, rounded to a whole price
///
/// Prices of 2.0 and above become positive (underdog) odds, anything between
/// 1 and 2 becomes negative (favorite) odds.
pub fn decimal_to_american(decimal: Decimal) -> Result<i64, OddsError> {
    if decimal <= Decimal::ONE {
        return Err(OddsError::InvalidDecimal(decimal));
    }

    let net = decimal - Decimal::ONE;
    let american = if decimal >= Decimal::TWO {
        round_half_up(net * dec!(100))
    } else {
        -round_half_up(dec!(100) / net)
    };

    american
        .to_i64()
        .ok_or(OddsError::InvalidDecimal(decimal))
}

/// Validate an American price that arrived as a float
pub fn american_from_f64(value: f64) -> Result<i64, OddsError> {
    if !value.is_finite() {
        return Err(OddsError::NonFiniteOdds);
    }
    if value.fract() != 0.0 {
        return Err(OddsError::FractionalAmerican(value));
    }

    let american = value as i64;
    if american == 0 {
        return Err(OddsError::InvalidAmerican(american));
    }
    Ok(american)
}

/// Validate a decimal price that arrived as a float
pub fn decimal_from_f64(value: f64) -> Result<Decimal, OddsError> {
    if !value.is_finite() {
        return Err(OddsError::NonFiniteOdds);
    }

    let decimal = Decimal::try_from(value).map_err(|_| OddsError::NonFiniteOdds)?;
    if decimal <= Decimal::ZERO {
        return Err(OddsError::InvalidDecimal(decimal));
    }
    Ok(decimal)
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
