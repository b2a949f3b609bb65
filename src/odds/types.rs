//! Odds conversion and lookup errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid price reaching the converter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    /// Zero is not a valid American price
    #[error("Invalid American odds: {0}")]
    InvalidAmerican(i64),
    /// American odds must be whole numbers
    #[error("American odds must be a whole number: {0}")]
    FractionalAmerican(f64),
    /// NaN or infinite input
    #[error("Odds value is not finite")]
    NonFiniteOdds,
    /// Price absent or not numeric in the payload
    #[error("Price missing from quote")]
    MissingPrice,
    /// Decimal odds must be positive (and above 1 where a payout is implied)
    #[error("Invalid decimal odds: {0}")]
    InvalidDecimal(Decimal),
}

/// A bookmaker quote that cannot be used for a market
///
/// Raised by lookups and consumed by exclusion: the bookmaker simply does not
/// count for that market.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketError {
    #[error("Bookmaker {bookmaker} has no {market} market")]
    MissingMarket { bookmaker: String, market: String },
    #[error("Bookmaker {bookmaker} has no outcome for {team}")]
    MissingOutcome { bookmaker: String, team: String },
    #[error("Bookmaker {bookmaker} quote rejected: {source}")]
    InvalidQuote {
        bookmaker: String,
        #[source]
        source: OddsError,
    },
}

/// Unknown market key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported market type: {0} (expected h2h or spreads)")]
pub struct ParseMarketTypeError(pub String);
