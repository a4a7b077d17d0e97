use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Splits free-text input on commas and normalizes each entry into a symbol.
///
/// Entries are trimmed and uppercased. Every entry is kept, including
/// duplicates and blanks (e.g. from a trailing comma), so that each one gets
/// its own row.
pub fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .map(str::to_uppercase)
        .collect()
}

/// True when `input` names at least one non-blank symbol.
pub fn has_symbols(input: &str) -> bool {
    input.split(',').any(|entry| !entry.trim().is_empty())
}

/// A single "open on `date` vs. last close" lookup for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerRequest {
    pub symbol: String,
    pub date: NaiveDate,
}

impl TickerRequest {
    pub fn new(symbol: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            date,
        }
    }

    /// Builds one request per comma-separated entry in `input`, all for the same date.
    ///
    /// Fails when no entry holds a symbol. Otherwise blank entries become
    /// requests with an empty symbol, which are reported as failures later.
    pub fn batch(input: &str, date: NaiveDate) -> Result<Vec<Self>, CoreError> {
        if !has_symbols(input) {
            return Err(CoreError::EmptyTickerList);
        }

        Ok(parse_symbols(input)
            .into_iter()
            .map(|symbol| Self::new(symbol, date))
            .collect())
    }
}

/// The outcome of processing one `TickerRequest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerResult {
    Success {
        symbol: String,
        open_price: Decimal,
        last_close: Decimal,
        /// Percentage change from `open_price` to `last_close`, unrounded.
        return_pct: Decimal,
    },
    Failure {
        symbol: String,
        error_message: String,
    },
}

impl TickerResult {
    pub fn symbol(&self) -> &str {
        match self {
            TickerResult::Success { symbol, .. } | TickerResult::Failure { symbol, .. } => symbol,
        }
    }

    /// Returns the percentage return for successful rows only.
    pub fn return_pct(&self) -> Option<Decimal> {
        match self {
            TickerResult::Success { return_pct, .. } => Some(*return_pct),
            TickerResult::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TickerResult::Success { .. })
    }
}
