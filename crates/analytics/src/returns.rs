use crate::error::AnalyticsError;
use rust_decimal::Decimal;

/// Percentage change from `open` to `close`: `(close - open) / open * 100`.
///
/// An `open` of exactly zero has no defined return and is reported as
/// `DivisionByZero`. Negative prices go through the formula unchanged.
pub fn calculate_return(open: Decimal, close: Decimal) -> Result<Decimal, AnalyticsError> {
    if open.is_zero() {
        return Err(AnalyticsError::DivisionByZero("return_pct".to_string()));
    }

    close
        .checked_sub(open)
        .and_then(|delta| delta.checked_div(open))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            AnalyticsError::Calculation(format!("return from {open} to {close} overflowed"))
        })
}

/// Unweighted arithmetic mean of `returns`.
///
/// `None` when there are no returns, or when their sum does not fit in a `Decimal`.
pub fn average_return(returns: &[Decimal]) -> Option<Decimal> {
    if returns.is_empty() {
        return None;
    }

    returns
        .iter()
        .try_fold(Decimal::ZERO, |sum, pct| sum.checked_add(*pct))?
        .checked_div(Decimal::from(returns.len()))
}
