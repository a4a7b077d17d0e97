use crate::returns::average_return;
use chrono::NaiveDate;
use core_types::TickerResult;
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything one run produces: a row per requested symbol and the portfolio summary.
///
/// This is the data transfer object handed to the table and JSON renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnsReport {
    /// The date whose opening prices the returns are measured from.
    pub date: NaiveDate,
    /// One entry per requested symbol, in request order.
    pub results: Vec<TickerResult>,
    /// Mean `return_pct` over successful rows. `None` if every symbol failed.
    pub average_return_pct: Option<Decimal>,
}

impl ReturnsReport {
    pub fn new(date: NaiveDate, results: Vec<TickerResult>) -> Self {
        let returns: Vec<Decimal> = results.iter().filter_map(TickerResult::return_pct).collect();
        let average_return_pct = average_return(&returns);

        Self {
            date,
            results,
            average_return_pct,
        }
    }

    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.results.len() - self.successes()
    }
}
