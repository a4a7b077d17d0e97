use crate::error::EngineError;
use analytics::{ReturnsReport, calculate_return};
use api_client::PriceSource;
use chrono::NaiveDate;
use core_types::{TickerRequest, TickerResult};
use std::sync::Arc;

pub mod error;

/// Computes open-to-last-close returns for a list of symbols.
///
/// Symbols are processed one at a time, in order. A failure for one symbol is
/// recorded as a `TickerResult::Failure` row and never stops the others.
pub struct ReturnCalculator {
    /// Where open and close prices come from (Polygon in production).
    source: Arc<dyn PriceSource>,
}

impl ReturnCalculator {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    /// Evaluates every request and builds the report for opening day `date`,
    /// with exactly one result per request.
    pub async fn run(&self, date: NaiveDate, requests: &[TickerRequest]) -> ReturnsReport {
        self.run_with(date, requests, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_start` before each symbol is fetched.
    pub async fn run_with<F>(
        &self,
        date: NaiveDate,
        requests: &[TickerRequest],
        mut on_start: F,
    ) -> ReturnsReport
    where
        F: FnMut(&TickerRequest),
    {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            on_start(request);
            results.push(self.evaluate(request).await);
        }

        tracing::info!(
            symbols = results.len(),
            failed = results.iter().filter(|r| !r.is_success()).count(),
            "Return calculation finished"
        );
        ReturnsReport::new(date, results)
    }

    /// Fetches both prices for one symbol and turns the outcome into a row.
    pub async fn evaluate(&self, request: &TickerRequest) -> TickerResult {
        match self.try_evaluate(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(symbol = %request.symbol, error = %e, "Symbol failed");
                TickerResult::Failure {
                    symbol: request.symbol.clone(),
                    error_message: e.to_string(),
                }
            }
        }
    }

    async fn try_evaluate(&self, request: &TickerRequest) -> Result<TickerResult, EngineError> {
        if request.symbol.is_empty() {
            return Err(EngineError::EmptySymbol);
        }

        let open_price = self
            .source
            .get_open_price(&request.symbol, request.date)
            .await?;
        let last_close = self.source.get_last_close(&request.symbol).await?;
        let return_pct = calculate_return(open_price, last_close)?;

        tracing::debug!(
            symbol = %request.symbol,
            %open_price,
            %last_close,
            %return_pct,
            "Symbol evaluated"
        );

        Ok(TickerResult::Success {
            symbol: request.symbol.clone(),
            open_price,
            last_close,
            return_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::error::ApiError;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned prices per symbol; symbols without an entry are "not found".
    #[derive(Default)]
    struct FixturePrices {
        open: HashMap<&'static str, Decimal>,
        close: HashMap<&'static str, Decimal>,
        calls: Mutex<Vec<String>>,
    }

    impl FixturePrices {
        fn with(mut self, symbol: &'static str, open: Decimal, close: Decimal) -> Self {
            self.open.insert(symbol, open);
            self.close.insert(symbol, close);
            self
        }

        fn with_open_only(mut self, symbol: &'static str, open: Decimal) -> Self {
            self.open.insert(symbol, open);
            self
        }
    }

    #[async_trait]
    impl PriceSource for FixturePrices {
        async fn get_open_price(&self, symbol: &str, date: NaiveDate) -> Result<Decimal, ApiError> {
            self.calls.lock().unwrap().push(format!("open:{symbol}"));
            self.open
                .get(symbol)
                .copied()
                .ok_or_else(|| ApiError::NotFound(format!("No data found for {symbol} on {date}")))
        }

        async fn get_last_close(&self, symbol: &str) -> Result<Decimal, ApiError> {
            self.calls.lock().unwrap().push(format!("close:{symbol}"));
            self.close.get(symbol).copied().ok_or_else(|| {
                ApiError::NotFound(format!("No recent price data available for {symbol}"))
            })
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn requests(input: &str) -> Vec<TickerRequest> {
        TickerRequest::batch(input, date()).unwrap()
    }

    #[tokio::test]
    async fn one_row_per_symbol_in_input_order() {
        let source = Arc::new(
            FixturePrices::default()
                .with("HPE", dec!(100), dec!(110))
                .with("MS", dec!(50), dec!(45)),
        );
        let calculator = ReturnCalculator::new(source);

        let report = calculator.run(date(), &requests("hpe, slb, ms")).await;
        let results = &report.results;

        let symbols: Vec<&str> = results.iter().map(TickerResult::symbol).collect();
        assert_eq!(symbols, vec!["HPE", "SLB", "MS"]);
        assert_eq!(results[0].return_pct(), Some(dec!(10)));
        assert_eq!(
            results[1],
            TickerResult::Failure {
                symbol: "SLB".to_string(),
                error_message: "No data found for SLB on 2024-03-01".to_string(),
            }
        );
        assert_eq!(results[2].return_pct(), Some(dec!(-10)));
    }

    #[tokio::test]
    async fn failures_do_not_affect_the_average() {
        let source = Arc::new(
            FixturePrices::default()
                .with("HPE", dec!(100), dec!(110))
                .with("MS", dec!(50), dec!(45)),
        );
        let calculator = ReturnCalculator::new(source);

        let report = calculator.run(date(), &requests("HPE,SLB,MS")).await;
        assert_eq!(report.date, date());
        assert_eq!(report.average_return_pct, Some(Decimal::ZERO));
        assert_eq!(report.failures(), 1);
    }

    #[tokio::test]
    async fn symbols_are_fetched_sequentially_and_stop_at_first_error() {
        let source = Arc::new(
            FixturePrices::default()
                .with("AVGO", dec!(1300), dec!(1300))
                .with_open_only("PSX", dec!(150)),
        );
        let calculator = ReturnCalculator::new(source.clone());

        let mut started = Vec::new();
        let results = calculator
            .run_with(date(), &requests("PSX, NOPE, AVGO"), |r| {
                started.push(r.symbol.clone())
            })
            .await
            .results;

        assert_eq!(started, vec!["PSX", "NOPE", "AVGO"]);
        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["open:PSX", "close:PSX", "open:NOPE", "open:AVGO", "close:AVGO"]
        );
        assert_eq!(
            results[0].clone(),
            TickerResult::Failure {
                symbol: "PSX".to_string(),
                error_message: "No recent price data available for PSX".to_string(),
            }
        );
        assert_eq!(results[2].return_pct(), Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn zero_open_price_becomes_a_failure_row() {
        let source = Arc::new(FixturePrices::default().with("HPE", Decimal::ZERO, dec!(12)));
        let calculator = ReturnCalculator::new(source);

        let results = calculator.run(date(), &requests("HPE")).await.results;
        assert!(!results[0].is_success());
        assert!(matches!(
            &results[0],
            TickerResult::Failure { error_message, .. } if error_message.contains("Division by zero")
        ));
    }

    #[tokio::test]
    async fn blank_entries_fail_without_fetching() {
        let source = Arc::new(FixturePrices::default().with("HPE", dec!(100), dec!(110)));
        let calculator = ReturnCalculator::new(source.clone());

        let report = calculator.run(date(), &requests("hpe,,")).await;

        let empty = TickerResult::Failure {
            symbol: String::new(),
            error_message: "empty ticker".to_string(),
        };
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].return_pct(), Some(dec!(10)));
        assert_eq!(report.results[1..], [empty.clone(), empty]);
        assert_eq!(report.average_return_pct, Some(dec!(10)));
        assert_eq!(*source.calls.lock().unwrap(), vec!["open:HPE", "close:HPE"]);
    }
}
