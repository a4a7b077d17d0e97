use analytics::ReturnsReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::TickerResult;
use rust_decimal::Decimal;

/// Builds the results table.
///
/// Price columns only appear when at least one symbol succeeded, and the
/// `Error` column only when at least one failed.
pub fn results_table(report: &ReturnsReport) -> Table {
    let show_prices = report.successes() > 0;
    let show_errors = report.failures() > 0;

    let mut header = vec![Cell::new("Ticker")];
    if show_prices {
        header.push(Cell::new(format!("Open Price ({})", report.date.format("%Y-%m-%d"))));
        header.push(Cell::new("Last Close"));
        header.push(Cell::new("Return %"));
    }
    if show_errors {
        header.push(Cell::new("Error"));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for result in &report.results {
        let mut row = vec![Cell::new(result.symbol())];
        match result {
            TickerResult::Success {
                open_price,
                last_close,
                return_pct,
                ..
            } => {
                if show_prices {
                    row.push(price_cell(*open_price));
                    row.push(price_cell(*last_close));
                    row.push(return_cell(*return_pct));
                }
                if show_errors {
                    row.push(Cell::new(""));
                }
            }
            TickerResult::Failure { error_message, .. } => {
                if show_prices {
                    row.extend([Cell::new(""), Cell::new(""), Cell::new("")]);
                }
                row.push(Cell::new(error_message).fg(Color::Red));
            }
        }
        table.add_row(row);
    }

    table
}

/// The portfolio summary, or `None` when no symbol succeeded.
pub fn summary_line(report: &ReturnsReport) -> Option<String> {
    report
        .average_return_pct
        .map(|avg| format!("Average portfolio return: {:.2} %", avg.round_dp(2)))
}

/// Table plus summary, ready to print.
pub fn render(report: &ReturnsReport) -> String {
    let mut out = results_table(report).to_string();
    if let Some(summary) = summary_line(report) {
        out.push_str("\n\n");
        out.push_str(&summary);
    }
    out
}

fn price_cell(price: Decimal) -> Cell {
    Cell::new(format!("{:.4}", price.round_dp(4))).set_alignment(CellAlignment::Right)
}

fn return_cell(pct: Decimal) -> Cell {
    let cell = Cell::new(format!("{:.2}", pct.round_dp(2))).set_alignment(CellAlignment::Right);
    if pct < Decimal::ZERO {
        cell.fg(Color::Red)
    } else if pct > Decimal::ZERO {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Renders with a fixed width so long messages never wrap.
    fn rendered(report: &ReturnsReport) -> String {
        let mut table = results_table(report);
        table.set_width(240);
        format!("{table}\n{}", summary_line(report).unwrap_or_default())
    }

    fn success(symbol: &str, open: Decimal, close: Decimal, pct: Decimal) -> TickerResult {
        TickerResult::Success {
            symbol: symbol.to_string(),
            open_price: open,
            last_close: close,
            return_pct: pct,
        }
    }

    fn failure(symbol: &str, message: &str) -> TickerResult {
        TickerResult::Failure {
            symbol: symbol.to_string(),
            error_message: message.to_string(),
        }
    }

    #[test]
    fn mixed_rows_show_every_column_and_the_summary() {
        let report = ReturnsReport::new(
            date(),
            vec![
                success("HPE", dec!(17.123456), dec!(19.25), dec!(12.4187)),
                failure("SLB", "No data found for SLB on 2024-03-01"),
            ],
        );

        let out = rendered(&report);
        for expected in [
            "Ticker",
            "Open Price (2024-03-01)",
            "Last Close",
            "Return %",
            "Error",
            "17.1235",
            "19.2500",
            "12.42",
            "No data found for SLB on 2024-03-01",
            "Average portfolio return: 12.42 %",
        ] {
            assert!(out.contains(expected), "missing {expected:?} in:\n{out}");
        }
    }

    #[test]
    fn all_successes_have_no_error_column() {
        let report = ReturnsReport::new(
            date(),
            vec![
                success("HPE", dec!(100), dec!(110), dec!(10)),
                success("MS", dec!(50), dec!(45), dec!(-10)),
            ],
        );

        let out = rendered(&report);
        assert!(!out.contains("Error"));
        assert!(out.contains("-10.00"));
        assert_eq!(
            summary_line(&report).as_deref(),
            Some("Average portfolio return: 0.00 %")
        );
    }

    #[test]
    fn all_failures_have_no_price_columns_or_summary() {
        let report = ReturnsReport::new(date(), vec![failure("PSX", "Polygon error (HTTP 500): boom")]);

        let out = rendered(&report);
        assert!(!out.contains("Return %"));
        assert!(out.contains("Polygon error (HTTP 500): boom"));
        assert!(summary_line(&report).is_none());
    }
}
