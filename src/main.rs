use analytics::ReturnsReport;
use anyhow::{Context, Result};
use api_client::PolygonClient;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use configuration::{load_settings, resolve_credential};
use core_types::{CoreError, TickerRequest, has_symbols};
use engine::ReturnCalculator;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod prompt;
mod render;

/// The main entry point for the stock returns calculator.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries results.
    let (log_writer, _log_guard) = tracing_appender::non_blocking(io::stderr());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(log_writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // The API key is resolved once; a missing key stops the program here.
    let settings = load_settings(&cli.config).context("Failed to load settings")?;
    let api_key = resolve_credential(&settings.secrets)?;
    let client = PolygonClient::from_settings(&settings.api, api_key)?;
    let calculator = ReturnCalculator::new(Arc::new(client));

    match &cli.tickers {
        Some(tickers) => {
            let date = cli.date.unwrap_or_else(today);
            let requests = TickerRequest::batch(tickers, date)?;
            let report = calculate(&calculator, date, &requests, cli.format).await?;
            print_report(&report, cli.format)?;
        }
        None => run_interactive(&calculator, &cli).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Computes the return of each stock between its opening price on a date and
/// its most recent close, using the Polygon.io API.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Comma-separated ticker symbols (e.g. "HPE, SLB, AVGO"). Prompts interactively when omitted.
    #[arg(long, short)]
    tickers: Option<String>,

    /// The opening date to measure from (format: YYYY-MM-DD). Defaults to today.
    #[arg(long, short)]
    date: Option<NaiveDate>,

    /// How to print the results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Name of the optional settings file, without the `.toml` extension.
    #[arg(long, default_value = "config")]
    config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Interactive Session
// ==============================================================================

/// Repeatedly asks for tickers and a date, printing a report after each answer.
async fn run_interactive(calculator: &ReturnCalculator, cli: &Cli) -> Result<()> {
    println!("Stock Returns Calculator (Polygon API)");
    println!(
        "Enter a comma-separated list of tickers and a date to compute the return between \
         that day's open and the latest available close. Type 'q' to quit."
    );

    let mut input = io::stdin().lock();
    loop {
        println!();
        let Some(answer) = prompt::ask(&mut input, "Tickers (e.g. HPE, SLB, AVGO, MS, PSX): ")?
        else {
            break;
        };
        if prompt::is_quit(&answer) {
            break;
        }
        if !has_symbols(&answer) {
            eprintln!("{}", CoreError::EmptyTickerList);
            continue;
        }

        let default_date = cli.date.unwrap_or_else(today);
        let Some(date) = prompt::ask_date(&mut input, default_date)? else {
            break;
        };

        let requests = TickerRequest::batch(&answer, date)?;
        let report = calculate(calculator, date, &requests, cli.format).await?;
        print_report(&report, cli.format)?;
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ==============================================================================
// Calculation & Output
// ==============================================================================

/// Runs the calculator over `requests`, showing progress on stderr in table mode.
async fn calculate(
    calculator: &ReturnCalculator,
    date: NaiveDate,
    requests: &[TickerRequest],
    format: OutputFormat,
) -> Result<ReturnsReport> {
    let progress_bar = match format {
        OutputFormat::Table => ProgressBar::new(requests.len() as u64),
        OutputFormat::Json => ProgressBar::hidden(),
    };
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let mut started = 0;
    let report = calculator
        .run_with(date, requests, |request| {
            progress_bar.set_position(started);
            progress_bar.set_message(format!("Fetching {}...", request.symbol));
            started += 1;
        })
        .await;

    progress_bar.finish_and_clear();
    Ok(report)
}

fn print_report(report: &ReturnsReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("\nResults");
            println!("{}", render::render(report));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
