use crate::error::ApiError;
use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Status value Polygon uses when it has no data for the request.
const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// The response from `GET /v1/open-close/{ticker}/{date}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenCloseResponse {
    pub status: Option<String>,
    pub open: Option<Decimal>,
    // Polygon sends more fields (close, high, low, volume, ...); they are ignored.
}

/// The response from `GET /v2/aggs/ticker/{ticker}/prev`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviousCloseResponse {
    pub results: Option<Vec<AggregateBar>>,
}

/// A single daily bar inside `PreviousCloseResponse::results`.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateBar {
    #[serde(rename = "c")]
    pub close: Option<Decimal>,
}

impl OpenCloseResponse {
    /// Turns a raw open/close reply into the opening price.
    ///
    /// A `NOT_FOUND` payload is reported as such even when it arrives with a
    /// non-2xx status, which is how Polygon sends it.
    pub fn interpret(
        symbol: &str,
        date: NaiveDate,
        status: StatusCode,
        body: &str,
    ) -> Result<Decimal, ApiError> {
        let parsed = serde_json::from_str::<Self>(body);

        if let Ok(payload) = &parsed {
            if payload.status.as_deref() == Some(STATUS_NOT_FOUND) {
                return Err(ApiError::NotFound(format!(
                    "No data found for {symbol} on {date}"
                )));
            }
        }

        if !status.is_success() {
            return Err(ApiError::Transport {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }

        let payload = parsed.map_err(|e| {
            ApiError::InvalidResponse(format!("Could not parse open/close for {symbol}: {e}"))
        })?;

        payload.open.ok_or_else(|| {
            ApiError::InvalidResponse(format!("No open price for {symbol} in response: {body}"))
        })
    }
}

impl PreviousCloseResponse {
    /// Turns a raw previous-close reply into the most recent closing price.
    pub fn interpret(symbol: &str, status: StatusCode, body: &str) -> Result<Decimal, ApiError> {
        if !status.is_success() {
            return Err(ApiError::Transport {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }

        let payload = serde_json::from_str::<Self>(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Could not parse last close for {symbol}: {e}"))
        })?;

        let latest = payload
            .results
            .as_deref()
            .and_then(<[AggregateBar]>::first)
            .ok_or_else(|| {
                ApiError::NotFound(format!("No recent price data available for {symbol}"))
            })?;

        latest.close.ok_or_else(|| {
            ApiError::InvalidResponse(format!("No close price for {symbol} in response: {body}"))
        })
    }
}
