use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::{ApiKey, ApiSettings};
use reqwest::StatusCode;
use rust_decimal::Decimal;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{AggregateBar, OpenCloseResponse, PreviousCloseResponse};

/// The abstract interface for a daily price-data service.
/// The return calculator only talks to this trait, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the opening price of `symbol` on `date`.
    async fn get_open_price(&self, symbol: &str, date: NaiveDate) -> Result<Decimal, ApiError>;

    /// Fetches the closing price of the most recent completed session for `symbol`.
    async fn get_last_close(&self, symbol: &str) -> Result<Decimal, ApiError>;
}

/// A concrete implementation of `PriceSource` backed by the Polygon.io REST API.
#[derive(Clone)]
pub struct PolygonClient {
    client: reqwest::Client,
    base_url: String,

    api_key: ApiKey,
}

impl PolygonClient {
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stock-returns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::http)?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Builds a client around an already configured `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: ApiKey) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_settings(settings: &ApiSettings, api_key: ApiKey) -> Result<Self, ApiError> {
        Self::new(&settings.base_url, api_key)
    }

    fn open_close_url(&self, symbol: &str, date: NaiveDate) -> String {
        format!(
            "{}/v1/open-close/{}/{}?adjusted=true&apiKey={}",
            self.base_url,
            symbol,
            date.format("%Y-%m-%d"),
            self.api_key.expose()
        )
    }

    fn previous_close_url(&self, symbol: &str) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/prev?adjusted=true&apiKey={}",
            self.base_url,
            symbol,
            self.api_key.expose()
        )
    }

    /// Issues a single GET and hands back the status and raw body.
    async fn get(&self, url: &str) -> Result<(StatusCode, String), ApiError> {
        tracing::debug!(url = %url.replace(self.api_key.expose(), "****"), "GET");

        let response = self.client.get(url).send().await.map_err(ApiError::http)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::http)?;

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "Response received");
        Ok((status, text))
    }
}

#[async_trait]
impl PriceSource for PolygonClient {
    async fn get_open_price(&self, symbol: &str, date: NaiveDate) -> Result<Decimal, ApiError> {
        let url = self.open_close_url(symbol, date);
        let (status, body) = self.get(&url).await?;
        OpenCloseResponse::interpret(symbol, date, status, &body)
    }

    async fn get_last_close(&self, symbol: &str) -> Result<Decimal, ApiError> {
        let url = self.previous_close_url(symbol);
        let (status, body) = self.get(&url).await?;
        PreviousCloseResponse::interpret(symbol, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PolygonClient {
        PolygonClient::new(base, ApiKey::new("k3y").unwrap()).unwrap()
    }

    #[test]
    fn endpoint_urls_match_polygon_paths() {
        let client = client("https://api.polygon.io/");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_eq!(
            client.open_close_url("HPE", date),
            "https://api.polygon.io/v1/open-close/HPE/2024-01-05?adjusted=true&apiKey=k3y"
        );
        assert_eq!(
            client.previous_close_url("HPE"),
            "https://api.polygon.io/v2/aggs/ticker/HPE/prev?adjusted=true&apiKey=k3y"
        );
    }
}
