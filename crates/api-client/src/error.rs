use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Carries no request URL, since the URL embeds the API key.
    #[error("HTTP request to Polygon failed: {0}")]
    Http(reqwest::Error),

    #[error("Polygon error (HTTP {status}): {body}")]
    Transport { status: u16, body: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Wraps a transport error after stripping the request URL from it.
    pub fn http(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
