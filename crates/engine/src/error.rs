use thiserror::Error;

/// Anything that can go wrong while evaluating a single symbol.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A blank entry in the ticker list, e.g. from `"HPE,,SLB"`.
    #[error("empty ticker")]
    EmptySymbol,

    #[error(transparent)]
    ApiClient(#[from] api_client::error::ApiError),

    #[error(transparent)]
    Analytics(#[from] analytics::AnalyticsError),
}
