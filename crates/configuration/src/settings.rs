use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub secrets: SecretsSettings,
}

/// Connection parameters for the price-data service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Scheme and host of the Polygon API, without a trailing slash.
    pub base_url: String,
}

/// Where the credential resolver looks for the API key before falling back to
/// the process environment.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsSettings {
    /// TOML secrets store, consulted first.
    pub secrets_file: PathBuf,
    /// Local `KEY=value` env-definition file, consulted second.
    pub env_file: PathBuf,
}
