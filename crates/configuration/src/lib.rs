pub use error::ConfigError;

// Declare the modules that make up this crate.
pub mod credentials;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use credentials::{
    ApiKey, CREDENTIAL_KEY, CredentialResolver, CredentialSource, resolve_credential,
};
pub use settings::{ApiSettings, SecretsSettings, Settings};

/// Prefix for environment variables that override settings,
/// e.g. `STOCK_RETURNS_API__BASE_URL`.
pub const ENV_PREFIX: &str = "STOCK_RETURNS";

/// Loads the application settings.
///
/// Built-in defaults are layered under an optional `<name>.toml` file, which is
/// in turn layered under `STOCK_RETURNS_*` environment variables.
pub fn load_settings(name: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("api.base_url", settings::DEFAULT_BASE_URL)?
        .set_default("secrets.secrets_file", settings::DEFAULT_SECRETS_FILE)?
        .set_default("secrets.env_file", settings::DEFAULT_ENV_FILE)?
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("absent");
        let settings = load_settings(name.to_str().unwrap()).unwrap();

        assert_eq!(settings.api.base_url, "https://api.polygon.io");
        assert_eq!(settings.secrets.secrets_file.to_str(), Some("secrets.toml"));
        assert_eq!(settings.secrets.env_file.to_str(), Some(".env"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("returns.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:9000\"\n\n[secrets]\nenv_file = \"prod.env\"\n",
        )
        .unwrap();

        let name = dir.path().join("returns");
        let settings = load_settings(name.to_str().unwrap()).unwrap();

        assert_eq!(settings.api.base_url, "http://localhost:9000");
        assert_eq!(settings.secrets.env_file.to_str(), Some("prod.env"));
        assert_eq!(settings.secrets.secrets_file.to_str(), Some("secrets.toml"));
    }
}
