use crate::error::ConfigError;
use crate::settings::SecretsSettings;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The single name the API key is stored under in every source.
pub const CREDENTIAL_KEY: &str = "POLYGON_API_KEY";

/// The Polygon API key. Resolved once at startup and handed to the price client.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw value, returning `None` if it is empty or only whitespace.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Which layer an `ApiKey` was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretsFile,
    EnvFile,
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialSource::SecretsFile => "secrets file",
            CredentialSource::EnvFile => "env file",
            CredentialSource::Environment => "process environment",
        };
        f.write_str(name)
    }
}

/// Looks up `POLYGON_API_KEY` in the secrets file, then the env file, then the
/// process environment, stopping at the first non-empty value.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    secrets_file: PathBuf,
    env_file: PathBuf,
}

impl CredentialResolver {
    pub fn new(secrets: &SecretsSettings) -> Self {
        Self {
            secrets_file: secrets.secrets_file.clone(),
            env_file: secrets.env_file.clone(),
        }
    }

    /// Resolves the key, consulting the real process environment last.
    pub fn resolve(&self) -> Result<ApiKey, ConfigError> {
        let (key, _) = self.resolve_with(|name| std::env::var(name).ok())?;
        Ok(key)
    }

    /// Same as [`resolve`](Self::resolve), with the environment lookup supplied by the caller.
    pub fn resolve_with<F>(&self, env: F) -> Result<(ApiKey, CredentialSource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let found = if let Some(key) = read_secrets_file(&self.secrets_file)? {
            (key, CredentialSource::SecretsFile)
        } else if let Some(key) = read_env_file(&self.env_file)? {
            (key, CredentialSource::EnvFile)
        } else if let Some(key) = env(CREDENTIAL_KEY).and_then(ApiKey::new) {
            (key, CredentialSource::Environment)
        } else {
            return Err(ConfigError::MissingCredential(CREDENTIAL_KEY));
        };

        tracing::info!(source = %found.1, "Resolved {}", CREDENTIAL_KEY);
        Ok(found)
    }
}

/// Resolves the API key using the locations from `secrets`.
pub fn resolve_credential(secrets: &SecretsSettings) -> Result<ApiKey, ConfigError> {
    CredentialResolver::new(secrets).resolve()
}

fn read_secrets_file(path: &Path) -> Result<Option<ApiKey>, ConfigError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "Secrets file not present, skipping");
        return Ok(None);
    }

    let store = config::Config::builder()
        .add_source(config::File::new(
            &path.to_string_lossy(),
            config::FileFormat::Toml,
        ))
        .build()?;
    let entries = store.try_deserialize::<HashMap<String, config::Value>>()?;

    let key = entries
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CREDENTIAL_KEY))
        .and_then(|(_, value)| value.into_string().ok())
        .and_then(ApiKey::new);
    Ok(key)
}

fn read_env_file(path: &Path) -> Result<Option<ApiKey>, ConfigError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "Env file not present, skipping");
        return Ok(None);
    }

    let to_config_error = |source| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    for item in dotenvy::from_path_iter(path).map_err(to_config_error)? {
        let (name, value) = item.map_err(to_config_error)?;
        if name == CREDENTIAL_KEY {
            return Ok(ApiKey::new(value));
        }
    }
    Ok(None)
}
