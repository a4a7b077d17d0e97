use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to read env file '{path}': {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error(
        "No Polygon API key found. Set {0} in the secrets file, the .env file, or the environment."
    )]
    MissingCredential(&'static str),
}
