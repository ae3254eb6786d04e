use std::path::PathBuf;

/// Errors raised while loading or validating configuration.
///
/// Searches never fail; every problem with a policy surfaces here, before the
/// first turn is played.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("unknown evaluation function '{0}'")]
    UnknownEvaluation(String),

    #[error("evaluation function '{0}' is not implemented")]
    NotImplemented(String),

    #[error("config validation error: {0}")]
    Validation(String),
}
