/// Failures while reading, checking or writing a twodns configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("cannot write config file {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("invalid config TOML: {0}")]
    Parse(String),

    #[error("cannot render config as TOML: {0}")]
    Serialize(String),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
