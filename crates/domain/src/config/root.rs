use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::zone::{ZoneConfig, MAX_TTL, MIN_TTL};
use crate::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};

/// Main configuration structure for twodns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, TCP)
    #[serde(default)]
    pub server: ServerConfig,

    /// Served zone and decoder toggles
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. twodns.toml in current directory
    /// 3. /etc/twodns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(suffix) = overrides.suffix {
            self.zone.suffix = suffix;
        }
        if let Some(ttl) = overrides.ttl {
            self.zone.default_ttl = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.log_json {
            self.logging.json = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            )));
        }

        validate_suffix(&self.zone.normalized_suffix())?;

        if !(MIN_TTL..=MAX_TTL).contains(&self.zone.default_ttl) {
            return Err(ConfigError::Validation(format!(
                "TTL {} out of range {}..={}",
                self.zone.default_ttl, MIN_TTL, MAX_TTL
            )));
        }

        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Write the configuration as TOML, replacing `path`.
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string).map_err(|e| ConfigError::FileWrite {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("twodns.toml").exists() {
            Some("twodns.toml".to_string())
        } else if std::path::Path::new("/etc/twodns/config.toml").exists() {
            Some("/etc/twodns/config.toml".to_string())
        } else {
            None
        }
    }
}

fn validate_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.is_empty() {
        return Err(ConfigError::Validation("Zone suffix cannot be empty".to_string()));
    }
    if suffix.len() > MAX_DOMAIN_LENGTH {
        return Err(ConfigError::Validation(format!(
            "Zone suffix longer than {} characters",
            MAX_DOMAIN_LENGTH
        )));
    }
    for label in suffix.split('.') {
        let valid_chars = label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH || !valid_chars {
            return Err(ConfigError::Validation(format!(
                "Invalid label '{}' in zone suffix",
                label
            )));
        }
    }
    Ok(())
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub suffix: Option<String>,
    pub ttl: Option<u32>,
    pub log_level: Option<String>,
    pub log_json: bool,
}
