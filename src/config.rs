//! Configuration for the SerCon core
//!
//! Hosts load a single YAML file plus `SERCON_`-prefixed environment
//! overrides. Every setting has a default, so a missing file yields a
//! usable configuration.
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`SERCON_LOGGING_LEVEL=debug`)
//! 2. Config file values
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ErrorExt, Result, SerConError};
use crate::errordb::FileTableSource;
use crate::logging::{self, LogLevel};
use crate::ports::{self, NameResolverKind, PortNameResolver};

/// Well-known configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "sercon.yaml";

/// Error-code table settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorDbSettings {
    /// Location of the error-code table document
    pub path: String,
}

impl Default for ErrorDbSettings {
    fn default() -> Self {
        Self {
            path: "errordb.yaml".to_string(),
        }
    }
}

/// Port name resolution settings
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PortSettings {
    /// Which name resolver the host wires in
    pub resolver: NameResolverKind,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log to console instead of files
    pub console: bool,
    /// Directory for tool and session logs
    pub dir: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            dir: "logs".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CoreConfig {
    /// Error-code table settings
    pub errordb: ErrorDbSettings,
    /// Port name resolution settings
    pub ports: PortSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl CoreConfig {
    /// Load configuration from a file plus environment overrides
    ///
    /// A missing file is not an error; defaults fill in anything the file
    /// and environment leave unset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: CoreConfig = Figment::new()
            .merge(Serialized::defaults(CoreConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SERCON_").split("_"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the well-known location
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.logging.level.parse::<LogLevel>()?;

        if self.errordb.path.trim().is_empty() {
            return Err(SerConError::config("errordb.path must not be empty"));
        }
        if self.logging.dir.trim().is_empty() {
            return Err(SerConError::config("logging.dir must not be empty"));
        }

        Ok(())
    }

    /// Save configuration to a YAML or JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SerConError::config("Config file must have an extension"))?;

        let content = match extension {
            "yaml" | "yml" => {
                serde_yaml::to_string(self).config_error("Failed to serialize config")?
            }
            "json" => {
                serde_json::to_string_pretty(self).config_error("Failed to serialize config")?
            }
            _ => {
                return Err(SerConError::config(format!(
                    "Unsupported config file format: {}",
                    extension
                )))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Name resolver selected by this configuration
    pub fn name_resolver(&self) -> Box<dyn PortNameResolver> {
        ports::resolver_for(self.ports.resolver)
    }

    /// File source for the configured error table location
    pub fn error_table(&self) -> FileTableSource {
        FileTableSource::new(self.errordb.path.as_str())
    }

    /// Initialize the global logger from the logging settings
    pub fn init_logging(&self, service_name: &str) -> Result<()> {
        logging::init_logger(
            &self.logging.dir,
            service_name,
            &self.logging.level,
            self.logging.console,
        )
    }
}
