// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Client configuration.
//!
//! Supports both programmatic and file-based configuration. The value is
//! passed explicitly to the client and the request builder; nothing in the
//! crate reads configuration from global state.
//!
//! ```toml
//! site_id = 77
//! sandbox = true
//! wsdl_path = "wsdl/trading/ebay_trading_v777.wsdl"
//!
//! [credentials]
//! app_id = "my-app-id"
//! dev_id = "my-dev-id"
//! cert_id = "my-cert-id"
//! auth_token = "AgAAAA..."
//! ```

use crate::dynamic::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Developer credentials sent in the request header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application id from the developer program.
    #[serde(default)]
    pub app_id: String,

    /// Developer id.
    #[serde(default)]
    pub dev_id: String,

    /// Certificate id.
    #[serde(default)]
    pub cert_id: String,

    /// User auth token.
    #[serde(default)]
    pub auth_token: String,
}

/// Trading client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Site the calls are routed to (77 = Germany).
    #[serde(default = "default_site_id")]
    pub site_id: u32,

    /// Route calls to the sandbox environment.
    #[serde(default = "default_true")]
    pub sandbox: bool,

    /// WSDL document describing the service.
    #[serde(default)]
    pub wsdl_path: Option<PathBuf>,

    /// Nesting limit for response materialization.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Developer credentials.
    #[serde(default)]
    pub credentials: Credentials,
}

fn default_site_id() -> u32 {
    77
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            sandbox: true,
            wsdl_path: None,
            max_depth: DEFAULT_MAX_DEPTH,
            credentials: Credentials::default(),
        }
    }
}

impl TradingConfig {
    /// Load configuration from a TOML file.
    ///
    /// A relative `wsdl_path` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if let Some(dir) = path.parent() {
            config.wsdl_path = config.wsdl_path.take().map(|wsdl| {
                if wsdl.is_relative() {
                    dir.join(wsdl)
                } else {
                    wsdl
                }
            });
        }
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Production configuration for `site_id`.
    pub fn production(site_id: u32, credentials: Credentials) -> Self {
        Self {
            site_id,
            sandbox: false,
            credentials,
            ..Default::default()
        }
    }

    /// Set the WSDL path.
    #[must_use]
    pub fn with_wsdl_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.wsdl_path = Some(path.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self
            .wsdl_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("wsdl_path is empty".into()));
        }
        if !self.sandbox && self.credentials.auth_token.is_empty() {
            return Err(ConfigError::Invalid(
                "production routing requires an auth_token".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TradingConfig::from_toml("").expect("empty config");
        assert_eq!(config.site_id, 77);
        assert!(config.sandbox);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.wsdl_path.is_none());
        assert_eq!(config, TradingConfig::default());
    }

    #[test]
    fn test_from_file_resolves_wsdl_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("trading.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(
            file,
            r#"
site_id = 0
sandbox = false
wsdl_path = "ebay_trading_v777.wsdl"

[credentials]
app_id = "app"
dev_id = "dev"
cert_id = "cert"
auth_token = "token"
"#
        )
        .expect("write");

        let config = TradingConfig::from_file(&path).expect("load");
        assert_eq!(config.site_id, 0);
        assert!(!config.sandbox);
        assert_eq!(config.credentials.app_id, "app");
        assert_eq!(
            config.wsdl_path,
            Some(dir.path().join("ebay_trading_v777.wsdl"))
        );
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            TradingConfig::from_toml("max_depth = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TradingConfig::from_toml("sandbox = false"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TradingConfig::from_toml("site_id = \"seventy-seven\""),
            Err(ConfigError::Toml(_))
        ));

        let creds = Credentials {
            auth_token: "token".into(),
            ..Default::default()
        };
        let production = TradingConfig::production(0, creds);
        assert!(production.validate().is_ok());
        assert!(matches!(
            production.clone().with_wsdl_path("").validate(),
            Err(ConfigError::Invalid(_))
        ));

        let with_wsdl = production.with_wsdl_path("ebay_trading_v777.wsdl");
        assert_eq!(with_wsdl.wsdl_path, Some(PathBuf::from("ebay_trading_v777.wsdl")));
        assert!(with_wsdl.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TradingConfig::from_file("/nonexistent/trading.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
