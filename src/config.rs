// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults and the [`ClientConfig`] loaded from
//! them.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `LOGIN_DOMAIN` | Domain of the login and licensing service | Required |
//! | `LICENSE_REQUEST_TIMEOUT_SECS` | Timeout for one license request | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//!
//! Empty or whitespace-only values count as unset.

use std::time::Duration;

use crate::session::Env;
use crate::transport::http::DEFAULT_REQUEST_TIMEOUT;

/// Environment variable name for the licensing service domain.
pub const LOGIN_DOMAIN_ENV: &str = "LOGIN_DOMAIN";

/// Environment variable name for the request timeout, in whole seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "LICENSE_REQUEST_TIMEOUT_SECS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration missing: {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub login_domain: String,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let login_domain = get(LOGIN_DOMAIN_ENV).ok_or(ConfigError::Missing(LOGIN_DOMAIN_ENV))?;

        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: REQUEST_TIMEOUT_ENV,
                    value: raw,
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw).ok_or(ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            login_domain,
            request_timeout,
            log_format,
        })
    }

    pub fn env(&self) -> Env {
        Env::new(self.login_domain.clone())
    }
}
