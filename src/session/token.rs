// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access tokens and the token source seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Failure reported by a [`TokenSource`].
///
/// Passed through to callers unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("access token expired")]
    Expired,

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Bearer credential for the licensing service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The raw token, as sent in the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// When the token stops being valid, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Provides the current access token of the active login.
///
/// Implementations may refresh internally; refresh failures are reported as
/// [`TokenError`].
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, TokenError>;
}

/// Token source that always hands out the same token.
///
/// Reports [`TokenError::Expired`] once the token's expiry has passed.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<AccessToken, TokenError> {
        match self.token.expires_at {
            Some(expires_at) if expires_at <= Utc::now() => Err(TokenError::Expired),
            _ => Ok(self.token.clone()),
        }
    }
}
