// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session-gated license retrieval.
//!
//! [`LicenseAccessor::get_license`] holds the session lock for the whole
//! call, token lookup and network round trip included. Concurrent calls,
//! and login/logout, are therefore fully serialized against each other.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::LicenseError;
use crate::session::Session;
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

use super::fetcher::LicenseFetcher;

/// Fetches license JWTs for the logged-in session.
#[derive(Debug, Clone)]
pub struct LicenseAccessor<T = ReqwestTransport> {
    session: Session,
    fetcher: LicenseFetcher<T>,
}

impl LicenseAccessor<ReqwestTransport> {
    /// Accessor over a default HTTPS transport.
    pub fn with_default_transport(session: Session) -> Result<Self, TransportError> {
        Ok(Self::new(session, LicenseFetcher::new(ReqwestTransport::new()?)))
    }
}

impl<T: HttpTransport> LicenseAccessor<T> {
    pub fn new(session: Session, fetcher: LicenseFetcher<T>) -> Self {
        Self { session, fetcher }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn fetcher(&self) -> &LicenseFetcher<T> {
        &self.fetcher
    }

    /// Fetch the license JWT for `license_id` using the session's access token.
    ///
    /// `cancel` bounds the HTTP round trip only; waiting for the session lock
    /// and the token lookup are not interrupted by it.
    ///
    /// # Errors
    ///
    /// - [`LicenseError::NotLoggedIn`] if the session has no token source
    /// - [`LicenseError::Token`] if the token source fails
    /// - [`LicenseError::EmptyLicense`] if the service returned an empty JWT
    /// - any error of [`LicenseFetcher::fetch`]
    pub async fn get_license(
        &self,
        cancel: &CancellationToken,
        license_id: &str,
    ) -> Result<String, LicenseError> {
        let state = self.session.lock().await;

        let Some(token_source) = state.token_source() else {
            debug!(license_id = %license_id, "License requested without an active login");
            return Err(LicenseError::NotLoggedIn);
        };

        let token = token_source.access_token().await.map_err(|e| {
            warn!(error = %e, "Token source failed to provide an access token");
            LicenseError::from(e)
        })?;

        let license = self
            .fetcher
            .fetch(cancel, &state.env().login_domain, token.secret(), license_id)
            .await?;

        if license.is_empty() {
            return Err(LicenseError::EmptyLicense {
                license_id: license_id.to_string(),
            });
        }

        Ok(license)
    }
}
