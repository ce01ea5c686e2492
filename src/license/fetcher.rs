// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Remote license JWT fetching.
//!
//! One authenticated `GET https://{domain}/api/licenses/{id}/formats/jwt`
//! per call, translated into the raw JWT text or a [`LicenseError`].
//!
//! ## Response handling
//!
//! 1. `Content-Type` must parse as `text/plain` (parameters allowed). This is
//!    checked before the body is read, whatever the status.
//! 2. The body is read in full.
//! 3. 200 returns the body, 404 and 500 map to their own errors, and any
//!    other status is a protocol error.
//!
//! The response body is owned by the call and dropped on every exit path.

use mime::Mime;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::error::{LicenseError, ProtocolViolation, RequestError};
use crate::transport::{HttpTransport, TransportError, TransportResponse};

/// Media type of a license JWT response.
pub const LICENSE_MEDIA_TYPE: &str = "text/plain";

/// Fetches license JWTs over an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct LicenseFetcher<T> {
    transport: T,
    scheme: &'static str,
}

impl<T: HttpTransport> LicenseFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            scheme: "https",
        }
    }

    /// Talk plain HTTP (local test servers only).
    #[cfg(test)]
    pub(crate) fn with_plain_http(mut self) -> Self {
        self.scheme = "http";
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the JWT for `license_id` from the licensing service at `domain`.
    ///
    /// `cancel` bounds the network round trip only. An empty body on 200 is
    /// returned as an empty string.
    pub async fn fetch(
        &self,
        cancel: &CancellationToken,
        domain: &str,
        access_token: &str,
        license_id: &str,
    ) -> Result<String, LicenseError> {
        let url = license_url(self.scheme, domain, license_id)?;
        let headers = bearer_headers(access_token)?;

        debug!(domain = %domain, license_id = %license_id, "Requesting license JWT");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Cancelled.into()),
            result = self.transport.get(url, headers) => result?,
        };
        let TransportResponse {
            status,
            headers,
            body,
        } = response;

        if let Err(violation) = check_content_type(&headers) {
            warn!(
                license_id = %license_id,
                status = status.as_u16(),
                error = %violation,
                "License service response has wrong content type"
            );
            return Err(LicenseError::Protocol { status, violation });
        }

        let bytes = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Cancelled.into()),
            result = body.read_all() => result?,
        };
        let text = String::from_utf8_lossy(&bytes).into_owned();

        match status {
            StatusCode::OK => {
                debug!(license_id = %license_id, bytes = text.len(), "License JWT received");
                Ok(text)
            }
            StatusCode::NOT_FOUND => {
                debug!(license_id = %license_id, "License JWT not found");
                Err(LicenseError::NotFound { status })
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                warn!(license_id = %license_id, "License service reported an internal error");
                Err(LicenseError::Server {
                    license_id: license_id.to_string(),
                    body: text,
                })
            }
            _ => {
                warn!(
                    license_id = %license_id,
                    status = status.as_u16(),
                    "License service returned an unexpected status"
                );
                Err(LicenseError::Protocol {
                    status,
                    violation: ProtocolViolation::UnexpectedStatus,
                })
            }
        }
    }
}

/// Build `{scheme}://{domain}/api/licenses/{id}/formats/jwt`.
///
/// The identifier becomes one percent-encoded path segment.
fn license_url(scheme: &str, domain: &str, license_id: &str) -> Result<Url, RequestError> {
    if matches!(license_id, "" | "." | "..") {
        return Err(RequestError::InvalidLicenseId {
            license_id: license_id.to_string(),
        });
    }

    let invalid_domain = |source| RequestError::InvalidDomain {
        domain: domain.to_string(),
        source,
    };

    let mut url = Url::parse(&format!("{scheme}://{domain}")).map_err(|e| invalid_domain(Some(e)))?;
    let bare_host = url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none();
    if !bare_host {
        return Err(invalid_domain(None));
    }

    url.path_segments_mut()
        .map_err(|()| invalid_domain(None))?
        .clear()
        .extend(["api", "licenses", license_id, "formats", "jwt"]);
    Ok(url)
}

fn bearer_headers(access_token: &str) -> Result<HeaderMap, RequestError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(RequestError::InvalidAccessToken)?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Trim whitespace around each `;`-separated part and drop empty parameters.
///
/// `text/plain ; charset=utf-8` is valid HTTP but the `mime` parser rejects
/// the space before the separator.
fn normalize_media_type(value: &str) -> String {
    let mut parts = value.split(';').map(str::trim);
    let essence = parts.next().unwrap_or_default();
    std::iter::once(essence)
        .chain(parts.filter(|part| !part.is_empty()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ProtocolViolation> {
    let value = headers
        .get(CONTENT_TYPE)
        .ok_or(ProtocolViolation::MissingContentType)?
        .to_str()
        .map_err(|_| ProtocolViolation::UnreadableContentType)?;

    let media_type: Mime = normalize_media_type(value)
        .parse()
        .map_err(|source| ProtocolViolation::MalformedContentType {
            value: value.to_string(),
            source,
        })?;

    if media_type.essence_str().eq_ignore_ascii_case(LICENSE_MEDIA_TYPE) {
        Ok(())
    } else {
        Err(ProtocolViolation::UnexpectedMediaType {
            media_type: media_type.essence_str().to_string(),
        })
    }
}
