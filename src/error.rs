// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! License retrieval errors.
//!
//! Every failure of [`LicenseAccessor::get_license`](crate::license::LicenseAccessor::get_license)
//! is one variant of [`LicenseError`], carrying structured context (status
//! code, license identifier, underlying cause) so callers can match on kind
//! instead of parsing messages.

use reqwest::StatusCode;

use crate::session::TokenError;
use crate::transport::TransportError;

/// Failure to build the license request from the given inputs.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The service domain is not a bare host (with optional port).
    #[error("invalid licensing domain {domain:?}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// The license identifier is empty or a dot segment (`.`, `..`).
    #[error("invalid license identifier {license_id:?}")]
    InvalidLicenseId { license_id: String },

    /// The access token cannot be carried in an `Authorization` header.
    #[error("access token is not a valid header value")]
    InvalidAccessToken(#[source] reqwest::header::InvalidHeaderValue),
}

/// Ways a response can break the `text/plain` contract of the license endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("response has no Content-Type header")]
    MissingContentType,

    #[error("Content-Type header is not visible ASCII")]
    UnreadableContentType,

    #[error("malformed Content-Type {value:?}: {source}")]
    MalformedContentType {
        value: String,
        #[source]
        source: mime::FromStrError,
    },

    #[error("response body is not text/plain: {media_type:?}")]
    UnexpectedMediaType { media_type: String },

    /// Status outside the 200/404/500 set the endpoint defines.
    #[error("unexpected status code")]
    UnexpectedStatus,
}

/// License retrieval error.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    /// No active login session.
    #[error("not logged in")]
    NotLoggedIn,

    /// The session's token source could not produce an access token.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The request could not be built from the inputs.
    #[error("failed to build license request: {0}")]
    RequestConstruction(#[from] RequestError),

    /// Network failure, including caller cancellation.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response shape violates the endpoint contract.
    #[error("http {}: {violation}", .status.as_u16())]
    Protocol {
        status: StatusCode,
        #[source]
        violation: ProtocolViolation,
    },

    /// The licensing service does not know the identifier.
    #[error("license JWT not found")]
    NotFound { status: StatusCode },

    /// The licensing service reported an internal failure.
    #[error("error getting license jwt for {license_id}: {body}")]
    Server { license_id: String, body: String },

    /// The licensing service answered 200 with no content.
    #[error("no licenses found for {license_id}")]
    EmptyLicense { license_id: String },
}

impl LicenseError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            LicenseError::NotLoggedIn => "not_logged_in",
            LicenseError::Token(_) => "token_error",
            LicenseError::RequestConstruction(_) => "request_construction_error",
            LicenseError::Transport(TransportError::Cancelled) => "cancelled",
            LicenseError::Transport(_) => "transport_error",
            LicenseError::Protocol { .. } => "protocol_error",
            LicenseError::NotFound { .. } => "license_not_found",
            LicenseError::Server { .. } => "server_error",
            LicenseError::EmptyLicense { .. } => "empty_license",
        }
    }

    /// Whether a caller may reasonably retry the same request.
    ///
    /// Nothing in this crate retries; this only classifies.
    pub fn is_retryable(&self) -> bool {
        match self {
            LicenseError::Transport(_) | LicenseError::Server { .. } => true,
            LicenseError::NotLoggedIn
            | LicenseError::Token(_)
            | LicenseError::RequestConstruction(_)
            | LicenseError::Protocol { .. }
            | LicenseError::NotFound { .. }
            | LicenseError::EmptyLicense { .. } => false,
        }
    }

    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            LicenseError::Protocol { status, .. } | LicenseError::NotFound { status } => {
                Some(*status)
            }
            LicenseError::Server { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            LicenseError::Transport(TransportError::Body { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
