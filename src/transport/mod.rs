// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # HTTP Transport
//!
//! The license fetcher talks HTTP through the [`HttpTransport`] trait so the
//! network stack can be swapped (tests use in-process doubles).
//!
//! A [`TransportResponse`] owns its body. Dropping the response, or the body
//! after [`ResponseBody::read_all`], releases the underlying connection, so a
//! caller that returns early on any branch never leaks it.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

pub use http::ReqwestTransport;

/// Network-layer failure.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The body stream broke after the status line arrived.
    #[error("http {}: failed to read response body: {source}", .status.as_u16())]
    Body {
        status: StatusCode,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Readable response body.
#[async_trait]
pub trait ResponseBody: Send {
    /// Read the remaining body to the end, consuming (and releasing) it.
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError>;
}

/// Status, headers and body of an HTTP response.
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Box<dyn ResponseBody>,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Executes GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<TransportResponse, TransportError>;
}
