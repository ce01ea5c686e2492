// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! reqwest-backed [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use super::{HttpTransport, ResponseBody, TransportError, TransportResponse};

/// Default request timeout (10 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTPS transport over a shared reqwest client (rustls).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default request timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(TransportError::Request)?;

        Ok(TransportResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: Box::new(ReqwestBody { response }),
        })
    }
}

struct ReqwestBody {
    response: reqwest::Response,
}

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError> {
        let status = self.response.status();
        self.response
            .bytes()
            .await
            .map_err(|e| TransportError::Body {
                status,
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::HeaderMap as AxumHeaders;
    use axum::routing::get;
    use axum::Router;
    use reqwest::header::HeaderValue;
    use reqwest::StatusCode;

    async fn echo_auth(headers: AxumHeaders) -> String {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none")
            .to_string()
    }

    async fn serve(app: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn get_forwards_headers_and_returns_body() {
        let addr = serve(Router::new().route("/echo", get(echo_auth))).await;
        let transport = ReqwestTransport::new().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let url = Url::parse(&format!("http://{addr}/echo")).unwrap();

        let response = transport.get(url, headers).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(response
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("text/plain"));

        let body = response.body.read_all().await.unwrap();
        assert_eq!(&body[..], b"Bearer abc");
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new().unwrap();
        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = transport.get(url, HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[tokio::test]
    async fn timeout_is_request_error() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let addr = serve(app).await;

        let transport = ReqwestTransport::with_timeout(Duration::from_millis(100)).unwrap();
        let url = Url::parse(&format!("http://{addr}/slow")).unwrap();
        let err = transport.get(url, HeaderMap::new()).await.unwrap_err();
        match err {
            TransportError::Request(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
