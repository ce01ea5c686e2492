// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scripted transport for license tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::transport::{HttpTransport, ResponseBody, TransportError, TransportResponse};

#[derive(Clone)]
enum BodyOutcome {
    Data(Bytes),
    Broken,
    Stall,
}

#[derive(Clone)]
enum Reply {
    Respond {
        status: StatusCode,
        content_type: Option<&'static str>,
        body: BodyOutcome,
    },
    Refuse,
    Hang,
}

/// Body that counts how many times it is released.
struct CountingBody {
    status: StatusCode,
    outcome: BodyOutcome,
    released: Arc<AtomicUsize>,
}

impl Drop for CountingBody {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResponseBody for CountingBody {
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError> {
        match &self.outcome {
            BodyOutcome::Data(bytes) => Ok(bytes.clone()),
            BodyOutcome::Broken => Err(TransportError::Body {
                status: self.status,
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                )),
            }),
            BodyOutcome::Stall => std::future::pending().await,
        }
    }
}

/// Transport that answers every GET with one scripted reply.
pub(crate) struct StubTransport {
    reply: Reply,
    calls: AtomicUsize,
    released: Arc<AtomicUsize>,
    requests: Mutex<Vec<(Url, HeaderMap)>>,
}

impl StubTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(
        status: StatusCode,
        content_type: Option<&'static str>,
        body: &str,
    ) -> Self {
        Self::with_reply(Reply::Respond {
            status,
            content_type,
            body: BodyOutcome::Data(Bytes::from(body.to_string())),
        })
    }

    pub(crate) fn text(status: StatusCode, body: &str) -> Self {
        Self::respond(status, Some("text/plain; charset=utf-8"), body)
    }

    pub(crate) fn broken_body(status: StatusCode) -> Self {
        Self::with_reply(Reply::Respond {
            status,
            content_type: Some("text/plain"),
            body: BodyOutcome::Broken,
        })
    }

    pub(crate) fn stalled_body() -> Self {
        Self::with_reply(Reply::Respond {
            status: StatusCode::OK,
            content_type: Some("text/plain"),
            body: BodyOutcome::Stall,
        })
    }

    pub(crate) fn refused() -> Self {
        Self::with_reply(Reply::Refuse)
    }

    pub(crate) fn hanging() -> Self {
        Self::with_reply(Reply::Hang)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<(Url, HeaderMap)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((url, headers));

        match self.reply.clone() {
            Reply::Respond {
                status,
                content_type,
                body,
            } => {
                let mut headers = HeaderMap::new();
                if let Some(content_type) = content_type {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
                }
                Ok(TransportResponse {
                    status,
                    headers,
                    body: Box::new(CountingBody {
                        status,
                        outcome: body,
                        released: self.released.clone(),
                    }),
                })
            }
            Reply::Refuse => Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Reply::Hang => std::future::pending().await,
        }
    }
}
