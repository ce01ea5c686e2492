// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational License Client
//!
//! Retrieves signed license credentials (JWTs) from the licensing service on
//! behalf of the connector's logged-in user.
//!
//! ## Modules
//!
//! - `license` - Session-gated license JWT retrieval
//! - `session` - Login session, access tokens, environment
//! - `transport` - HTTP transport seam (reqwest)
//! - `models` - License metadata
//! - `config` - Environment configuration

pub mod config;
pub mod error;
pub mod license;
pub mod logging;
pub mod models;
pub mod session;
pub mod transport;

pub use error::{LicenseError, ProtocolViolation, RequestError};
pub use license::{LicenseAccessor, LicenseFetcher};
pub use models::LicenseInfo;
pub use session::{AccessToken, Env, Session, StaticTokenSource, TokenError, TokenSource};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
