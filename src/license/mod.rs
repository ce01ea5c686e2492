// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # License Retrieval
//!
//! ## Flow
//!
//! 1. Caller asks [`LicenseAccessor::get_license`] for a license ID
//! 2. The accessor locks the [`Session`](crate::session::Session), checks
//!    that a login is active and reads the current access token
//! 3. [`LicenseFetcher::fetch`] performs
//!    `GET https://{domain}/api/licenses/{id}/formats/jwt` with
//!    `Authorization: Bearer <token>`
//! 4. The `text/plain` body is returned as the license JWT
//!
//! The JWT is opaque here: it is neither parsed, verified, cached nor
//! logged. Every call fetches a fresh one.

pub mod accessor;
pub mod fetcher;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::LicenseAccessor;
pub use fetcher::{LicenseFetcher, LICENSE_MEDIA_TYPE};
