// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # License Data Models
//!
//! Descriptive license metadata as published by the licensing service.
//! Nothing in this crate produces a [`LicenseInfo`]; it is a pass-through
//! shape for code that consumes license listings. No invariants are
//! enforced on it.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// License Metadata
// =============================================================================

/// License metadata.
///
/// Field names follow the licensing service's JSON (`expirationDate`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    /// License ID, used to request the license JWT
    pub id: String,

    /// What the license is meant to be used for
    #[serde(default)]
    pub description: String,

    /// Cluster IDs this license can be used with
    #[serde(default)]
    pub audiences: BTreeSet<String>,

    /// When the license expires
    pub expiration_date: DateTime<Utc>,

    /// Limits bound to the license (limit name -> value)
    #[serde(default)]
    pub limits: HashMap<String, serde_json::Value>,
}

impl LicenseInfo {
    /// Whether `cluster_id` is one of the license audiences.
    pub fn allows_cluster(&self, cluster_id: &str) -> bool {
        self.audiences.contains(cluster_id)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date <= now
    }

    pub fn limit(&self, name: &str) -> Option<&serde_json::Value> {
        self.limits.get(name)
    }
}
