// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Store error type shared by drivers and generated accessors.

use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Drivers report failures with these variants and generated accessors pass
/// them through unchanged. The only variant an accessor builds on its own is
/// [`StoreError::NotFound`] from `read_or_err`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item with this id exists under the addressed partition.
    #[error("{container} with id: {id} not found.")]
    NotFound {
        /// Container (model) name.
        container: String,
        /// Requested item id.
        id:        String
    },

    /// An item with this id already exists in the partition.
    #[error("{container} with id: {id} already exists.")]
    Conflict {
        /// Container (model) name.
        container: String,
        /// Conflicting item id.
        id:        String
    },

    /// The `if_match_etag` option did not match the stored item.
    #[error("{container} with id: {id} was modified concurrently (etag mismatch).")]
    PreconditionFailed {
        /// Container (model) name.
        container: String,
        /// Addressed item id.
        id:        String
    },

    /// The container was never provisioned in the store.
    #[error("container `{0}` does not exist")]
    ContainerNotFound(String),

    /// The request was rejected before touching any item.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A document could not be converted to or from JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Opaque failure reported by an external driver.
    #[error("store driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>)
}

impl StoreError {
    /// Build a [`StoreError::NotFound`] for a container and id.
    pub fn not_found(container: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            container: container.into(),
            id:        id.into()
        }
    }

    /// Check if this error reports a missing item.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
