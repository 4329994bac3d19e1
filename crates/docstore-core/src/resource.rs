// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Store metadata stripping.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::StoreError;

/// Bookkeeping fields a store adds to every document.
pub const METADATA_FIELDS: &[&str] = &["_rid", "_self", "_etag", "_ts", "_attachments"];

/// Remove store metadata from a document and decode it as `T`.
///
/// Non-object documents are decoded as-is.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] when the remaining fields do not
/// match `T`.
///
/// # Example
///
/// ```rust
/// use docstore_core::{JsonValue, from_resource};
/// use serde_json::json;
///
/// let stored = json!({ "id": "u1", "_etag": "\"1\"", "_ts": 17 });
/// let plain: JsonValue = from_resource(stored).unwrap();
/// assert_eq!(plain, json!({ "id": "u1" }));
/// ```
pub fn from_resource<T: DeserializeOwned>(mut resource: Value) -> Result<T, StoreError> {
    if let Value::Object(fields) = &mut resource {
        for field in METADATA_FIELDS {
            fields.remove(*field);
        }
    }
    Ok(serde_json::from_value(resource)?)
}
