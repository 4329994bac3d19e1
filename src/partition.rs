// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Partition key derivation.
//!
//! Turns a raw path such as `/user/id` into the facts every generator needs:
//!
//! | Raw path | `chain` | `param_name` | `is_identity` |
//! |----------|---------|--------------|---------------|
//! | `/user/id` | `["user", "id"]` | `userId` | `false` |
//! | `/post/id` | `["post", "id"]` | `postId` | `false` |
//! | `/id` | `["id"]` | `id` | `true` |
//!
//! The derivation is purely syntactic. It knows nothing about the model's
//! field types, and the same input always yields the same output.

use thiserror::Error;

use crate::utils::naming::{capitalize, is_identifier, snake_case};

/// Malformed partition key path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionKeyError {
    /// The path has no segments (`""`, `"/"`, `"//"`).
    #[error("partition key path has no segments")]
    Empty,

    /// A segment cannot be used as a field name.
    #[error("partition key segment `{0}` is not an identifier")]
    InvalidSegment(String)
}

/// Derived partition key facts for one model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKeyInfo {
    /// Field path segments, e.g. `["user", "id"]`.
    pub chain: Vec<String>,

    /// camelCase join of the chain, e.g. `userId`.
    pub param_name: String,

    /// Whether the partition key is the item id itself.
    pub is_identity: bool
}

impl PartitionKeyInfo {
    /// Derive from a raw `/segment(/segment)*` path.
    ///
    /// Empty segments are dropped, so a leading or doubled slash is accepted.
    ///
    /// # Errors
    ///
    /// [`PartitionKeyError::Empty`] when nothing remains after splitting,
    /// [`PartitionKeyError::InvalidSegment`] when a segment is not an
    /// identifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use docstore_codegen::PartitionKeyInfo;
    ///
    /// let key = PartitionKeyInfo::derive("/user/id").unwrap();
    /// assert_eq!(key.chain, ["user", "id"]);
    /// assert_eq!(key.param_name, "userId");
    /// assert!(!key.is_identity);
    /// ```
    pub fn derive(raw_path: &str) -> Result<Self, PartitionKeyError> {
        let chain: Vec<String> = raw_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        if chain.is_empty() {
            return Err(PartitionKeyError::Empty);
        }
        if let Some(segment) = chain.iter().find(|segment| !is_identifier(segment)) {
            return Err(PartitionKeyError::InvalidSegment(segment.clone()));
        }

        let param_name: String = chain
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                if index == 0 {
                    segment.clone()
                } else {
                    capitalize(segment)
                }
            })
            .collect();
        let is_identity = param_name == "id";

        Ok(Self {
            chain,
            param_name,
            is_identity
        })
    }

    /// Dotted predicate path rooted at the query alias, e.g. `c.user.id`.
    pub fn field_path(&self) -> String {
        format!("c.{}", self.chain.join("."))
    }

    /// Query parameter name, e.g. `@userId`.
    pub fn query_parameter(&self) -> String {
        format!("@{}", self.param_name)
    }

    /// snake_case form of [`param_name`](Self::param_name), e.g. `user_id`.
    pub fn snake_name(&self) -> String {
        snake_case(&self.param_name)
    }

    /// Canonical raw path, e.g. `/user/id`.
    pub fn path(&self) -> String {
        format!("/{}", self.chain.join("/"))
    }
}
