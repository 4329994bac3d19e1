// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document store driver interface.
//!
//! The driver is the only component that performs I/O. Every point
//! operation is addressed by `(container, id, partition_key)`; create and
//! query are scoped to a container.
//!
//! | Method | Addressing | Not found |
//! |--------|------------|-----------|
//! | [`read_item`](DocumentStore::read_item) | id + partition key | `Err(NotFound)` |
//! | [`create_item`](DocumentStore::create_item) | container | — |
//! | [`replace_item`](DocumentStore::replace_item) | id + partition key | `Err(NotFound)` |
//! | [`delete_item`](DocumentStore::delete_item) | id + partition key | `Err(NotFound)` |
//! | [`query_items`](DocumentStore::query_items) | container (cross-partition) | empty page |

use async_trait::async_trait;
use serde_json::Value;

use crate::{RequestOptions, SqlQuery, StoreError};

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    /// Raw documents, metadata included.
    pub items: Vec<Value>,

    /// Token to fetch the next page, `None` on the last page.
    pub continuation: Option<String>
}

/// Primitive operations a document store must provide.
///
/// Documents cross this boundary as raw JSON including store metadata;
/// [`Container`](crate::Container) handles typing and stripping.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read.
    async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        options: &RequestOptions
    ) -> Result<Value, StoreError>;

    /// Insert a new document. The body already carries its id.
    async fn create_item(
        &self,
        container: &str,
        body: Value,
        options: &RequestOptions
    ) -> Result<Value, StoreError>;

    /// Overwrite an existing document.
    async fn replace_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        body: Value,
        options: &RequestOptions
    ) -> Result<Value, StoreError>;

    /// Remove a document.
    async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        options: &RequestOptions
    ) -> Result<(), StoreError>;

    /// Fetch one page of a query, starting at `continuation`.
    async fn query_items(
        &self,
        container: &str,
        query: &SqlQuery,
        continuation: Option<&str>,
        options: &RequestOptions
    ) -> Result<FeedPage, StoreError>;
}
