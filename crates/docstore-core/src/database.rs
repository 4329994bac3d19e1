// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Database and container handles.
//!
//! A [`Database`] wraps a shared driver. [`Database::container`] hands out
//! cheap [`Container`] clones that generated accessors keep for their whole
//! lifetime. Handles are read-only: no operation mutates them.

use std::{fmt, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{DocumentStore, FeedPage, QueryIter, RequestOptions, SELECT_ALL, SqlQuery, StoreError};

/// Name and partition key path of one container.
///
/// Generated modules export a `CONTAINERS` table of these so callers can
/// provision stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerDefinition {
    /// Container name (equal to the model name).
    pub name: &'static str,

    /// Raw partition key path, e.g. `/user/id`.
    pub partition_key_path: &'static str
}

impl ContainerDefinition {
    /// Describe a container.
    pub const fn new(name: &'static str, partition_key_path: &'static str) -> Self {
        Self {
            name,
            partition_key_path
        }
    }
}

/// Handle to a database served by a driver.
#[derive(Clone)]
pub struct Database {
    name:  Arc<str>,
    store: Arc<dyn DocumentStore>
}

impl Database {
    /// Wrap a driver.
    pub fn new(name: impl Into<Arc<str>>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            name: name.into(),
            store
        }
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Container handle by name. Does not contact the store.
    pub fn container(&self, name: &str) -> Container {
        Container {
            name:  Arc::from(name),
            store: Arc::clone(&self.store)
        }
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Handle to one container.
#[derive(Clone)]
pub struct Container {
    name:  Arc<str>,
    store: Arc<dyn DocumentStore>
}

impl Container {
    /// Container name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point read. A missing item is `Ok(None)`; other errors pass through.
    pub async fn read_item(
        &self,
        id: &str,
        partition_key: &str,
        options: Option<&RequestOptions>
    ) -> Result<Option<Value>, StoreError> {
        trace!(container = %self.name, id, partition_key, "read item");
        match self
            .store
            .read_item(&self.name, id, partition_key, resolve(options))
            .await
        {
            Ok(resource) => Ok(Some(resource)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err)
        }
    }

    /// Insert a document. An absent, null or empty `id` is replaced with a
    /// fresh UUID before the driver sees the body.
    pub async fn create_item<B>(
        &self,
        body: &B,
        options: Option<&RequestOptions>
    ) -> Result<Value, StoreError>
    where
        B: Serialize + ?Sized
    {
        let mut body = serde_json::to_value(body)?;
        let id = assign_id(&mut body)?;
        debug!(container = %self.name, id, "create item");
        self.store
            .create_item(&self.name, body, resolve(options))
            .await
    }

    /// Overwrite the addressed document.
    pub async fn replace_item<B>(
        &self,
        id: &str,
        partition_key: &str,
        body: &B,
        options: Option<&RequestOptions>
    ) -> Result<Value, StoreError>
    where
        B: Serialize + ?Sized
    {
        let body = serde_json::to_value(body)?;
        debug!(container = %self.name, id, partition_key, "replace item");
        self.store
            .replace_item(&self.name, id, partition_key, body, resolve(options))
            .await
    }

    /// Remove the addressed document.
    pub async fn delete_item(
        &self,
        id: &str,
        partition_key: &str,
        options: Option<&RequestOptions>
    ) -> Result<(), StoreError> {
        debug!(container = %self.name, id, partition_key, "delete item");
        self.store
            .delete_item(&self.name, id, partition_key, resolve(options))
            .await
    }

    /// Lazy sequence over every document in the container.
    pub fn read_all<T: DeserializeOwned>(&self, options: Option<&RequestOptions>) -> QueryIter<T> {
        self.query(SqlQuery::new(SELECT_ALL), options)
    }

    /// Lazy sequence over a query. Nothing is sent until the first fetch.
    pub fn query<T: DeserializeOwned>(
        &self,
        query: SqlQuery,
        options: Option<&RequestOptions>
    ) -> QueryIter<T> {
        QueryIter::new(self.clone(), query, resolve(options).clone())
    }

    pub(crate) async fn query_page(
        &self,
        query: &SqlQuery,
        continuation: Option<&str>,
        options: &RequestOptions
    ) -> Result<FeedPage, StoreError> {
        trace!(container = %self.name, query = %query.text(), continuation, "query page");
        self.store
            .query_items(&self.name, query, continuation, options)
            .await
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container").field("name", &self.name).finish_non_exhaustive()
    }
}

fn resolve(options: Option<&RequestOptions>) -> &RequestOptions {
    options.unwrap_or(&RequestOptions::DEFAULT)
}

fn assign_id(body: &mut Value) -> Result<String, StoreError> {
    let Value::Object(fields) = body else {
        return Err(StoreError::BadRequest("document body must be a JSON object".into()));
    };

    match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            let id = uuid::Uuid::new_v4().to_string();
            fields.insert("id".into(), Value::String(id.clone()));
            Ok(id)
        }
        Some(other) => Err(StoreError::BadRequest(format!("document id must be a string, got {other}")))
    }
}
