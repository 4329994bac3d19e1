// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory [`DocumentStore`] for tests and demos.
//!
//! Behaves like a partitioned document store at the level generated code can
//! observe:
//!
//! | Behavior | Result |
//! |----------|--------|
//! | Unknown container | [`StoreError::ContainerNotFound`] |
//! | Create with an existing `(partition, id)` | [`StoreError::Conflict`] |
//! | Read/replace/delete of a missing item | [`StoreError::NotFound`] |
//! | `if_match_etag` mismatch | [`StoreError::PreconditionFailed`] |
//! | Body partition key differs from the address | [`StoreError::BadRequest`] |
//! | Query | cross-partition, paged by `max_item_count` |
//!
//! Stored documents carry `_rid`, `_self`, `_etag` and `_ts`.

mod filter;

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH}
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use self::filter::Filter;
use crate::{ContainerDefinition, DocumentStore, FeedPage, RequestOptions, SqlQuery, StoreError};

/// Page size when a query sets no `max_item_count`.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Default)]
struct MemoryContainer {
    partition_key: Vec<String>,
    items:         BTreeMap<(String, String), Value>
}

/// Partitioned document store kept in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    containers: RwLock<BTreeMap<String, MemoryContainer>>,
    page_size:  usize,
    sequence:   AtomicU64
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store without containers.
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(BTreeMap::new()),
            page_size:  DEFAULT_PAGE_SIZE,
            sequence:   AtomicU64::new(0)
        }
    }

    /// Store with every listed container provisioned.
    pub fn with_containers(definitions: &[ContainerDefinition]) -> Self {
        definitions.iter().fold(Self::new(), |store, definition| {
            store.with_container(definition.name, definition.partition_key_path)
        })
    }

    /// Provision one container.
    pub fn with_container(mut self, name: &str, partition_key_path: &str) -> Self {
        self.containers
            .get_mut()
            .insert(name.to_owned(), MemoryContainer::new(partition_key_path));
        self
    }

    /// Override the default query page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Provision a container at runtime. Existing containers are kept.
    pub async fn create_container_if_not_exists(&self, name: &str, partition_key_path: &str) {
        self.containers
            .write()
            .await
            .entry(name.to_owned())
            .or_insert_with(|| MemoryContainer::new(partition_key_path));
    }

    /// Number of documents in a container.
    pub async fn len(&self, container: &str) -> Result<usize, StoreError> {
        let containers = self.containers.read().await;
        Ok(lookup(&containers, container)?.items.len())
    }

    fn stamp(&self, container: &str, id: &str, document: &mut Value) {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();

        if let Value::Object(fields) = document {
            fields.insert("_rid".into(), Value::String(format!("{sequence:016x}")));
            fields.insert(
                "_self".into(),
                Value::String(format!("colls/{container}/docs/{id}"))
            );
            fields.insert(
                "_etag".into(),
                Value::String(format!("\"{}\"", uuid::Uuid::new_v4()))
            );
            fields.insert("_ts".into(), Value::from(timestamp));
        }
    }
}

impl MemoryContainer {
    fn new(partition_key_path: &str) -> Self {
        Self {
            partition_key: partition_key_path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
            items:         BTreeMap::new()
        }
    }

    fn partition_of(&self, document: &Value) -> Result<String, StoreError> {
        let value = self
            .partition_key
            .iter()
            .try_fold(document, |value, segment| value.get(segment));

        match value {
            Some(Value::String(key)) => Ok(key.clone()),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
            _ => Err(StoreError::BadRequest(format!(
                "document is missing partition key /{}",
                self.partition_key.join("/")
            )))
        }
    }

    fn existing(&self, name: &str, id: &str, partition_key: &str) -> Result<&Value, StoreError> {
        self.items
            .get(&(partition_key.to_owned(), id.to_owned()))
            .ok_or_else(|| StoreError::not_found(name, id))
    }
}

fn lookup<'a>(
    containers: &'a BTreeMap<String, MemoryContainer>,
    name: &str
) -> Result<&'a MemoryContainer, StoreError> {
    containers
        .get(name)
        .ok_or_else(|| StoreError::ContainerNotFound(name.to_owned()))
}

fn lookup_mut<'a>(
    containers: &'a mut BTreeMap<String, MemoryContainer>,
    name: &str
) -> Result<&'a mut MemoryContainer, StoreError> {
    containers
        .get_mut(name)
        .ok_or_else(|| StoreError::ContainerNotFound(name.to_owned()))
}

fn check_etag(
    name: &str,
    id: &str,
    stored: &Value,
    options: &RequestOptions
) -> Result<(), StoreError> {
    match &options.if_match_etag {
        Some(expected) if stored.get("_etag").and_then(Value::as_str) != Some(expected.as_str()) => {
            Err(StoreError::PreconditionFailed {
                container: name.to_owned(),
                id:        id.to_owned()
            })
        }
        _ => Ok(())
    }
}

fn document_id(document: &Value) -> Result<String, StoreError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| StoreError::BadRequest("document id must be a non-empty string".into()))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        _options: &RequestOptions
    ) -> Result<Value, StoreError> {
        let containers = self.containers.read().await;
        lookup(&containers, container)?
            .existing(container, id, partition_key)
            .cloned()
    }

    async fn create_item(
        &self,
        container: &str,
        mut body: Value,
        _options: &RequestOptions
    ) -> Result<Value, StoreError> {
        let id = document_id(&body)?;
        let mut containers = self.containers.write().await;
        let target = lookup_mut(&mut containers, container)?;
        let partition_key = target.partition_of(&body)?;
        let key = (partition_key, id.clone());

        if target.items.contains_key(&key) {
            return Err(StoreError::Conflict {
                container: container.to_owned(),
                id
            });
        }

        self.stamp(container, &id, &mut body);
        debug!(container, id = %id, partition_key = %key.0, "memory store create");
        target.items.insert(key, body.clone());
        Ok(body)
    }

    async fn replace_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        mut body: Value,
        options: &RequestOptions
    ) -> Result<Value, StoreError> {
        if document_id(&body)? != id {
            return Err(StoreError::BadRequest(format!(
                "replacement body id does not match `{id}`"
            )));
        }

        let mut containers = self.containers.write().await;
        let target = lookup_mut(&mut containers, container)?;
        let stored = target.existing(container, id, partition_key)?;
        check_etag(container, id, stored, options)?;

        if target.partition_of(&body)? != partition_key {
            return Err(StoreError::BadRequest(format!(
                "replacement body partition key does not match `{partition_key}`"
            )));
        }

        self.stamp(container, id, &mut body);
        target
            .items
            .insert((partition_key.to_owned(), id.to_owned()), body.clone());
        Ok(body)
    }

    async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
        options: &RequestOptions
    ) -> Result<(), StoreError> {
        let mut containers = self.containers.write().await;
        let target = lookup_mut(&mut containers, container)?;
        let stored = target.existing(container, id, partition_key)?;
        check_etag(container, id, stored, options)?;
        target
            .items
            .remove(&(partition_key.to_owned(), id.to_owned()));
        Ok(())
    }

    async fn query_items(
        &self,
        container: &str,
        query: &SqlQuery,
        continuation: Option<&str>,
        options: &RequestOptions
    ) -> Result<FeedPage, StoreError> {
        if let Some(parameter) = query
            .parameters()
            .iter()
            .find(|parameter| !parameter.name.starts_with('@'))
        {
            return Err(StoreError::BadRequest(format!(
                "parameter name `{}` must start with `@`",
                parameter.name
            )));
        }

        let filter = Filter::parse(query.text())?;
        let offset = match continuation {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::BadRequest(format!("invalid continuation `{token}`")))?
        };
        let page_size = options.max_item_count.unwrap_or(self.page_size).max(1);

        let containers = self.containers.read().await;
        let mut matching = Vec::new();
        for document in lookup(&containers, container)?.items.values() {
            if filter.matches(document, query)? {
                matching.push(document);
            }
        }

        let end = offset.saturating_add(page_size).min(matching.len());
        let items = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|document| (*document).clone())
            .collect();

        Ok(FeedPage {
            items,
            continuation: (end < matching.len()).then(|| end.to_string())
        })
    }
}
