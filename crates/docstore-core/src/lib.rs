// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime types for docstore-codegen generated modules.
//!
//! Generated accessors never talk to a store directly. They hold a
//! [`Container`] handle and call its point operations, which forward to a
//! [`DocumentStore`] driver.
//!
//! # Overview
//!
//! - [`DocumentStore`] — Driver trait (point read/create/replace/delete, query)
//! - [`Database`] / [`Container`] — Shared handles built once per client
//! - [`QueryIter`] — Lazy, restartable paged sequence
//! - [`SqlQuery`] / [`SqlParameter`] — Parameterized query text
//! - [`from_resource`] — Strips store metadata from a returned document
//! - [`MemoryStore`] — In-memory driver for tests and demos
//! - [`prelude`] — Convenient re-exports
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use docstore_core::{ContainerDefinition, Database, MemoryStore};
//!
//! const CONTAINERS: &[ContainerDefinition] = &[ContainerDefinition::new("post", "/user/id")];
//!
//! let store = MemoryStore::with_containers(CONTAINERS);
//! let database = Database::new("blog", Arc::new(store));
//! let posts = database.container("post");
//! assert_eq!(posts.name(), "post");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod database;
mod driver;
mod error;
pub mod memory;
mod options;
pub mod prelude;
mod query;
mod resource;

/// Re-export async_trait for driver implementations.
pub use async_trait::async_trait;
/// Untyped JSON document, as returned by free-form queries.
pub use serde_json::Value as JsonValue;

pub use self::{
    database::{Container, ContainerDefinition, Database},
    driver::{DocumentStore, FeedPage},
    error::StoreError,
    memory::MemoryStore,
    options::RequestOptions,
    query::{QueryIter, SELECT_ALL, SqlParameter, SqlQuery},
    resource::{METADATA_FIELDS, from_resource}
};
