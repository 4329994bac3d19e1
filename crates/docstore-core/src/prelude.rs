// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use docstore_core::prelude::*;
//! ```

pub use crate::{
    Container, ContainerDefinition, Database, DocumentStore, FeedPage, JsonValue, MemoryStore,
    QueryIter, RequestOptions, SqlParameter, SqlQuery, StoreError, async_trait, from_resource
};
