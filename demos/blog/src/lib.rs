// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Blog models with generated document accessors.
//!
//! `build.rs` runs the generator over `src/models` and the result is
//! included as [`documents`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use blog_demo::{CONTAINERS, client};
//! use docstore_core::{Database, MemoryStore};
//!
//! let database = Database::new("blog", Arc::new(MemoryStore::with_containers(CONTAINERS)));
//! let documents = client(&database);
//! assert_eq!(documents.comment.container().name(), "comment");
//! ```

pub mod models;

/// Generated accessors.
pub mod documents {
    include!(concat!(env!("OUT_DIR"), "/documents.rs"));
}

pub use documents::{CONTAINERS, Client, Documents, client};
