// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation context for one model accessor.
//!
//! Contains the [`Context`] struct that precomputes the identifiers and
//! literals every method generator needs.

use proc_macro2::Ident;
use quote::format_ident;

use crate::{
    operations::{OperationSet, read_all_by_key_query},
    utils::naming::is_rust_ident
};

/// Context for one `<Type>Operations` accessor.
///
/// # Fields
///
/// | Field | Example (`comment`, `/post/id`) |
/// |-------|---------------------------------|
/// | `field` | `comment` |
/// | `entity` | `Comment` |
/// | `accessor` | `CommentOperations` |
/// | `container` | `"comment"` |
/// | `partition_key_path` | `"/post/id"` |
/// | `key_param` | `post_id` |
/// | `by_key_method` | `read_all_by_post_id` |
/// | `by_key_query` | `"SELECT * FROM c WHERE c.post.id = @postId"` |
/// | `by_key_parameter` | `"@postId"` |
pub struct Context<'a> {
    /// Abstract operation set.
    pub set: &'a OperationSet,

    /// Client field and model module name.
    pub field: Ident,

    /// Model record type.
    pub entity: Ident,

    /// Accessor struct name.
    pub accessor: Ident,

    /// Container name literal.
    pub container: &'a str,

    /// Canonical partition key path literal.
    pub partition_key_path: String,

    /// Whether the key is the id itself.
    pub is_identity: bool,

    /// Partition key argument name (`id` for identity keys).
    pub key_param: Ident,

    /// `read_all_by_<key>` method name.
    pub by_key_method: Ident,

    /// Query text bound by `read_all_by_<key>`.
    pub by_key_query: String,

    /// Parameter name used in [`by_key_query`](Self::by_key_query).
    pub by_key_parameter: String
}

impl<'a> Context<'a> {
    /// Precompute everything for `set`.
    pub fn new(set: &'a OperationSet) -> Self {
        let key = &set.partition_key;
        let key_name = key.snake_name();
        let key_param = if key.is_identity {
            format_ident!("id")
        } else {
            param_ident(&key_name)
        };
        let (by_key_query, by_key_parameter) = read_all_by_key_query(key);

        Self {
            set,
            field: format_ident!("{}", set.model.name),
            entity: format_ident!("{}", set.model.type_name),
            accessor: format_ident!("{}Operations", set.model.type_name),
            container: &set.container,
            partition_key_path: key.path(),
            is_identity: key.is_identity,
            key_param,
            by_key_method: format_ident!("read_all_by_{}", key_name),
            by_key_query,
            by_key_parameter
        }
    }
}

/// Argument identifier for a snake_case name.
///
/// Keywords become raw identifiers; the few that cannot be raw get a
/// trailing underscore.
///
/// | Name | Ident |
/// |------|-------|
/// | `post_id` | `post_id` |
/// | `type` | `r#type` |
/// | `self` | `self_` |
pub fn param_ident(name: &str) -> Ident {
    if is_rust_ident(name) {
        format_ident!("{}", name)
    } else if matches!(name, "self" | "Self" | "super" | "crate" | "_") {
        format_ident!("{}_", name)
    } else {
        Ident::new_raw(name, proc_macro2::Span::call_site())
    }
}
