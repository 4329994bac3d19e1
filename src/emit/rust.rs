// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust emitter.
//!
//! Renders a [`ModuleDef`] as a Rust module meant to be `include!`d or
//! compiled as its own file. The output has no inner attributes, so both
//! work.
//!
//! # Output Layout
//!
//! ```rust,ignore
//! // @generated by docstore-codegen from 3 models. Do not edit by hand.
//!
//! use ::docstore_core::{Container, ContainerDefinition, Database, ...};
//! use crate::models::comment::Comment;
//! use crate::models::post::Post;
//! use crate::models::user::User;
//!
//! pub struct CommentOperations { .. }
//! pub struct PostOperations { .. }
//! pub struct UserOperations { .. }
//!
//! pub const CONTAINERS: &[ContainerDefinition] = &[..];
//! pub struct Client { pub comment: CommentOperations, .. }
//! pub fn client(database: &Database) -> Client { .. }
//! pub type Documents = Client;
//! ```
//!
//! Tokens are built with `quote`, checked by parsing them back into a
//! `syn::File`, and pretty-printed with `prettyplease`.

mod client;
mod context;
mod operations;

use client::ClientNames;
use context::Context;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::trace;

use super::{Emitter, header};
use crate::{GenerateError, module::ModuleDef};

/// Runtime items every non-empty module imports.
const RUNTIME_ITEMS: &[&str] = &[
    "Container",
    "ContainerDefinition",
    "Database",
    "JsonValue",
    "QueryIter",
    "RequestOptions",
    "SqlParameter",
    "SqlQuery",
    "StoreError",
    "from_resource"
];

/// Runtime items a module without models still needs.
const EMPTY_RUNTIME_ITEMS: &[&str] = &["ContainerDefinition", "Database"];

/// Emits Rust source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl RustEmitter {
    /// Module tokens, before formatting.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Render`] if a configured path does not parse.
    pub fn tokens(&self, module: &ModuleDef) -> Result<TokenStream, GenerateError> {
        let runtime = parse_path(&module.runtime_crate)?;
        let models = parse_path(&module.models_module)?;

        let items = if module.models.is_empty() {
            EMPTY_RUNTIME_ITEMS
        } else {
            RUNTIME_ITEMS
        };
        let items = items.iter().map(|item| format_ident!("{}", item));

        let contexts: Vec<Context<'_>> = module.models.iter().map(Context::new).collect();
        let model_imports = contexts.iter().map(|ctx| {
            let Context {
                field, entity, ..
            } = ctx;
            quote! { use #models::#field::#entity; }
        });
        let accessors = contexts.iter().map(Context::accessor);

        let names = ClientNames::new(
            &module.client_type,
            &module.factory_name,
            module.type_alias.as_deref()
        );
        let client = client::client(&names, &contexts);

        Ok(quote! {
            use #runtime::{#(#items),*};
            #(#model_imports)*

            #(#accessors)*

            #client
        })
    }
}

impl Emitter for RustEmitter {
    fn emit(&self, module: &ModuleDef) -> Result<String, GenerateError> {
        let tokens = self.tokens(module)?;
        let file: syn::File = syn::parse2(tokens).map_err(GenerateError::Render)?;
        let body = prettyplease::unparse(&file);
        trace!(bytes = body.len(), "rendered module");
        Ok(format!("{}\n{}", header(module.models.len()), body))
    }
}

fn parse_path(path: &str) -> Result<syn::Path, GenerateError> {
    syn::parse_str(path).map_err(GenerateError::Render)
}
