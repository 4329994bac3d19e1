// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor method generators.
//!
//! Signatures come straight from the abstract [`Operation`]: each [`Param`]
//! becomes one argument and [`Returns`] plus [`Execution`] pick the return
//! type. Only the bodies are written per kind.
//!
//! | Operation | Method | Container call |
//! |-----------|--------|----------------|
//! | create | `create` | `create_item` |
//! | read | `read` | `read_item` |
//! | readOrThrow | `read_or_err` | `read` + `StoreError::not_found` |
//! | readAll | `read_all` | `read_all` |
//! | readAllByKey | `read_all_by_<key>` | `query` with one bound parameter |
//! | replace | `replace` | `replace_item` |
//! | delete | `delete` | `delete_item` |
//! | query | `query` | `query` over `SELECT * FROM c <filter>` |

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::context::Context;
use crate::operations::{Execution, Operation, OperationKind, Param, Returns};

impl Context<'_> {
    /// Every method of the accessor, in operation order.
    pub fn methods(&self) -> TokenStream {
        let methods = self.set.operations.iter().map(|op| self.method(op));
        quote! { #(#methods)* }
    }

    /// Rust method name for an operation.
    pub fn method_name(&self, kind: OperationKind) -> Ident {
        match kind {
            OperationKind::Create => format_ident!("create"),
            OperationKind::Read => format_ident!("read"),
            OperationKind::ReadOrThrow => format_ident!("read_or_err"),
            OperationKind::ReadAll => format_ident!("read_all"),
            OperationKind::ReadAllByKey => self.by_key_method.clone(),
            OperationKind::Replace => format_ident!("replace"),
            OperationKind::Delete => format_ident!("delete"),
            OperationKind::Query => format_ident!("query")
        }
    }

    fn method(&self, op: &Operation) -> TokenStream {
        let doc = self.doc(op.kind);
        let name = self.method_name(op.kind);
        let params = op.params.iter().map(|param| self.param(*param));
        let returns = self.returns(op.returns);
        let body = self.body(op.kind);
        let asyncness = match op.execution {
            Execution::Async => quote! { async },
            Execution::Lazy => TokenStream::new()
        };

        quote! {
            #(#[doc = #doc])*
            pub #asyncness fn #name(&self, #(#params),*) -> #returns {
                #body
            }
        }
    }

    fn param(&self, param: Param) -> TokenStream {
        let entity = &self.entity;
        match param {
            Param::Id => quote! { id: &str },
            Param::PartitionKey => {
                let key = &self.key_param;
                quote! { #key: &str }
            }
            Param::Body => quote! { body: &#entity },
            Param::Options => quote! { options: Option<&RequestOptions> },
            Param::Filter => quote! { filter: &str },
            Param::Parameters => quote! { parameters: impl IntoIterator<Item = SqlParameter> }
        }
    }

    fn returns(&self, returns: Returns) -> TokenStream {
        let entity = &self.entity;
        match returns {
            Returns::Entity => quote! { Result<#entity, StoreError> },
            Returns::OptionalEntity => quote! { Result<Option<#entity>, StoreError> },
            Returns::Entities => quote! { QueryIter<#entity> },
            Returns::Documents => quote! { QueryIter<JsonValue> },
            Returns::Unit => quote! { Result<(), StoreError> }
        }
    }

    fn body(&self, kind: OperationKind) -> TokenStream {
        match kind {
            OperationKind::Create => self.create_body(),
            OperationKind::Read => self.read_body(),
            OperationKind::ReadOrThrow => self.read_or_err_body(),
            OperationKind::ReadAll => self.read_all_body(),
            OperationKind::ReadAllByKey => self.read_all_by_key_body(),
            OperationKind::Replace => self.replace_body(),
            OperationKind::Delete => self.delete_body(),
            OperationKind::Query => self.query_body()
        }
    }

    /// Insert, then strip metadata from the stored document.
    fn create_body(&self) -> TokenStream {
        let entity = &self.entity;
        quote! {
            let resource = self.container.create_item(body, options).await?;
            from_resource::<#entity>(resource)
        }
    }

    /// Point read; a missing item is `Ok(None)`.
    fn read_body(&self) -> TokenStream {
        let entity = &self.entity;
        let key = &self.key_param;
        quote! {
            self.container
                .read_item(id, #key, options)
                .await?
                .map(from_resource::<#entity>)
                .transpose()
        }
    }

    fn read_or_err_body(&self) -> TokenStream {
        let key = self.key_arg();
        quote! {
            self.read(id, #key options)
                .await?
                .ok_or_else(|| StoreError::not_found(Self::CONTAINER, id))
        }
    }

    fn read_all_body(&self) -> TokenStream {
        let entity = &self.entity;
        quote! {
            self.container.read_all::<#entity>(options)
        }
    }

    fn read_all_by_key_body(&self) -> TokenStream {
        let Self {
            entity,
            key_param,
            by_key_query,
            by_key_parameter,
            ..
        } = self;
        quote! {
            let query = SqlQuery::new(#by_key_query).with_parameter(#by_key_parameter, #key_param);
            self.container.query::<#entity>(query, options)
        }
    }

    fn replace_body(&self) -> TokenStream {
        let entity = &self.entity;
        let key = &self.key_param;
        quote! {
            let resource = self.container.replace_item(id, #key, body, options).await?;
            from_resource::<#entity>(resource)
        }
    }

    fn delete_body(&self) -> TokenStream {
        let key = &self.key_param;
        quote! {
            self.container.delete_item(id, #key, options).await
        }
    }

    fn query_body(&self) -> TokenStream {
        quote! {
            let query = SqlQuery::select_all(filter).with_parameters(parameters);
            self.container.query::<JsonValue>(query, None)
        }
    }

    /// Partition key argument as passed on to `read`, followed by a comma.
    ///
    /// Empty for identity keys, whose `read` takes only the id.
    fn key_arg(&self) -> TokenStream {
        if self.is_identity {
            TokenStream::new()
        } else {
            let key = &self.key_param;
            quote! { #key, }
        }
    }

    fn doc(&self, kind: OperationKind) -> Vec<String> {
        let container = self.container;
        let entity = &self.entity;
        match kind {
            OperationKind::Create => vec![
                format!(" Create a `{entity}` in the `{container}` container."),
                String::new(),
                " An absent or empty `id` is replaced with a generated one.".to_owned()
            ],
            OperationKind::Read => vec![format!(
                " Read one `{entity}`, or `None` if it does not exist."
            )],
            OperationKind::ReadOrThrow => vec![
                format!(" Read one `{entity}`."),
                String::new(),
                " Fails with `StoreError::NotFound` if the item does not exist.".to_owned()
            ],
            OperationKind::ReadAll => vec![format!(
                " Lazily iterate every `{entity}` in the container."
            )],
            OperationKind::ReadAllByKey => vec![format!(
                " Lazily iterate every `{entity}` in one `{}` partition.",
                self.partition_key_path
            )],
            OperationKind::Replace => vec![format!(" Overwrite one `{entity}`.")],
            OperationKind::Delete => vec![format!(" Delete one `{entity}`.")],
            OperationKind::Query => vec![
                " Untyped query over `SELECT * FROM c <filter>`.".to_owned(),
                String::new(),
                " Runs across every partition and returns raw documents. Bind values".to_owned(),
                " through `parameters` rather than splicing them into `filter`.".to_owned()
            ]
        }
    }
}
