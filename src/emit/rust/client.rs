// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor structs, container table, client struct and factory.
//!
//! # Generated Items
//!
//! ```rust,ignore
//! pub const CONTAINERS: &[ContainerDefinition] = &[
//!     ContainerDefinition::new("comment", "/post/id"),
//!     ContainerDefinition::new("user", "/id")
//! ];
//!
//! pub struct CommentOperations { container: Container }
//! pub struct UserOperations { container: Container }
//!
//! pub fn client(database: &Database) -> Client { ... }
//!
//! pub struct Client {
//!     pub comment: CommentOperations,
//!     pub user:    UserOperations
//! }
//!
//! pub type Documents = Client;
//! ```

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::context::Context;

impl Context<'_> {
    /// `<Type>Operations` struct and its methods.
    pub fn accessor(&self) -> TokenStream {
        let Self {
            accessor,
            entity,
            container,
            partition_key_path,
            ..
        } = self;
        let methods = self.methods();
        let doc = format!(" Typed operations on the `{container}` container of `{entity}` items.");
        let key_doc = format!(" Partition key path: `{partition_key_path}`.");

        quote! {
            #[doc = #doc]
            #[doc = ""]
            #[doc = #key_doc]
            #[derive(Clone, Debug)]
            pub struct #accessor {
                container: Container
            }

            impl #accessor {
                /// Container name.
                pub const CONTAINER: &'static str = #container;

                /// Partition key path.
                pub const PARTITION_KEY: &'static str = #partition_key_path;

                /// Accessor over an acquired container handle.
                pub fn new(container: Container) -> Self {
                    Self { container }
                }

                /// Underlying container handle.
                pub fn container(&self) -> &Container {
                    &self.container
                }

                #methods
            }
        }
    }

    /// Entry for the `CONTAINERS` table.
    pub fn container_definition(&self) -> TokenStream {
        let Self {
            container,
            partition_key_path,
            ..
        } = self;
        quote! {
            ContainerDefinition::new(#container, #partition_key_path)
        }
    }

    /// Field of the client struct.
    pub fn client_field(&self) -> TokenStream {
        let Self {
            field,
            accessor,
            entity,
            ..
        } = self;
        let doc = format!(" `{entity}` operations.");
        quote! {
            #[doc = #doc]
            pub #field: #accessor
        }
    }

    /// Field initializer inside the factory.
    pub fn client_init(&self) -> TokenStream {
        let Self {
            field, accessor, ..
        } = self;
        quote! {
            #field: #accessor::new(database.container(#accessor::CONTAINER))
        }
    }
}

/// Names of the module-level items.
pub struct ClientNames {
    /// Client struct.
    pub client_type: Ident,

    /// Factory function.
    pub factory: Ident,

    /// Optional alias for the client struct.
    pub alias: Option<Ident>
}

impl ClientNames {
    /// Identifiers for the configured names.
    pub fn new(client_type: &str, factory: &str, alias: Option<&str>) -> Self {
        Self {
            client_type: format_ident!("{}", client_type),
            factory:     format_ident!("{}", factory),
            alias:       alias.map(|alias| format_ident!("{}", alias))
        }
    }
}

/// `CONTAINERS`, the client struct, its factory and the alias.
pub fn client(names: &ClientNames, contexts: &[Context<'_>]) -> TokenStream {
    let ClientNames {
        client_type,
        factory,
        alias
    } = names;
    let definitions = contexts.iter().map(Context::container_definition);
    let fields = contexts.iter().map(Context::client_field);
    let inits = contexts.iter().map(Context::client_init);
    let database = if contexts.is_empty() {
        format_ident!("_database")
    } else {
        format_ident!("database")
    };
    let alias = alias.as_ref().map(|alias| {
        quote! {
            /// Alias for the generated client.
            pub type #alias = #client_type;
        }
    });

    quote! {
        /// Every container with its partition key path, in model order.
        pub const CONTAINERS: &[ContainerDefinition] = &[#(#definitions),*];

        /// One accessor per model.
        #[derive(Clone, Debug)]
        pub struct #client_type {
            #(#fields),*
        }

        impl #client_type {
            /// Acquire every container from `database`.
            pub fn new(#database: &Database) -> Self {
                Self {
                    #(#inits),*
                }
            }
        }

        /// Build the client. Container handles are acquired once here.
        pub fn #factory(database: &Database) -> #client_type {
            #client_type::new(database)
        }

        #alias
    }
}
