// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation errors.
//!
//! Every malformed-input variant names the offending model. Any error aborts
//! the run before the output file is touched.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::partition::PartitionKeyError;

/// Failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The models directory could not be listed.
    #[error("failed to read models directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that was listed.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error
    },

    /// A model file could not be read.
    #[error("failed to read model `{model}` from {}: {source}", .path.display())]
    ReadModel {
        /// Model name (file stem).
        model:  String,
        /// Model file.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error
    },

    /// A model file is not valid Rust.
    #[error("model `{model}` could not be parsed: {source}")]
    ParseModel {
        /// Model name (file stem).
        model:  String,
        /// Parser error.
        #[source]
        source: syn::Error
    },

    /// The file name cannot be used as a model name.
    #[error("model file `{file}` must be named with a lowercase identifier")]
    InvalidModelName {
        /// Offending file name.
        file: String
    },

    /// Two declarations produced the same model name.
    #[error("model `{model}` is declared more than once")]
    DuplicateModel {
        /// Repeated model name.
        model: String
    },

    /// No `PARTITION_KEY` constant in the model file.
    #[error("model `{model}` does not declare a `PARTITION_KEY` constant")]
    MissingPartitionKey {
        /// Model name.
        model: String
    },

    /// `PARTITION_KEY` exists but is not a string literal.
    #[error("model `{model}` declares `PARTITION_KEY` but its value is not a string literal")]
    PartitionKeyNotLiteral {
        /// Model name.
        model: String
    },

    /// The partition key path cannot be derived.
    #[error("model `{model}` has malformed partition key `{path}`: {source}")]
    MalformedPartitionKey {
        /// Model name.
        model:  String,
        /// Raw path as declared.
        path:   String,
        /// Derivation failure.
        #[source]
        source: PartitionKeyError
    },

    /// The partition key parameter clashes with a fixed operation parameter.
    #[error("model `{model}` partition key parameter `{param}` collides with a reserved parameter name")]
    ReservedPartitionKey {
        /// Model name.
        model: String,
        /// Colliding parameter.
        param: String
    },

    /// The model's type name is not a valid Rust type identifier.
    #[error("model `{model}` has invalid type name `{type_name}`")]
    InvalidTypeName {
        /// Model name.
        model:     String,
        /// Rejected type name.
        type_name: String
    },

    /// The model type would shadow a name the generated module uses.
    #[error("model `{model}` type `{type_name}` clashes with a name used by the generated module")]
    ReservedModelType {
        /// Model name.
        model:     String,
        /// Clashing type name.
        type_name: String
    },

    /// The model file does not define its record type.
    #[error("model `{model}` does not define a public type `{type_name}`")]
    MissingModelType {
        /// Model name.
        model:     String,
        /// Expected type name.
        type_name: String
    },

    /// A configured name is not a valid identifier or path.
    #[error("invalid {setting} `{value}` in generator configuration")]
    InvalidConfig {
        /// Setting name.
        setting: &'static str,
        /// Rejected value.
        value:   String
    },

    /// A build-script environment variable is not set.
    #[error("environment variable `{0}` is not set; run from a build script")]
    BuildEnv(&'static str),

    /// The rendered module is not valid Rust.
    #[error("generated module failed to parse: {0}")]
    Render(#[source] syn::Error),

    /// The output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Output path.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error
    }
}

impl GenerateError {
    /// Model named by a malformed-input error, if any.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::ReadModel { model, .. }
            | Self::ParseModel { model, .. }
            | Self::DuplicateModel { model }
            | Self::MissingPartitionKey { model }
            | Self::PartitionKeyNotLiteral { model }
            | Self::MalformedPartitionKey { model, .. }
            | Self::ReservedPartitionKey { model, .. }
            | Self::InvalidTypeName { model, .. }
            | Self::ReservedModelType { model, .. }
            | Self::MissingModelType { model, .. } => Some(model),
            _ => None
        }
    }
}
