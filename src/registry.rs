// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model registry.
//!
//! Loads model declarations into explicit [`ModelSpec`] records. The
//! generator only sees these records; [`SchemaSource`] is the seam for other
//! declaration formats.
//!
//! # Model files
//!
//! [`ModelDirectory`] reads every `<name>.rs` file in a directory:
//!
//! ```rust,ignore
//! // models/comment.rs
//! pub const PARTITION_KEY: &str = "/post/id";
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Comment {
//!     pub id:   String,
//!     pub body: String,
//!     pub post: PostRef
//! }
//! ```
//!
//! | Source | Becomes |
//! |--------|---------|
//! | file stem `comment` | [`ModelSpec::name`], also the container name |
//! | `pub struct Comment` | [`ModelSpec::type_name`] (PascalCase of the stem) |
//! | `PARTITION_KEY` literal | [`ModelSpec::raw_partition_key_path`] |
//!
//! Files are visited in file-name order so output is reproducible on every
//! platform. `mod.rs`, `lib.rs`, dot-files and non-`.rs` files are skipped.

use std::{
    fs,
    path::{Path, PathBuf}
};

use syn::{Expr, ExprLit, Item, Lit, Visibility};
use tracing::debug;

use crate::{
    GenerateError,
    utils::naming::{is_lowercase_identifier, is_rust_ident, pascal_case}
};

/// Name of the constant holding the raw partition key path.
pub const PARTITION_KEY_CONST: &str = "PARTITION_KEY";

/// One model declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSpec {
    /// Lowercase model name; also the container name and client field.
    pub name: String,

    /// PascalCase record type name.
    pub type_name: String,

    /// Partition key path exactly as declared, e.g. `/post/id`.
    pub raw_partition_key_path: String,

    /// File the declaration came from, if any.
    pub source: Option<PathBuf>
}

impl ModelSpec {
    /// Spec with the type name derived from `name`.
    ///
    /// ```rust
    /// use docstore_codegen::ModelSpec;
    ///
    /// let spec = ModelSpec::new("blog_post", "/author/id");
    /// assert_eq!(spec.type_name, "BlogPost");
    /// ```
    pub fn new(name: impl Into<String>, raw_partition_key_path: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            type_name: pascal_case(&name),
            name,
            raw_partition_key_path: raw_partition_key_path.into(),
            source: None
        }
    }
}

/// Anything that can produce the ordered model list.
pub trait SchemaSource {
    /// Load every model, in emission order.
    ///
    /// # Errors
    ///
    /// Any malformed declaration aborts the whole load.
    fn load(&self) -> Result<Vec<ModelSpec>, GenerateError>;
}

impl SchemaSource for [ModelSpec] {
    fn load(&self) -> Result<Vec<ModelSpec>, GenerateError> {
        Ok(self.to_vec())
    }
}

impl SchemaSource for Vec<ModelSpec> {
    fn load(&self) -> Result<Vec<ModelSpec>, GenerateError> {
        Ok(self.clone())
    }
}

/// Directory of Rust model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDirectory {
    path: PathBuf
}

impl ModelDirectory {
    /// Registry over `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    /// Directory being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Model files in emission order.
    ///
    /// # Errors
    ///
    /// [`GenerateError::ReadDir`] if the directory cannot be listed.
    pub fn files(&self) -> Result<Vec<PathBuf>, GenerateError> {
        let read_dir_error = |source| GenerateError::ReadDir {
            path: self.path.clone(),
            source
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if is_model_file(&path) {
                files.push(path);
            }
        }
        files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
        Ok(files)
    }
}

impl SchemaSource for ModelDirectory {
    fn load(&self) -> Result<Vec<ModelSpec>, GenerateError> {
        self.files()?.iter().map(|path| load_model(path)).collect()
    }
}

fn is_model_file(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "rs")
        && !stem.starts_with('.')
        && stem != "mod"
        && stem != "lib"
}

/// Load one model file.
fn load_model(path: &Path) -> Result<ModelSpec, GenerateError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| is_lowercase_identifier(stem) && is_rust_ident(stem))
        .ok_or(GenerateError::InvalidModelName {
            file: file_name
        })?
        .to_owned();

    let content = fs::read_to_string(path).map_err(|source| GenerateError::ReadModel {
        model: name.clone(),
        path: path.to_path_buf(),
        source
    })?;

    let mut spec = parse_model(&name, &content)?;
    spec.source = Some(path.to_path_buf());
    debug!(
        model = %spec.name,
        partition_key = %spec.raw_partition_key_path,
        file = %path.display(),
        "discovered model"
    );
    Ok(spec)
}

/// Extract a [`ModelSpec`] from model source text.
///
/// # Errors
///
/// Fails when the source does not parse, lacks a literal `PARTITION_KEY`, or
/// does not define `pub` type named after the model.
pub fn parse_model(name: &str, content: &str) -> Result<ModelSpec, GenerateError> {
    let file = syn::parse_file(content).map_err(|source| GenerateError::ParseModel {
        model: name.to_owned(),
        source
    })?;
    let mut spec = ModelSpec::new(name, String::new());

    let partition_key = file
        .items
        .iter()
        .find_map(|item| match item {
            Item::Const(item) if item.ident == PARTITION_KEY_CONST => Some(&*item.expr),
            _ => None
        })
        .ok_or_else(|| GenerateError::MissingPartitionKey {
            model: name.to_owned()
        })?;

    spec.raw_partition_key_path = match partition_key {
        Expr::Lit(ExprLit {
            lit: Lit::Str(path),
            ..
        }) => path.value(),
        _ => {
            return Err(GenerateError::PartitionKeyNotLiteral {
                model: name.to_owned()
            });
        }
    };

    let defines_type = file.items.iter().any(|item| match item {
        Item::Struct(item) => is_public(&item.vis) && item.ident == spec.type_name,
        Item::Enum(item) => is_public(&item.vis) && item.ident == spec.type_name,
        Item::Type(item) => is_public(&item.vis) && item.ident == spec.type_name,
        _ => false
    });
    if !defines_type {
        return Err(GenerateError::MissingModelType {
            model:     name.to_owned(),
            type_name: spec.type_name
        });
    }

    Ok(spec)
}

fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}
