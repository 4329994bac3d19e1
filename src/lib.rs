// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # docstore-codegen
//!
//! Generates a typed, partition-aware CRUD and query API over a document
//! store from a directory of model declarations.
//!
//! ## Quick Start
//!
//! Each model lives in `models/<name>.rs` and declares its record type plus
//! the JSON path of its partition key:
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
//! Running the generator produces one module:
//!
//! ```rust,ignore
//! let documents = client(&database);
//!
//! let comment = documents.comment.create(&draft, None).await?;
//! let same = documents.comment.read(&comment.id, &post.id, None).await?;
//! let thread = documents.comment.read_all_by_post_id(&post.id, None).fetch_all().await?;
//! documents.comment.delete(&comment.id, &post.id, None).await?;
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ModelDirectory ──► ModelSpec ──► PartitionKeyInfo ──► OperationSet
//!                                                           │
//!                          out_file ◄── writer ◄── Emitter ◄── ModuleDef
//! ```
//!
//! | Stage | Module |
//! |-------|--------|
//! | Load declarations | [`registry`] |
//! | Derive partition key | [`partition`] |
//! | Synthesize operations | [`operations`] |
//! | Assemble module | [`module`] |
//! | Render source | [`emit`] |
//! | Write atomically | [`writer`] |
//!
//! Generation is all-or-nothing: every model is validated and the module is
//! fully rendered before the output file is touched.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build;
mod config;
pub mod emit;
mod error;
pub mod module;
pub mod operations;
pub mod partition;
pub mod registry;
mod utils;
pub mod writer;

use std::path::PathBuf;

use tracing::{info, info_span};

pub use self::{
    config::{DEFAULT_MODELS_DIR, DEFAULT_OUT_FILE, GeneratorConfig},
    emit::{Emitter, RustEmitter},
    error::GenerateError,
    module::ModuleDef,
    partition::{PartitionKeyError, PartitionKeyInfo},
    registry::{ModelDirectory, ModelSpec, SchemaSource},
    writer::WriteOutcome
};

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Models in emission order.
    pub models: Vec<String>,

    /// Output file.
    pub out_file: PathBuf,

    /// Effect on the output file.
    pub outcome: WriteOutcome
}

/// Generate from `config.models_dir` into `config.out_file`.
///
/// # Errors
///
/// Any [`GenerateError`]. On error the output file is untouched.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    generate_with(&ModelDirectory::new(&config.models_dir), &RustEmitter, config)
}

/// Generate from any schema source with any emitter.
///
/// # Errors
///
/// Any [`GenerateError`]. On error the output file is untouched.
pub fn generate_with<S, E>(
    source: &S,
    emitter: &E,
    config: &GeneratorConfig
) -> Result<GenerationReport, GenerateError>
where
    S: SchemaSource + ?Sized,
    E: Emitter + ?Sized
{
    let span = info_span!("generate", out_file = %config.out_file.display());
    let _guard = span.enter();

    let (module, content) = render_with(source, emitter, config)?;
    let outcome = writer::write_if_changed(&config.out_file, &content)?;
    let models: Vec<String> = module.model_names().map(str::to_owned).collect();
    info!(models = models.len(), ?outcome, "generated document accessors");

    Ok(GenerationReport {
        models,
        out_file: config.out_file.clone(),
        outcome
    })
}

/// Render the module for `config` without writing it.
///
/// # Errors
///
/// Any loading, validation or rendering error.
pub fn render(config: &GeneratorConfig) -> Result<String, GenerateError> {
    render_with(&ModelDirectory::new(&config.models_dir), &RustEmitter, config)
        .map(|(_, content)| content)
}

/// Whether `config.out_file` is up to date, without writing.
///
/// # Errors
///
/// Any loading, validation or rendering error, or an unreadable output
/// file.
pub fn check(config: &GeneratorConfig) -> Result<WriteOutcome, GenerateError> {
    let content = render(config)?;
    writer::compare(&config.out_file, &content)
}

fn render_with<S, E>(
    source: &S,
    emitter: &E,
    config: &GeneratorConfig
) -> Result<(ModuleDef, String), GenerateError>
where
    S: SchemaSource + ?Sized,
    E: Emitter + ?Sized
{
    let specs = source.load()?;
    let module = ModuleDef::assemble(specs, config)?;
    let content = emitter.emit(&module)?;
    Ok((module, content))
}
