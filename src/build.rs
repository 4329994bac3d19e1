// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Build-script entry point.
//!
//! ```rust,ignore
//! // build.rs
//! fn main() {
//!     let config = docstore_codegen::GeneratorConfig::new("src/models", "documents.rs");
//!     if let Err(err) = docstore_codegen::build::run(config) {
//!         panic!("{err}");
//!     }
//! }
//!
//! // src/lib.rs
//! pub mod documents {
//!     include!(concat!(env!("OUT_DIR"), "/documents.rs"));
//! }
//! ```
//!
//! `models_dir` is resolved against `CARGO_MANIFEST_DIR` and `out_file`
//! against `OUT_DIR`. Cargo is told to rerun the script whenever the models
//! directory or any model file changes.

use std::{env, path::PathBuf};

use crate::{GenerateError, GenerationReport, GeneratorConfig, registry::ModelDirectory};

/// Generate into `OUT_DIR` from a build script.
///
/// # Errors
///
/// [`GenerateError::BuildEnv`] outside a build script, otherwise any
/// generation error.
pub fn run(config: GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;

    let config = GeneratorConfig {
        models_dir: manifest_dir.join(&config.models_dir),
        out_file: out_dir.join(&config.out_file),
        ..config
    };

    let directory = ModelDirectory::new(&config.models_dir);
    println!("cargo:rerun-if-changed={}", directory.path().display());
    for file in directory.files()? {
        println!("cargo:rerun-if-changed={}", file.display());
    }

    crate::generate(&config)
}

fn env_path(var: &'static str) -> Result<PathBuf, GenerateError> {
    env::var_os(var)
        .map(PathBuf::from)
        .ok_or(GenerateError::BuildEnv(var))
}
