// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Emitters render a [`ModuleDef`] to source text.
//!
//! The abstract module carries no syntax of its own; an [`Emitter`] decides
//! how operations, parameters and results are spelled in the target
//! language. [`RustEmitter`] is the one shipped here.
//!
//! # Module Structure
//!
//! ```text
//! emit/
//! ├── rust.rs             — RustEmitter, module layout, header
//! └── rust/
//!     ├── context.rs      — Per-model identifiers
//!     ├── operations.rs   — Accessor methods
//!     └── client.rs       — CONTAINERS, client struct, factory
//! ```

pub mod rust;

pub use rust::RustEmitter;

use crate::{GenerateError, module::ModuleDef};

/// Tool name written into generated headers.
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Renders a module definition.
pub trait Emitter {
    /// Render the full output file.
    ///
    /// Output is a pure function of `module`: the same definition always
    /// yields byte-identical text.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Render`] if the definition cannot be rendered.
    fn emit(&self, module: &ModuleDef) -> Result<String, GenerateError>;
}

/// First lines of every generated file.
pub fn header(model_count: usize) -> String {
    let noun = if model_count == 1 { "model" } else { "models" };
    format!(
        "// @generated by {TOOL_NAME} from {model_count} {noun}. Do not edit by hand.\n\
         // Re-run the generator after changing a model file.\n"
    )
}
