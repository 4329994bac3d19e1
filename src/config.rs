// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! # Settings
//!
//! | Setting | Default | Used for |
//! |---------|---------|----------|
//! | `models_dir` | `src/models` | Directory scanned for model files |
//! | `out_file` | `src/generated.rs` | Generated module |
//! | `models_module` | `crate::models` | Path the output imports model types from |
//! | `runtime_crate` | `::docstore_core` | Path the output imports runtime types from |
//! | `factory_name` | `client` | Client factory function |
//! | `client_type` | `Client` | Aggregate client struct |
//! | `type_alias` | `Some("Documents")` | Alias for the client type |
//!
//! Names are checked by [`GeneratorConfig::validate`] before anything is
//! generated.

use std::path::{Path, PathBuf};

use crate::{
    GenerateError,
    utils::naming::{is_lowercase_identifier, is_rust_ident, is_type_name}
};

/// Default models directory.
pub const DEFAULT_MODELS_DIR: &str = "src/models";

/// Default output file.
pub const DEFAULT_OUT_FILE: &str = "src/generated.rs";

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory of model files.
    pub models_dir: PathBuf,

    /// Output file.
    pub out_file: PathBuf,

    /// Module path holding `<name>::<Type>` model items.
    pub models_module: String,

    /// Path to the runtime crate.
    pub runtime_crate: String,

    /// Client factory function name.
    pub factory_name: String,

    /// Aggregate client type name.
    pub client_type: String,

    /// Additional alias for the client type.
    pub type_alias: Option<String>
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            models_dir:    PathBuf::from(DEFAULT_MODELS_DIR),
            out_file:      PathBuf::from(DEFAULT_OUT_FILE),
            models_module: "crate::models".to_owned(),
            runtime_crate: "::docstore_core".to_owned(),
            factory_name:  "client".to_owned(),
            client_type:   "Client".to_owned(),
            type_alias:    Some("Documents".to_owned())
        }
    }
}

impl GeneratorConfig {
    /// Defaults with the given input and output paths.
    pub fn new(models_dir: impl Into<PathBuf>, out_file: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
            out_file: out_file.into(),
            ..Self::default()
        }
    }

    /// Set the models module path.
    pub fn with_models_module(mut self, path: impl Into<String>) -> Self {
        self.models_module = path.into();
        self
    }

    /// Set the runtime crate path.
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Set the client factory name.
    pub fn with_factory_name(mut self, name: impl Into<String>) -> Self {
        self.factory_name = name.into();
        self
    }

    /// Set the client type name.
    pub fn with_client_type(mut self, name: impl Into<String>) -> Self {
        self.client_type = name.into();
        self
    }

    /// Set or clear the client type alias.
    pub fn with_type_alias(mut self, alias: Option<impl Into<String>>) -> Self {
        self.type_alias = alias.map(Into::into);
        self
    }

    /// Models directory.
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Output file.
    pub fn out_file(&self) -> &Path {
        &self.out_file
    }

    /// Check every configured name.
    ///
    /// # Errors
    ///
    /// [`GenerateError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), GenerateError> {
        check("models_module", &self.models_module, is_path)?;
        check("runtime_crate", &self.runtime_crate, is_path)?;
        check("factory_name", &self.factory_name, |name| {
            is_lowercase_identifier(name) && is_rust_ident(name)
        })?;
        check("client_type", &self.client_type, is_type_name)?;
        if let Some(alias) = &self.type_alias {
            check("type_alias", alias, is_type_name)?;
            if alias == &self.client_type {
                return Err(GenerateError::InvalidConfig {
                    setting: "type_alias",
                    value:   alias.clone()
                });
            }
        }
        Ok(())
    }
}

fn check(
    setting: &'static str,
    value: &str,
    valid: impl Fn(&str) -> bool
) -> Result<(), GenerateError> {
    if valid(value) {
        Ok(())
    } else {
        Err(GenerateError::InvalidConfig {
            setting,
            value: value.to_owned()
        })
    }
}

fn is_path(value: &str) -> bool {
    syn::parse_str::<syn::Path>(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.models_dir(), Path::new("src/models"));
        assert_eq!(config.type_alias.as_deref(), Some("Documents"));
    }

    #[test]
    fn setters_override_defaults() {
        let config = GeneratorConfig::new("models", "out.rs")
            .with_models_module("crate::schema")
            .with_runtime_crate("docstore")
            .with_factory_name("documents")
            .with_client_type("Store")
            .with_type_alias(None::<String>);
        assert!(config.validate().is_ok());
        assert_eq!(config.out_file(), Path::new("out.rs"));
        assert_eq!(config.models_module, "crate::schema");
        assert_eq!(config.type_alias, None);
    }

    #[test]
    fn rejects_bad_names() {
        let cases = [
            GeneratorConfig::default().with_models_module("crate::"),
            GeneratorConfig::default().with_factory_name("Client"),
            GeneratorConfig::default().with_factory_name("fn"),
            GeneratorConfig::default().with_client_type("client"),
            GeneratorConfig::default().with_type_alias(Some("Client"))
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(GenerateError::InvalidConfig { .. })
            ));
        }
    }
}
