// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line generator.
//!
//! ```text
//! docstore-codegen --models-dir src/models --out-file src/documents.rs
//! docstore-codegen --check            # exit 1 if the output is stale
//! ```
//!
//! Every flag can also be set through a `DOCSTORE_*` environment variable.
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use docstore_codegen::{DEFAULT_MODELS_DIR, DEFAULT_OUT_FILE, GeneratorConfig, WriteOutcome};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Generate typed document-store accessors from model declarations.
#[derive(Debug, Parser)]
#[command(name = "docstore-codegen", version, about)]
struct Cli {
    /// Directory of `<name>.rs` model files.
    #[arg(long, env = "DOCSTORE_MODELS_DIR", default_value = DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    /// Generated module path.
    #[arg(long, visible_alias = "out", env = "DOCSTORE_OUT_FILE", default_value = DEFAULT_OUT_FILE)]
    out_file: PathBuf,

    /// Module path the output imports model types from.
    #[arg(long, env = "DOCSTORE_MODELS_MODULE", default_value = "crate::models")]
    models_module: String,

    /// Path of the runtime crate.
    #[arg(long, env = "DOCSTORE_RUNTIME_CRATE", default_value = "::docstore_core")]
    runtime_crate: String,

    /// Client factory function name.
    #[arg(long, env = "DOCSTORE_FACTORY_NAME", default_value = "client")]
    factory_name: String,

    /// Client struct name.
    #[arg(long, env = "DOCSTORE_CLIENT_TYPE", default_value = "Client")]
    client_type: String,

    /// Alias for the client struct.
    #[arg(long, env = "DOCSTORE_TYPE_ALIAS", default_value = "Documents")]
    type_alias: String,

    /// Skip the client type alias.
    #[arg(long, env = "DOCSTORE_NO_TYPE_ALIAS", conflicts_with = "type_alias")]
    no_type_alias: bool,

    /// Compare with the existing output instead of writing it.
    #[arg(long)]
    check: bool
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(&self.models_dir, &self.out_file)
            .with_models_module(&self.models_module)
            .with_runtime_crate(&self.runtime_crate)
            .with_factory_name(&self.factory_name)
            .with_client_type(&self.client_type)
            .with_type_alias((!self.no_type_alias).then_some(&self.type_alias))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    if cli.check {
        return check(&config);
    }

    match docstore_codegen::generate(&config) {
        Ok(report) => {
            info!(
                models = ?report.models,
                path = %report.out_file.display(),
                changed = report.outcome.changed(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(model = err.model(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn check(config: &GeneratorConfig) -> ExitCode {
    match docstore_codegen::check(config) {
        Ok(WriteOutcome::Unchanged) => {
            info!(path = %config.out_file.display(), "up to date");
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            warn!(path = %config.out_file.display(), ?outcome, "generated module is stale");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(model = err.model(), "{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_fill_config() {
        let cli = Cli::parse_from([
            "docstore-codegen",
            "--models-dir",
            "models",
            "--out-file",
            "out.rs",
            "--client-type",
            "Store",
            "--no-type-alias"
        ]);
        let config = cli.config();
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert_eq!(config.client_type, "Store");
        assert_eq!(config.type_alias, None);
        assert!(!cli.check);
    }
}
