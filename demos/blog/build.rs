// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docstore_codegen::GeneratorConfig;

fn main() {
    let config = GeneratorConfig::new("src/models", "documents.rs");
    if let Err(err) = docstore_codegen::build::run(config) {
        panic!("document accessor generation failed: {err}");
    }
}
