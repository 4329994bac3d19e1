// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming conventions.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`capitalize`] | `regionCode` | `RegionCode` |
//! | [`pascal_case`] | `blog_post` | `BlogPost` |
//! | [`snake_case`] | `postId` | `post_id` |

use convert_case::{Case, Casing};

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}

/// PascalCase type name for a model name.
pub fn pascal_case(text: &str) -> String {
    text.to_case(Case::Pascal)
}

/// snake_case Rust identifier for a camelCase name.
pub fn snake_case(text: &str) -> String {
    text.to_case(Case::Snake)
}

/// `[A-Za-z_][A-Za-z0-9_]*`, excluding a lone `_`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            text != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false
    }
}

/// Identifier made of lowercase letters, digits and underscores.
pub fn is_lowercase_identifier(text: &str) -> bool {
    is_identifier(text) && !text.chars().any(|c| c.is_ascii_uppercase())
}

/// Whether `text` is usable as a plain (non-raw) Rust identifier.
pub fn is_rust_ident(text: &str) -> bool {
    syn::parse_str::<syn::Ident>(text).is_ok()
}

/// Plain Rust identifier starting with an uppercase ASCII letter.
pub fn is_type_name(text: &str) -> bool {
    is_rust_ident(text) && text.starts_with(|c: char| c.is_ascii_uppercase())
}
