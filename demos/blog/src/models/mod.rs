// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model declarations read by the generator.

pub mod comment;
pub mod post;
pub mod user;
