// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use super::{post::PostRef, user::UserRef};

/// Comments live in their post's partition.
pub const PARTITION_KEY: &str = "/post/id";

/// Comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id:     String,
    pub body:   String,
    pub post:   PostRef,
    pub author: UserRef
}
