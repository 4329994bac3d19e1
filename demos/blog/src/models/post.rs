// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use super::user::UserRef;

/// Posts are partitioned by author.
pub const PARTITION_KEY: &str = "/user/id";

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id:        String,
    pub title:     String,
    pub body:      String,
    pub published: bool,
    pub user:      UserRef
}

/// Reference to a post embedded in other documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    pub id: String
}
