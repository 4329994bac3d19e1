// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-request options forwarded to the driver.

/// Options bag passed through to the driver untouched.
///
/// Generated accessors accept `Option<&RequestOptions>` and never read it;
/// only drivers interpret the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Only apply a replace/delete when the stored etag matches.
    pub if_match_etag: Option<String>,

    /// Session token for session-consistent reads.
    pub session_token: Option<String>,

    /// Page size for query iteration.
    pub max_item_count: Option<usize>
}

impl RequestOptions {
    /// Options with every field unset.
    pub const DEFAULT: Self = Self {
        if_match_etag:  None,
        session_token:  None,
        max_item_count: None
    };

    /// Require the stored etag to match before writing.
    pub fn with_if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match_etag = Some(etag.into());
        self
    }

    /// Set the page size for query iteration.
    pub const fn with_max_item_count(mut self, count: usize) -> Self {
        self.max_item_count = Some(count);
        self
    }
}
