// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

pub const PARTITION_KEY: &str = "/id";

pub struct User {
    pub id: String
}
