// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameterized queries and lazy result iteration.
//!
//! Values always travel as [`SqlParameter`] bindings, never spliced into the
//! query text.
//!
//! [`QueryIter`] is lazy (nothing is sent before the first fetch), finite
//! (it stops when the driver returns no continuation) and restartable
//! ([`QueryIter::reset`]).

use std::{collections::VecDeque, marker::PhantomData};

use futures::Stream;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Container, RequestOptions, StoreError, from_resource};

/// Fixed prefix shared by every generated query.
pub const SELECT_ALL: &str = "SELECT * FROM c";

/// Named query parameter, e.g. `@postId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    /// Parameter name including the leading `@`.
    pub name: String,

    /// Bound value.
    pub value: Value
}

impl SqlParameter {
    /// Bind `value` to `name`.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name:  name.into(),
            value: value.into()
        }
    }
}

/// Query text plus its parameter bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    query:      String,
    parameters: Vec<SqlParameter>
}

impl SqlQuery {
    /// Query without parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query:      query.into(),
            parameters: Vec::new()
        }
    }

    /// `SELECT * FROM c` followed by a free-form clause.
    ///
    /// The clause is appended verbatim (after trimming). It is not
    /// validated.
    ///
    /// ```rust
    /// use docstore_core::SqlQuery;
    ///
    /// assert_eq!(SqlQuery::select_all("").text(), "SELECT * FROM c");
    /// assert_eq!(
    ///     SqlQuery::select_all("WHERE c.public = true").text(),
    ///     "SELECT * FROM c WHERE c.public = true"
    /// );
    /// ```
    pub fn select_all(filter: &str) -> Self {
        let filter = filter.trim();
        if filter.is_empty() {
            Self::new(SELECT_ALL)
        } else {
            Self::new(format!("{SELECT_ALL} {filter}"))
        }
    }

    /// Add one binding.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push(SqlParameter::new(name, value));
        self
    }

    /// Add several bindings.
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = SqlParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Query text.
    pub fn text(&self) -> &str {
        &self.query
    }

    /// Parameter bindings in declaration order.
    pub fn parameters(&self) -> &[SqlParameter] {
        &self.parameters
    }

    /// Look up a binding by name.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| &parameter.value)
    }
}

/// Lazy, paged sequence of query results.
///
/// Every item is metadata-stripped and decoded as `T`.
#[derive(Debug)]
pub struct QueryIter<T> {
    container:    Container,
    query:        SqlQuery,
    options:      RequestOptions,
    continuation: Option<String>,
    started:      bool,
    _marker:      PhantomData<fn() -> T>
}

impl<T: DeserializeOwned> QueryIter<T> {
    pub(crate) fn new(container: Container, query: SqlQuery, options: RequestOptions) -> Self {
        Self {
            container,
            query,
            options,
            continuation: None,
            started: false,
            _marker: PhantomData
        }
    }

    /// The query this sequence runs.
    pub fn query(&self) -> &SqlQuery {
        &self.query
    }

    /// Whether another page may exist.
    pub fn has_more_results(&self) -> bool {
        !self.started || self.continuation.is_some()
    }

    /// Fetch the next page, or `None` when the sequence is exhausted.
    pub async fn fetch_next(&mut self) -> Option<Result<Vec<T>, StoreError>> {
        if !self.has_more_results() {
            return None;
        }

        let page = self
            .container
            .query_page(&self.query, self.continuation.as_deref(), &self.options)
            .await;
        self.started = true;

        match page {
            Ok(page) => {
                self.continuation = page.continuation;
                Some(page.items.into_iter().map(from_resource::<T>).collect())
            }
            Err(err) => {
                self.continuation = None;
                Some(Err(err))
            }
        }
    }

    /// Restart from the first page and drain every result.
    pub async fn fetch_all(&mut self) -> Result<Vec<T>, StoreError> {
        self.reset();
        let mut items = Vec::new();
        while let Some(page) = self.fetch_next().await {
            items.extend(page?);
        }
        Ok(items)
    }

    /// Rewind to the first page.
    pub fn reset(&mut self) {
        self.continuation = None;
        self.started = false;
    }

    /// Item-by-item stream. Stops after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, StoreError>> {
        futures::stream::unfold(
            (self, VecDeque::new(), false),
            |(mut iter, mut buffered, failed)| async move {
                if failed {
                    return None;
                }
                loop {
                    if let Some(item) = buffered.pop_front() {
                        return Some((Ok(item), (iter, buffered, false)));
                    }
                    match iter.fetch_next().await? {
                        Ok(page) => buffered.extend(page),
                        Err(err) => return Some((Err(err), (iter, buffered, true)))
                    }
                }
            }
        )
    }
}
