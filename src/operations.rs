// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model API synthesis.
//!
//! Builds the abstract [`OperationSet`] for one model. Nothing here knows
//! about output syntax; emitters render the set.
//!
//! # Operations
//!
//! | Kind | Params (non-identity key) | Params (identity key) | Result |
//! |------|---------------------------|-----------------------|--------|
//! | `create` | body, options | body, options | entity |
//! | `read` | id, key, options | id, options | optional entity |
//! | `readOrThrow` | id, key, options | id, options | entity or NotFound |
//! | `readAll` | options | options | lazy entities |
//! | `readAllBy<Key>` | key, options | — (not emitted) | lazy entities |
//! | `replace` | id, key, body, options | id, body, options | entity |
//! | `delete` | id, key, options | id, options | nothing |
//! | `query` | filter, parameters | filter, parameters | lazy untyped documents |
//!
//! # Conventions
//!
//! The conventions are plain functions so they can be tested on their own:
//! [`container_name`], [`emits_read_all_by_key`], [`addressing_params`] and
//! [`read_all_by_key_query`].

use crate::{
    partition::PartitionKeyInfo,
    registry::ModelSpec,
    utils::naming::capitalize
};

/// Operation identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    /// Insert a new entity.
    Create,
    /// Point read returning an optional entity.
    Read,
    /// Point read failing with NotFound.
    ReadOrThrow,
    /// Every entity in the container.
    ReadAll,
    /// Every entity in one partition.
    ReadAllByKey,
    /// Overwrite an entity.
    Replace,
    /// Remove an entity.
    Delete,
    /// Free-form, untyped, cross-partition query.
    Query
}

impl OperationKind {
    /// Every kind, in emission order.
    pub const ALL: [Self; 8] = [
        Self::Create,
        Self::Read,
        Self::ReadOrThrow,
        Self::ReadAll,
        Self::ReadAllByKey,
        Self::Replace,
        Self::Delete,
        Self::Query
    ];
}

/// Operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Item id.
    Id,
    /// Partition key value.
    PartitionKey,
    /// Entity body.
    Body,
    /// Pass-through request options.
    Options,
    /// Free-form clause appended to `SELECT * FROM c`.
    Filter,
    /// Query parameter bindings.
    Parameters
}

/// Result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Returns {
    /// The metadata-stripped entity.
    Entity,
    /// The entity, or an explicit absent value.
    OptionalEntity,
    /// Lazy sequence of entities.
    Entities,
    /// Lazy sequence of untyped documents.
    Documents,
    /// No value.
    Unit
}

/// Whether the operation suspends or hands back a lazy sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Execution {
    /// Awaited once, yields the result.
    Async,
    /// Returns immediately; work happens while iterating.
    Lazy
}

/// Abstract signature of one generated operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Operation identity.
    pub kind: OperationKind,

    /// Abstract camelCase name, e.g. `readAllByPostId`.
    pub name: String,

    /// Parameters in call order.
    pub params: Vec<Param>,

    /// Result shape.
    pub returns: Returns,

    /// Async or lazy.
    pub execution: Execution,

    /// Whether this layer itself raises NotFound.
    pub raises_not_found: bool
}

/// All operations for one model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationSet {
    /// Model declaration.
    pub model: ModelSpec,

    /// Derived partition key.
    pub partition_key: PartitionKeyInfo,

    /// Container the operations address.
    pub container: String,

    /// Operations in emission order.
    pub operations: Vec<Operation>
}

impl OperationSet {
    /// Synthesize the operation set for one model.
    pub fn synthesize(model: ModelSpec, partition_key: PartitionKeyInfo) -> Self {
        let operations = OperationKind::ALL
            .into_iter()
            .filter_map(|kind| operation(kind, &partition_key))
            .collect();

        Self {
            container: container_name(&model).to_owned(),
            model,
            partition_key,
            operations
        }
    }

    /// Operation of a given kind, if emitted.
    pub fn get(&self, kind: OperationKind) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|operation| operation.kind == kind)
    }
}

/// Container addressed by a model: the model name itself.
pub fn container_name(model: &ModelSpec) -> &str {
    &model.name
}

/// `readAllByKey` only exists when the key is not the id.
pub const fn emits_read_all_by_key(partition_key: &PartitionKeyInfo) -> bool {
    !partition_key.is_identity
}

/// Parameters that address one item: the id, then the key unless it is the
/// id.
pub fn addressing_params(partition_key: &PartitionKeyInfo) -> Vec<Param> {
    if partition_key.is_identity {
        vec![Param::Id]
    } else {
        vec![Param::Id, Param::PartitionKey]
    }
}

/// Query text and parameter name for `readAllByKey`.
///
/// The value is always bound through the returned parameter name.
///
/// ```rust
/// use docstore_codegen::{PartitionKeyInfo, operations::read_all_by_key_query};
///
/// let key = PartitionKeyInfo::derive("/post/id").unwrap();
/// let (query, parameter) = read_all_by_key_query(&key);
/// assert_eq!(query, "SELECT * FROM c WHERE c.post.id = @postId");
/// assert_eq!(parameter, "@postId");
/// ```
pub fn read_all_by_key_query(partition_key: &PartitionKeyInfo) -> (String, String) {
    let parameter = partition_key.query_parameter();
    (
        format!(
            "SELECT * FROM c WHERE {} = {}",
            partition_key.field_path(),
            parameter
        ),
        parameter
    )
}

fn operation(kind: OperationKind, partition_key: &PartitionKeyInfo) -> Option<Operation> {
    let addressed = |extra: &[Param]| {
        let mut params = addressing_params(partition_key);
        params.extend_from_slice(extra);
        params.push(Param::Options);
        params
    };

    let (name, params, returns, execution) = match kind {
        OperationKind::Create => (
            "create".to_owned(),
            vec![Param::Body, Param::Options],
            Returns::Entity,
            Execution::Async
        ),
        OperationKind::Read => (
            "read".to_owned(),
            addressed(&[]),
            Returns::OptionalEntity,
            Execution::Async
        ),
        OperationKind::ReadOrThrow => (
            "readOrThrow".to_owned(),
            addressed(&[]),
            Returns::Entity,
            Execution::Async
        ),
        OperationKind::ReadAll => (
            "readAll".to_owned(),
            vec![Param::Options],
            Returns::Entities,
            Execution::Lazy
        ),
        OperationKind::ReadAllByKey => {
            if !emits_read_all_by_key(partition_key) {
                return None;
            }
            (
                format!("readAllBy{}", capitalize(&partition_key.param_name)),
                vec![Param::PartitionKey, Param::Options],
                Returns::Entities,
                Execution::Lazy
            )
        }
        OperationKind::Replace => (
            "replace".to_owned(),
            addressed(&[Param::Body]),
            Returns::Entity,
            Execution::Async
        ),
        OperationKind::Delete => (
            "delete".to_owned(),
            addressed(&[]),
            Returns::Unit,
            Execution::Async
        ),
        OperationKind::Query => (
            "query".to_owned(),
            vec![Param::Filter, Param::Parameters],
            Returns::Documents,
            Execution::Lazy
        )
    };

    Some(Operation {
        kind,
        name,
        params,
        returns,
        execution,
        raises_not_found: kind == OperationKind::ReadOrThrow
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesize(name: &str, path: &str) -> OperationSet {
        OperationSet::synthesize(
            ModelSpec::new(name, path),
            PartitionKeyInfo::derive(path).unwrap()
        )
    }

    #[test]
    fn compound_key_emits_all_eight() {
        let set = synthesize("comment", "/post/id");
        let names: Vec<_> = set.operations.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "create",
                "read",
                "readOrThrow",
                "readAll",
                "readAllByPostId",
                "replace",
                "delete",
                "query"
            ]
        );
        assert_eq!(set.container, "comment");
    }

    #[test]
    fn identity_key_skips_read_all_by_key() {
        let set = synthesize("user", "/id");
        assert_eq!(set.operations.len(), 7);
        assert!(set.get(OperationKind::ReadAllByKey).is_none());
    }

    #[test]
    fn identity_key_collapses_addressing() {
        let set = synthesize("user", "/id");
        assert_eq!(
            set.get(OperationKind::Read).unwrap().params,
            vec![Param::Id, Param::Options]
        );
        assert_eq!(
            set.get(OperationKind::Replace).unwrap().params,
            vec![Param::Id, Param::Body, Param::Options]
        );
        assert_eq!(
            set.get(OperationKind::Delete).unwrap().params,
            vec![Param::Id, Param::Options]
        );
    }

    #[test]
    fn compound_key_addresses_with_id_then_key() {
        let set = synthesize("comment", "/post/id");
        assert_eq!(
            set.get(OperationKind::ReadOrThrow).unwrap().params,
            vec![Param::Id, Param::PartitionKey, Param::Options]
        );
        assert_eq!(
            set.get(OperationKind::Replace).unwrap().params,
            vec![Param::Id, Param::PartitionKey, Param::Body, Param::Options]
        );
    }

    #[test]
    fn result_shapes() {
        let set = synthesize("comment", "/post/id");
        let read = set.get(OperationKind::Read).unwrap();
        assert_eq!(read.returns, Returns::OptionalEntity);
        assert!(!read.raises_not_found);

        let read_or_throw = set.get(OperationKind::ReadOrThrow).unwrap();
        assert_eq!(read_or_throw.returns, Returns::Entity);
        assert!(read_or_throw.raises_not_found);

        let query = set.get(OperationKind::Query).unwrap();
        assert_eq!(query.returns, Returns::Documents);
        assert_eq!(query.execution, Execution::Lazy);
        assert_eq!(query.params, vec![Param::Filter, Param::Parameters]);
    }

    #[test]
    fn policies() {
        let compound = PartitionKeyInfo::derive("/user/id").unwrap();
        let identity = PartitionKeyInfo::derive("/id").unwrap();
        assert!(emits_read_all_by_key(&compound));
        assert!(!emits_read_all_by_key(&identity));
        assert_eq!(addressing_params(&identity), vec![Param::Id]);
        assert_eq!(container_name(&ModelSpec::new("post", "/user/id")), "post");
    }

    #[test]
    fn read_all_by_key_binds_a_parameter() {
        let key = PartitionKeyInfo::derive("/tenant/region/code").unwrap();
        let (query, parameter) = read_all_by_key_query(&key);
        assert_eq!(query, "SELECT * FROM c WHERE c.tenant.region.code = @tenantRegionCode");
        assert_eq!(parameter, "@tenantRegionCode");
    }
}
