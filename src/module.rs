// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Module assembly.
//!
//! Validates the loaded models and combines their operation sets into one
//! [`ModuleDef`], the input every emitter renders.
//!
//! ```text
//! [ModelSpec] ──► PartitionKeyInfo::derive ──► OperationSet::synthesize
//!                                                      │
//!                         GeneratorConfig ─────────────┤
//!                                                      ▼
//!                                                  ModuleDef
//! ```
//!
//! Model order is preserved: container definitions, client fields and
//! factory initialisation all follow it.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    GenerateError, GeneratorConfig,
    operations::OperationSet,
    partition::PartitionKeyInfo,
    registry::ModelSpec,
    utils::naming::{is_lowercase_identifier, is_rust_ident, is_type_name}
};

/// Parameter names a non-identity partition key may not take.
pub const RESERVED_PARAMS: &[&str] = &["id", "body", "options"];

/// Type names the generated module imports or relies on from the prelude.
pub const RESERVED_TYPES: &[&str] = &[
    "Container",
    "ContainerDefinition",
    "Database",
    "JsonValue",
    "QueryIter",
    "RequestOptions",
    "SqlParameter",
    "SqlQuery",
    "StoreError",
    "Option",
    "Result",
    "String",
    "Vec"
];

/// Everything an emitter needs for one output module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    /// Operation sets in model order.
    pub models: Vec<OperationSet>,

    /// Path model types are imported from.
    pub models_module: String,

    /// Path runtime types are imported from.
    pub runtime_crate: String,

    /// Client factory function name.
    pub factory_name: String,

    /// Aggregate client type name.
    pub client_type: String,

    /// Alias for the client type.
    pub type_alias: Option<String>
}

impl ModuleDef {
    /// Validate `specs` and build the module.
    ///
    /// # Errors
    ///
    /// The first invalid configuration setting, duplicate or badly named
    /// model, malformed partition key, or reserved key parameter. Every
    /// model-level error names its model.
    pub fn assemble(specs: Vec<ModelSpec>, config: &GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;

        let mut seen = HashSet::new();
        let mut type_names = HashSet::new();
        let mut models = Vec::with_capacity(specs.len());
        for spec in specs {
            if !is_lowercase_identifier(&spec.name) || !is_rust_ident(&spec.name) {
                return Err(GenerateError::InvalidModelName {
                    file: spec.name
                });
            }
            if !seen.insert(spec.name.clone()) {
                return Err(GenerateError::DuplicateModel {
                    model: spec.name
                });
            }
            if !is_type_name(&spec.type_name) {
                return Err(GenerateError::InvalidTypeName {
                    model:     spec.name,
                    type_name: spec.type_name
                });
            }
            let accessor = format!("{}Operations", spec.type_name);
            if RESERVED_TYPES.contains(&spec.type_name.as_str())
                || !type_names.insert(spec.type_name.clone())
                || !type_names.insert(accessor)
            {
                return Err(GenerateError::ReservedModelType {
                    model:     spec.name,
                    type_name: spec.type_name
                });
            }

            let partition_key = derive_partition_key(&spec)?;
            let set = OperationSet::synthesize(spec, partition_key);
            debug!(
                model = %set.model.name,
                param = %set.partition_key.param_name,
                operations = set.operations.len(),
                "synthesized operations"
            );
            models.push(set);
        }

        check_client_names(&models, config)?;

        Ok(Self {
            models,
            models_module: config.models_module.clone(),
            runtime_crate: config.runtime_crate.clone(),
            factory_name: config.factory_name.clone(),
            client_type: config.client_type.clone(),
            type_alias: config.type_alias.clone()
        })
    }

    /// Model names in emission order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|set| set.model.name.as_str())
    }
}

fn derive_partition_key(spec: &ModelSpec) -> Result<PartitionKeyInfo, GenerateError> {
    let partition_key = PartitionKeyInfo::derive(&spec.raw_partition_key_path).map_err(|source| {
        GenerateError::MalformedPartitionKey {
            model:  spec.name.clone(),
            path:   spec.raw_partition_key_path.clone(),
            source
        }
    })?;

    let snake_name = partition_key.snake_name();
    let reserved = [partition_key.param_name.as_str(), snake_name.as_str()]
        .iter()
        .any(|name| RESERVED_PARAMS.contains(name));
    if !partition_key.is_identity && reserved {
        return Err(GenerateError::ReservedPartitionKey {
            model: spec.name.clone(),
            param: partition_key.param_name
        });
    }
    Ok(partition_key)
}

/// Client type and alias must not shadow a model type.
fn check_client_names(models: &[OperationSet], config: &GeneratorConfig) -> Result<(), GenerateError> {
    let clashes = |name: &str| {
        models
            .iter()
            .any(|set| set.model.type_name == name || format!("{}Operations", set.model.type_name) == name)
    };

    if clashes(&config.client_type) {
        return Err(GenerateError::InvalidConfig {
            setting: "client_type",
            value:   config.client_type.clone()
        });
    }
    if let Some(alias) = &config.type_alias
        && clashes(alias)
    {
        return Err(GenerateError::InvalidConfig {
            setting: "type_alias",
            value:   alias.clone()
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<ModelSpec> {
        vec![
            ModelSpec::new("comment", "/post/id"),
            ModelSpec::new("post", "/user/id"),
            ModelSpec::new("user", "/id")
        ]
    }

    #[test]
    fn preserves_model_order() {
        let module = ModuleDef::assemble(specs(), &GeneratorConfig::default()).unwrap();
        assert_eq!(module.model_names().collect::<Vec<_>>(), vec!["comment", "post", "user"]);
        assert_eq!(module.client_type, "Client");
        assert_eq!(module.factory_name, "client");
    }

    #[test]
    fn malformed_key_names_the_model() {
        let specs = vec![ModelSpec::new("user", "/id"), ModelSpec::new("post", "/")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.model(), Some("post"));
        assert!(matches!(err, GenerateError::MalformedPartitionKey { .. }));
    }

    #[test]
    fn duplicate_models_are_rejected() {
        let specs = vec![ModelSpec::new("user", "/id"), ModelSpec::new("user", "/tenant/id")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateModel { ref model } if model == "user"));
    }

    #[test]
    fn reserved_key_parameter_is_rejected() {
        let specs = vec![ModelSpec::new("draft", "/body")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::ReservedPartitionKey { ref param, .. } if param == "body"));

        let specs = vec![ModelSpec::new("draft", "/Id")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::ReservedPartitionKey { ref param, .. } if param == "Id"));
    }

    #[test]
    fn keyword_model_names_are_rejected() {
        let specs = vec![ModelSpec::new("type", "/id")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidModelName { .. }));
    }

    #[test]
    fn runtime_type_names_are_reserved() {
        let specs = vec![ModelSpec::new("container", "/id")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::ReservedModelType { ref type_name, .. } if type_name == "Container"));
        assert_eq!(err.model(), Some("container"));
    }

    #[test]
    fn model_type_cannot_shadow_an_accessor() {
        for specs in [
            vec![ModelSpec::new("comment", "/id"), ModelSpec::new("comment_operations", "/id")],
            vec![ModelSpec::new("comment_operations", "/id"), ModelSpec::new("comment", "/id")]
        ] {
            let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
            assert!(matches!(err, GenerateError::ReservedModelType { ref type_name, .. } if type_name.starts_with("Comment")));
        }
    }

    #[test]
    fn invalid_type_name_is_an_error() {
        let mut spec = ModelSpec::new("user", "/id");
        spec.type_name = "User-Record".to_owned();
        let err = ModuleDef::assemble(vec![spec], &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidTypeName { ref type_name, .. } if type_name == "User-Record"));
        assert_eq!(err.model(), Some("user"));

        let mut spec = ModelSpec::new("user", "/id");
        spec.type_name = "user".to_owned();
        let err = ModuleDef::assemble(vec![spec], &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidTypeName { .. }));
    }

    #[test]
    fn client_type_cannot_shadow_a_model() {
        let specs = vec![ModelSpec::new("client", "/id")];
        let err = ModuleDef::assemble(specs, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfig { setting: "client_type", .. }));
    }

    #[test]
    fn empty_model_list_is_allowed() {
        let module = ModuleDef::assemble(Vec::new(), &GeneratorConfig::default()).unwrap();
        assert!(module.models.is_empty());
    }
}
