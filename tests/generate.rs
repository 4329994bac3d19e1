// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::{
    fs,
    path::{Path, PathBuf}
};

use docstore_codegen::{
    GenerateError, GeneratorConfig, ModelSpec, RustEmitter, WriteOutcome, check, generate,
    generate_with, render
};

fn fixtures(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn config(models: &str, out: &Path) -> GeneratorConfig {
    GeneratorConfig::new(fixtures(models), out.join("documents.rs"))
}

#[test]
fn generates_one_accessor_per_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("models", dir.path());

    let report = generate(&config).unwrap();
    assert_eq!(report.models, vec!["comment", "post", "user"]);
    assert_eq!(report.outcome, WriteOutcome::Created);

    let source = fs::read_to_string(&config.out_file).unwrap();
    assert!(source.starts_with("// @generated by docstore-codegen from 3 models."));
    for accessor in ["CommentOperations", "PostOperations", "UserOperations"] {
        assert!(source.contains(&format!("pub struct {accessor} {{")));
    }
    assert!(source.contains("pub fn client(database: &Database) -> Client"));
    assert!(source.contains("pub type Documents = Client;"));
}

#[test]
fn second_run_is_byte_identical_and_skips_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("models", dir.path());

    generate(&config).unwrap();
    let first = fs::read_to_string(&config.out_file).unwrap();
    let report = generate(&config).unwrap();
    let second = fs::read_to_string(&config.out_file).unwrap();

    assert_eq!(report.outcome, WriteOutcome::Unchanged);
    assert_eq!(first, second);
}

#[test]
fn models_follow_file_name_order() {
    let source = render(&config("models", Path::new("unused"))).unwrap();
    let comment = source.find("ContainerDefinition::new(\"comment\", \"/post/id\")").unwrap();
    let post = source.find("ContainerDefinition::new(\"post\", \"/user/id\")").unwrap();
    let user = source.find("ContainerDefinition::new(\"user\", \"/id\")").unwrap();
    assert!(comment < post && post < user);
}

#[test]
fn identity_key_has_no_partition_listing() {
    let source = render(&config("models", Path::new("unused"))).unwrap();
    assert!(source.contains("pub fn read_all_by_post_id("));
    assert!(source.contains("pub fn read_all_by_user_id("));
    assert!(!source.contains("read_all_by_id"));
}

#[test]
fn partition_values_are_bound_as_parameters() {
    let source = render(&config("models", Path::new("unused"))).unwrap();
    assert!(source.contains("\"SELECT * FROM c WHERE c.post.id = @postId\""));
    assert!(source.contains("\"SELECT * FROM c WHERE c.user.id = @userId\""));
    assert!(source.contains(".with_parameter(\"@postId\", post_id)"));
}

#[test]
fn missing_partition_key_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("broken", dir.path());

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, GenerateError::MissingPartitionKey { ref model } if model == "post"));
    assert!(err.to_string().contains("`post`"));
    assert!(!config.out_file.exists());
}

#[test]
fn failure_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("broken", dir.path());
    fs::write(&config.out_file, "previous").unwrap();

    assert!(generate(&config).is_err());
    assert_eq!(fs::read_to_string(&config.out_file).unwrap(), "previous");
}

#[test]
fn adding_a_model_updates_the_output() {
    let models = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::copy(fixtures("models/user.rs"), models.path().join("user.rs")).unwrap();
    let config = GeneratorConfig::new(models.path(), out.path().join("documents.rs"));

    assert_eq!(generate(&config).unwrap().models, vec!["user"]);

    fs::copy(fixtures("models/post.rs"), models.path().join("post.rs")).unwrap();
    let report = generate(&config).unwrap();
    assert_eq!(report.models, vec!["post", "user"]);
    assert_eq!(report.outcome, WriteOutcome::Updated);
}

#[test]
fn check_reports_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config("models", dir.path());

    assert_eq!(check(&config).unwrap(), WriteOutcome::Created);
    generate(&config).unwrap();
    assert_eq!(check(&config).unwrap(), WriteOutcome::Unchanged);

    fs::write(&config.out_file, "// edited by hand\n").unwrap();
    assert_eq!(check(&config).unwrap(), WriteOutcome::Updated);
}

#[test]
fn explicit_specs_skip_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new("does-not-exist", dir.path().join("documents.rs"));
    let specs = vec![ModelSpec::new("tenant", "/region/code")];

    let report = generate_with(&specs, &RustEmitter, &config).unwrap();
    assert_eq!(report.models, vec!["tenant"]);

    let source = fs::read_to_string(&config.out_file).unwrap();
    assert!(source.contains("pub fn read_all_by_region_code("));
    assert!(source.contains("use crate::models::tenant::Tenant;"));
}

#[test]
fn colliding_or_invalid_type_names_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new("does-not-exist", dir.path().join("documents.rs"));

    let specs = vec![ModelSpec::new("comment", "/id"), ModelSpec::new("comment_operations", "/id")];
    let err = generate_with(&specs, &RustEmitter, &config).unwrap_err();
    assert_eq!(err.model(), Some("comment_operations"));

    let mut spec = ModelSpec::new("user", "/id");
    spec.type_name = "User-Record".to_owned();
    let specs = vec![spec];
    let err = generate_with(&specs, &RustEmitter, &config).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidTypeName { .. }));
    assert!(!config.out_file.exists());
}

#[test]
fn non_utf8_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("documents.rs");
    fs::write(&out, [0xff, 0xfe, 0x00]).unwrap();

    let report = generate(&config("models", dir.path())).unwrap();
    assert_eq!(report.outcome, WriteOutcome::Updated);
    assert!(fs::read_to_string(&out).unwrap().contains("pub struct CommentOperations"));
}
