// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use blog_demo::{
    CONTAINERS, Documents, client,
    documents::{CommentOperations, PostOperations, UserOperations},
    models::{comment::Comment, post::Post, post::PostRef, user::User, user::UserRef}
};
use docstore_core::{Database, MemoryStore, RequestOptions, SqlParameter, StoreError};
use futures::TryStreamExt;

fn documents() -> Documents {
    let store = MemoryStore::with_containers(CONTAINERS).with_page_size(2);
    client(&Database::new("blog", Arc::new(store)))
}

fn user(id: &str) -> User {
    User {
        id:    id.to_owned(),
        name:  format!("user {id}"),
        email: format!("{id}@example.com")
    }
}

fn post(id: &str, user: &str, title: &str) -> Post {
    Post {
        id:        id.to_owned(),
        title:     title.to_owned(),
        body:      String::new(),
        published: true,
        user:      UserRef {
            id: user.to_owned()
        }
    }
}

fn comment(id: &str, post: &str, body: &str) -> Comment {
    Comment {
        id:     id.to_owned(),
        body:   body.to_owned(),
        post:   PostRef {
            id: post.to_owned()
        },
        author: UserRef {
            id: "ada".to_owned()
        }
    }
}

#[test]
fn containers_follow_model_order() {
    let names: Vec<_> = CONTAINERS.iter().map(|def| def.name).collect();
    assert_eq!(names, vec!["comment", "post", "user"]);
    assert_eq!(CONTAINERS[0].partition_key_path, "/post/id");
    assert_eq!(CommentOperations::PARTITION_KEY, "/post/id");
    assert_eq!(PostOperations::CONTAINER, "post");
    assert_eq!(UserOperations::PARTITION_KEY, "/id");
}

#[tokio::test]
async fn create_then_read() {
    let documents = documents();
    let created = documents
        .comment
        .create(&comment("c1", "p1", "first"), None)
        .await
        .unwrap();
    assert_eq!(created, comment("c1", "p1", "first"));

    let read = documents.comment.read("c1", "p1", None).await.unwrap();
    assert_eq!(read, Some(created));
}

#[tokio::test]
async fn create_assigns_missing_id() {
    let documents = documents();
    let created = documents
        .post
        .create(&post("", "ada", "untitled"), None)
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let read = documents
        .post
        .read_or_err(&created.id, "ada", None)
        .await
        .unwrap();
    assert_eq!(read.title, "untitled");
}

#[tokio::test]
async fn read_in_wrong_partition_is_none() {
    let documents = documents();
    documents
        .comment
        .create(&comment("c1", "p1", "first"), None)
        .await
        .unwrap();
    assert_eq!(documents.comment.read("c1", "p2", None).await.unwrap(), None);
}

#[tokio::test]
async fn read_or_err_names_container_and_id() {
    let documents = documents();
    let err = documents
        .comment
        .read_or_err("missing", "p1", None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "comment with id: missing not found.");
}

#[tokio::test]
async fn identity_key_reads_by_id_alone() {
    let documents = documents();
    documents.user.create(&user("ada"), None).await.unwrap();

    let read = documents.user.read_or_err("ada", None).await.unwrap();
    assert_eq!(read, user("ada"));
    assert_eq!(documents.user.read("bob", None).await.unwrap(), None);
}

#[tokio::test]
async fn read_all_by_partition_key() {
    let documents = documents();
    for (id, post_id) in [("c1", "p1"), ("c2", "p2"), ("c3", "p1"), ("c4", "p1")] {
        documents
            .comment
            .create(&comment(id, post_id, "text"), None)
            .await
            .unwrap();
    }

    let mut thread = documents
        .comment
        .read_all_by_post_id("p1", None)
        .fetch_all()
        .await
        .unwrap();
    thread.sort_by(|a, b| a.id.cmp(&b.id));
    let ids: Vec<_> = thread.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c3", "c4"]);

    let all = documents.comment.read_all(None).fetch_all().await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn partition_value_cannot_inject_predicates() {
    let documents = documents();
    documents
        .comment
        .create(&comment("c1", "p1", "text"), None)
        .await
        .unwrap();

    let hostile = "p1' OR 1 = 1 --";
    let matched = documents
        .comment
        .read_all_by_post_id(hostile, None)
        .fetch_all()
        .await
        .unwrap();
    assert!(matched.is_empty());
}

#[tokio::test]
async fn read_all_pages_lazily() {
    let documents = documents();
    for id in ["a", "b", "c"] {
        documents.user.create(&user(id), None).await.unwrap();
    }

    let mut users = documents.user.read_all(None);
    let first = users.fetch_next().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert!(users.has_more_results());
    let second = users.fetch_next().await.unwrap().unwrap();
    assert_eq!(second.len(), 1);
    assert!(users.fetch_next().await.is_none());

    let streamed: Vec<User> = documents
        .user
        .read_all(None)
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(streamed.len(), 3);
}

#[tokio::test]
async fn replace_overwrites() {
    let documents = documents();
    let mut created = documents
        .post
        .create(&post("p1", "ada", "draft"), None)
        .await
        .unwrap();
    created.title = "final".to_owned();

    let replaced = documents
        .post
        .replace("p1", "ada", &created, None)
        .await
        .unwrap();
    assert_eq!(replaced.title, "final");
    assert_eq!(
        documents.post.read_or_err("p1", "ada", None).await.unwrap().title,
        "final"
    );
}

#[tokio::test]
async fn replace_missing_is_not_found() {
    let documents = documents();
    let err = documents
        .user
        .replace("ghost", &user("ghost"), None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn stale_etag_is_rejected() {
    let documents = documents();
    documents.user.create(&user("ada"), None).await.unwrap();

    let options = RequestOptions::default().with_if_match("\"stale\"");
    let err = documents
        .user
        .delete("ada", Some(&options))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::PreconditionFailed { .. }));
}

#[tokio::test]
async fn delete_removes_item() {
    let documents = documents();
    documents
        .comment
        .create(&comment("c1", "p1", "bye"), None)
        .await
        .unwrap();

    documents.comment.delete("c1", "p1", None).await.unwrap();
    assert_eq!(documents.comment.read("c1", "p1", None).await.unwrap(), None);

    let err = documents.comment.delete("c1", "p1", None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn duplicate_create_conflicts() {
    let documents = documents();
    documents.user.create(&user("ada"), None).await.unwrap();
    let err = documents.user.create(&user("ada"), None).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));
}

#[tokio::test]
async fn query_is_untyped_and_cross_partition() {
    let documents = documents();
    for (id, user_id, title) in [("p1", "ada", "Hello"), ("p2", "bob", "Hello"), ("p3", "ada", "Other")] {
        documents
            .post
            .create(&post(id, user_id, title), None)
            .await
            .unwrap();
    }

    let rows = documents
        .post
        .query("WHERE c.title = @title", [SqlParameter::new("@title", "Hello")])
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row["title"], "Hello");
        assert!(row.get("_etag").is_none());
        assert!(row.get("_rid").is_none());
    }

    let everything = documents
        .post
        .query("", Vec::<SqlParameter>::new())
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}
