// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample(name: &str) -> Session {
    Session::single_repo(
        name.to_string(),
        "https://example.invalid/org/repo".to_string(),
        format!("/clone/root/{name}"),
        1000,
    )
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    let session = sample("my-session");

    store.save(&session).await.unwrap();
    let loaded = store.load("my-session").await.unwrap();
    assert_eq!(loaded, session);
}

#[tokio::test]
async fn load_tolerates_unknown_legacy_fields() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::create_dir_all(dir.path()).await.unwrap();
    let path = dir.path().join("legacy.json");
    tokio::fs::write(
        &path,
        r#"{"name":"legacy","repo_url":"https://example.invalid/org/repo","clone_path":"/x/legacy","created_at":1,"unknown_field":"ignored"}"#,
    )
    .await
    .unwrap();

    let store = SessionStore::new(dir.path().to_path_buf());
    let loaded = store.load("legacy").await.unwrap();
    assert_eq!(loaded.name, "legacy");
}

#[tokio::test]
async fn list_skips_unreadable_files_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.save(&sample("good")).await.unwrap();
    tokio::fs::write(dir.path().join("broken.json"), b"not json")
        .await
        .unwrap();

    let sessions = store.list().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].name, "good");
}

#[tokio::test]
async fn list_on_missing_directory_returns_empty() {
    let store = SessionStore::new(std::path::PathBuf::from("/nonexistent/session/dir"));
    let sessions = store.list().await.unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn delete_is_not_an_error_when_file_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.delete("never-existed").await.unwrap();
}

#[tokio::test]
async fn delete_removes_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.save(&sample("to-delete")).await.unwrap();
    assert!(store.exists("to-delete").await);

    store.delete("to-delete").await.unwrap();
    assert!(!store.exists("to-delete").await);
}

#[tokio::test]
async fn generate_unique_name_sanitizes_base() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    let name = store.generate_unique_name("My Org/Repo!!").await.unwrap();
    assert_eq!(name, "my-org-repo");
}

#[tokio::test]
async fn generate_unique_name_appends_suffix_on_collision() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.save(&sample("repo")).await.unwrap();

    let name = store.generate_unique_name("repo").await.unwrap();
    assert_eq!(name, "repo-1");
}

#[tokio::test]
async fn generate_unique_name_skips_taken_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().to_path_buf());
    store.save(&sample("repo")).await.unwrap();
    store.save(&sample("repo-1")).await.unwrap();

    let name = store.generate_unique_name("repo").await.unwrap();
    assert_eq!(name, "repo-2");
}
