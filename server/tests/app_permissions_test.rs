//! Integration tests for reading app permission grants from disk.

use std::path::Path;

use press_server::apps::{AppGrant, AppPermissions, AppRegistry, ManifestError, MANIFEST_FILE};
use press_server::permissions::Action;
use serde_json::json;

fn install_app(apps_dir: &Path, name: &str, manifest: Option<&str>) {
    let app_dir = apps_dir.join(name);
    std::fs::create_dir_all(&app_dir).unwrap();
    if let Some(contents) = manifest {
        std::fs::write(app_dir.join(MANIFEST_FILE), contents).unwrap();
    }
}

#[tokio::test]
async fn test_app_without_manifest_gets_exact_default() {
    let dir = tempfile::tempdir().unwrap();
    install_app(dir.path(), "bare", None);

    let grant = AppPermissions::new(dir.path().join("bare")).read().await.unwrap();
    assert_eq!(
        serde_json::to_value(grant).unwrap(),
        json!({ "posts": ["browse", "read"] })
    );
}

#[tokio::test]
async fn test_declared_grant_is_returned_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let declared = json!({
        "posts": ["browse", "read", "add"],
        "settings": ["read"],
        "tags": []
    });
    let manifest = json!({
        "name": "scheduler",
        "version": "2.1.0",
        "ghost": { "permissions": declared.clone() }
    });
    install_app(dir.path(), "scheduler", Some(&manifest.to_string()));

    let grant = AppPermissions::new(dir.path().join("scheduler"))
        .read()
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&grant).unwrap(), declared);
    assert_eq!(grant.actions_for("tags"), Some(&[][..]));
}

#[tokio::test]
async fn test_invalid_json_reports_parser_message() {
    let dir = tempfile::tempdir().unwrap();
    let contents = r#"{"name": "broken", "version": "1.0.0", }"#;
    install_app(dir.path(), "broken", Some(contents));

    let parser_message = serde_json::from_str::<serde_json::Value>(contents)
        .unwrap_err()
        .to_string();

    let err = AppPermissions::new(dir.path().join("broken"))
        .read()
        .await
        .unwrap_err();
    match err {
        ManifestError::Malformed { message, .. } => assert_eq!(message, parser_message),
        other => panic!("expected malformed manifest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_manifest_changes_are_seen_on_next_read() {
    let dir = tempfile::tempdir().unwrap();
    install_app(dir.path(), "live", None);
    let perms = AppPermissions::new(dir.path().join("live"));

    assert_eq!(perms.read().await.unwrap(), AppGrant::default_grant());

    std::fs::write(
        perms.package_path(),
        r#"{"name": "live", "version": "1.0.0", "ghost": {"permissions": {"users": ["browse"]}}}"#,
    )
    .unwrap();

    let grant = perms.read().await.unwrap();
    assert!(grant.allows("users", &Action::Browse));
    assert!(!grant.allows("posts", &Action::Browse));
}

#[tokio::test]
async fn test_registry_feeds_app_signal() {
    let dir = tempfile::tempdir().unwrap();
    install_app(dir.path(), "bare", None);
    install_app(
        dir.path(),
        "importer",
        Some(r#"{"name": "importer", "version": "0.3.0", "ghost": {"permissions": {"posts": ["add"]}}}"#),
    );

    let registry = AppRegistry::load(
        dir.path(),
        &["bare".to_string(), "importer".to_string()],
        &AppGrant::default_grant(),
    )
    .await
    .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.has_app_permission(Some("bare"), "posts", &Action::Read));
    assert!(!registry.has_app_permission(Some("bare"), "posts", &Action::Add));
    assert!(registry.has_app_permission(Some("importer"), "posts", &Action::Add));
    assert!(!registry.has_app_permission(Some("importer"), "posts", &Action::Read));
    assert!(!registry.has_app_permission(Some("uninstalled"), "posts", &Action::Read));
}
