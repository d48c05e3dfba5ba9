//! Postgres-backed role lookup tests.
//!
//! Run with: `cargo test --test role_lookup_test -- --ignored`

use press_server::apps::AppRegistry;
use press_server::authorizer::Authorizer;
use press_server::config::Config;
use press_server::permissions::{
    find_role_by_id, load_user_permissions, Action, AuthorizationQuery, PermissionContext,
    RoleId, RoleResolver,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Helper to create a single-connection test pool.
///
/// The fixtures are temp tables, which only live on the connection that
/// created them.
async fn create_test_pool() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/press_test".into());

    PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// Insert the default roles and one Editor user. Returns the user id.
async fn seed(pool: &PgPool) -> i64 {
    sqlx::query(
        r"
        CREATE TEMP TABLE roles (id BIGINT PRIMARY KEY, name TEXT NOT NULL, description TEXT)
        ",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("CREATE TEMP TABLE roles_users (role_id BIGINT NOT NULL, user_id BIGINT NOT NULL)")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        r"
        INSERT INTO roles (id, name) VALUES
            (1, 'Administrator'), (2, 'Editor'), (3, 'Author'), (4, 'Owner')
        ",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO roles_users (role_id, user_id) VALUES (2, 42)")
        .execute(pool)
        .await
        .unwrap();
    42
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_find_role_by_numeric_and_text_id() {
    let pool = create_test_pool().await;
    seed(&pool).await;

    let by_number = find_role_by_id(&pool, &RoleId::Numeric(2)).await.unwrap();
    let by_text = find_role_by_id(&pool, &RoleId::Text("2".into())).await.unwrap();
    assert_eq!(by_number.as_ref().map(|r| r.name.as_str()), Some("Editor"));
    assert_eq!(by_number, by_text);

    assert!(find_role_by_id(&pool, &RoleId::Numeric(99))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_editor_assigns_author_through_pool() {
    let pool = create_test_pool().await;
    let user_id = seed(&pool).await;

    let loaded = load_user_permissions(&pool, user_id).await.unwrap();
    let resolver = RoleResolver::new(pool.clone());

    let author = AuthorizationQuery::new(
        RoleId::Numeric(3),
        Action::Assign,
        PermissionContext::User(user_id),
        loaded.clone(),
    )
    .with_signals(false, true);
    assert!(resolver.permissible(author).await.is_ok());

    let admin = AuthorizationQuery::new(
        RoleId::Numeric(1),
        Action::Assign,
        PermissionContext::User(user_id),
        loaded,
    )
    .with_signals(true, true);
    assert!(resolver.permissible(admin).await.is_err());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_check_assignment_loads_roles_from_pool() {
    let pool = create_test_pool().await;
    let user_id = seed(&pool).await;
    let auth = Authorizer::with_pool(AppRegistry::default(), pool, &Config::default_for_test());

    assert!(auth
        .check_assignment(None, user_id, RoleId::Numeric(3))
        .await
        .is_ok());
    assert!(auth
        .check_assignment(None, user_id, RoleId::Text("2".into()))
        .await
        .is_err());
}
