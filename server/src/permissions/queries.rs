//! Database queries for the permission system.
//!
//! The resolver only depends on [`RoleLookup`]; the Postgres implementation
//! lives here so handlers can pass a `PgPool` straight in.

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{LoadedPermissions, LoadedUser, Role, RoleId};

/// Resolves a role identifier to a role.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Find a role by id regardless of status. `Ok(None)` when absent.
    async fn find_one(&self, id: &RoleId) -> sqlx::Result<Option<Role>>;
}

#[async_trait]
impl RoleLookup for PgPool {
    async fn find_one(&self, id: &RoleId) -> sqlx::Result<Option<Role>> {
        find_role_by_id(self, id).await
    }
}

#[async_trait]
impl<T: RoleLookup + ?Sized> RoleLookup for std::sync::Arc<T> {
    async fn find_one(&self, id: &RoleId) -> sqlx::Result<Option<Role>> {
        (**self).find_one(id).await
    }
}

/// Get a role by numeric or string id.
#[tracing::instrument(skip(pool))]
pub async fn find_role_by_id(pool: &PgPool, id: &RoleId) -> sqlx::Result<Option<Role>> {
    match id {
        RoleId::Numeric(id) => {
            sqlx::query_as::<_, Role>(
                r"
                SELECT id, name, description
                FROM roles
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        }
        RoleId::Text(id) => {
            sqlx::query_as::<_, Role>(
                r"
                SELECT id, name, description
                FROM roles
                WHERE id::text = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        }
    }
}

/// Get all roles held by a user, ordered by id.
pub async fn list_user_roles(pool: &PgPool, user_id: i64) -> sqlx::Result<Vec<Role>> {
    sqlx::query_as::<_, Role>(
        r"
        SELECT r.id, r.name, r.description
        FROM roles r
        INNER JOIN roles_users ru ON ru.role_id = r.id
        WHERE ru.user_id = $1
        ORDER BY r.id ASC
        ",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Build the permission snapshot for one request by `user_id`.
#[tracing::instrument(skip(pool))]
pub async fn load_user_permissions(pool: &PgPool, user_id: i64) -> sqlx::Result<LoadedPermissions> {
    let roles = list_user_roles(pool, user_id).await?;

    Ok(LoadedPermissions {
        user: Some(LoadedUser { roles }),
    })
}
