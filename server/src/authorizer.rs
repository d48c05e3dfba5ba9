//! Request-level authorization.
//!
//! Joins the two halves of a check: the app signal comes from the loaded
//! [`AppRegistry`], the user signal and verdict from the [`RoleResolver`].

use sqlx::PgPool;

use crate::apps::AppRegistry;
use crate::config::Config;
use crate::permissions::{
    load_user_permissions, Action, AuthorizationQuery, LookupFailure, PermissionContext,
    PermissionError, RoleId, RoleLookup, RoleResolver,
};

/// Object name apps must be granted to assign roles.
pub const ROLES_OBJECT: &str = "roles";

/// Shared authorization state, built once at startup.
#[derive(Debug, Clone)]
pub struct Authorizer<L> {
    registry: AppRegistry,
    resolver: RoleResolver<L>,
}

impl<L: RoleLookup> Authorizer<L> {
    pub const fn new(registry: AppRegistry, resolver: RoleResolver<L>) -> Self {
        Self { registry, resolver }
    }

    pub const fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Check `query` on behalf of `app` acting on `object`.
    ///
    /// The app signal in `query` is replaced by the registry's answer; `None`
    /// means the call did not come from an app.
    pub async fn authorize(
        &self,
        app: Option<&str>,
        object: &str,
        query: AuthorizationQuery,
    ) -> Result<(), PermissionError> {
        let has_app_permission = self.registry.has_app_permission(app, object, &query.action);

        self.resolver
            .permissible(AuthorizationQuery {
                has_app_permission,
                ..query
            })
            .await
    }
}

impl Authorizer<PgPool> {
    /// Authorizer backed by Postgres role lookups, using the configured
    /// lookup timeout.
    pub fn with_pool(registry: AppRegistry, pool: PgPool, config: &Config) -> Self {
        let resolver = RoleResolver::new(pool).with_lookup_timeout(config.permission_lookup_timeout);
        Self::new(registry, resolver)
    }

    /// Whether `user_id` may assign the role `role_id`, optionally through
    /// `app`. The user's roles are loaded fresh for every call.
    #[tracing::instrument(skip(self))]
    pub async fn check_assignment(
        &self,
        app: Option<&str>,
        user_id: i64,
        role_id: RoleId,
    ) -> Result<(), PermissionError> {
        let loaded = load_user_permissions(self.resolver.lookup(), user_id)
            .await
            .map_err(LookupFailure::from)?;

        let query = AuthorizationQuery::new(
            role_id,
            Action::Assign,
            PermissionContext::User(user_id),
            loaded,
        );
        self.authorize(app, ROLES_OBJECT, query).await
    }
}
