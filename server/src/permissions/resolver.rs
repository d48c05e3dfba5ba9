//! Permission resolution logic.
//!
//! Decides whether an actor may perform an action against a role. The verdict
//! is the conjunction of two signals:
//!
//! - the user signal: the actor's authority over the target. For `assign`
//!   this is derived from the role hierarchy and replaces whatever the caller
//!   supplied; for every other action the caller's value is used as is.
//! - the app signal: whether the calling app's grant covers the action.
//!
//! Resolution order:
//! 1. Resolve an identifier target to a role (one lookup)
//! 2. For `assign` by a loaded user in a non-internal context, recompute the
//!    user signal from the hierarchy
//! 3. Permit iff both signals hold

use std::time::Duration;

use tracing::{debug, error};

use super::error::{LookupFailure, PermissionError};
use super::hierarchy::RoleHierarchy;
use super::models::{
    Action, AuthorizationQuery, LoadedPermissions, PermissionContext, Role, RoleId, RoleTarget,
};
use super::queries::RoleLookup;

/// Role permission resolver.
///
/// Holds only read-only state, so one instance can serve concurrent checks.
#[derive(Debug, Clone)]
pub struct RoleResolver<L> {
    lookup: L,
    hierarchy: RoleHierarchy,
    lookup_timeout: Option<Duration>,
}

impl<L: RoleLookup> RoleResolver<L> {
    /// Resolver using the default hierarchy and no lookup timeout.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            hierarchy: RoleHierarchy::default(),
            lookup_timeout: None,
        }
    }

    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: RoleHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Fail lookups that take longer than `timeout`.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    pub const fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Check whether the query is permitted.
    ///
    /// `Ok(())` permits. `Err(PermissionError::Denied)` is the ordinary deny;
    /// any lookup failure is also returned as an error, never as a permit.
    #[tracing::instrument(skip_all, fields(action = %query.action))]
    pub async fn permissible(&self, query: AuthorizationQuery) -> Result<(), PermissionError> {
        let AuthorizationQuery {
            mut target,
            action,
            context,
            loaded_permissions,
            has_user_permission,
            has_app_permission,
        } = query;

        let role = loop {
            match target {
                RoleTarget::Loaded(role) => break role,
                RoleTarget::Identifier(id) => {
                    let role = self.resolve(id).await.inspect_err(|e| {
                        error!(error = %e, "Failed to resolve role for permission check");
                    })?;
                    target = RoleTarget::Loaded(role);
                }
            }
        };

        let has_user_permission = self.user_signal(
            &role,
            &action,
            context,
            &loaded_permissions,
            has_user_permission,
        );

        if has_user_permission && has_app_permission {
            return Ok(());
        }

        debug!(
            role = %role.name,
            has_user_permission,
            has_app_permission,
            "Permission denied"
        );
        Err(PermissionError::Denied)
    }

    /// User-side signal for `role` after applying the hierarchy.
    ///
    /// Only `assign` by a loaded user outside an internal context consults the
    /// hierarchy; its result overrides `supplied`. Everything else returns
    /// `supplied` unchanged.
    #[must_use]
    pub fn user_signal(
        &self,
        role: &Role,
        action: &Action,
        context: PermissionContext,
        loaded_permissions: &LoadedPermissions,
        supplied: bool,
    ) -> bool {
        if !action.is_assign() || context.is_internal() {
            return supplied;
        }

        match &loaded_permissions.user {
            Some(user) => self.hierarchy.can_assign(&user.roles, &role.name),
            None => supplied,
        }
    }

    async fn resolve(&self, id: RoleId) -> Result<Role, LookupFailure> {
        let lookup = self.lookup.find_one(&id);

        let found = match self.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .map_err(|_| LookupFailure::TimedOut(id.clone()))?,
            None => lookup.await,
        }?;

        found.ok_or(LookupFailure::NotFound(id))
    }
}
