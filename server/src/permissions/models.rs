//! Types passed through a permission check.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }
}

/// Role identifier as received from a request, numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RoleId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Target of a role permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleTarget {
    /// Only the id is known; the role is looked up before checking.
    Identifier(RoleId),
    Loaded(Role),
}

impl From<Role> for RoleTarget {
    fn from(role: Role) -> Self {
        Self::Loaded(role)
    }
}

impl From<RoleId> for RoleTarget {
    fn from(id: RoleId) -> Self {
        Self::Identifier(id)
    }
}

/// Named operation being authorized.
///
/// Actions compare and hash by name, so `Other("read")` equals `Read`.
#[derive(Debug, Clone)]
pub enum Action {
    Browse,
    Read,
    Edit,
    Add,
    Destroy,
    /// Granting a role to a user.
    Assign,
    Other(String),
}

impl Action {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Browse => "browse",
            Self::Read => "read",
            Self::Edit => "edit",
            Self::Add => "add",
            Self::Destroy => "destroy",
            Self::Assign => "assign",
            Self::Other(name) => name,
        }
    }

    /// Whether this is the role assignment action, however it was built.
    #[must_use]
    pub fn is_assign(&self) -> bool {
        self.as_str() == Self::Assign.as_str()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        match name {
            "browse" => Self::Browse,
            "read" => Self::Read,
            "edit" => Self::Edit,
            "add" => Self::Add,
            "destroy" => Self::Destroy,
            "assign" => Self::Assign,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

/// Who is making the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionContext {
    /// Trusted system call. Skips role hierarchy checks.
    Internal,
    User(i64),
}

impl PermissionContext {
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Roles held by the requesting user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedUser {
    pub roles: Vec<Role>,
}

impl LoadedUser {
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}

/// Permission snapshot for one request. Built per request, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPermissions {
    pub user: Option<LoadedUser>,
}

impl LoadedPermissions {
    pub fn for_user(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user: Some(LoadedUser {
                roles: roles.into_iter().collect(),
            }),
        }
    }
}

/// A single role permission check.
#[derive(Debug, Clone)]
pub struct AuthorizationQuery {
    pub target: RoleTarget,
    pub action: Action,
    pub context: PermissionContext,
    pub loaded_permissions: LoadedPermissions,
    /// Actor-side signal computed by the caller.
    pub has_user_permission: bool,
    /// App-side signal computed by the caller from the app's grant.
    pub has_app_permission: bool,
}

impl AuthorizationQuery {
    /// Query with both signals unset (denied unless the hierarchy grants it).
    pub fn new(
        target: impl Into<RoleTarget>,
        action: impl Into<Action>,
        context: PermissionContext,
        loaded_permissions: LoadedPermissions,
    ) -> Self {
        Self {
            target: target.into(),
            action: action.into(),
            context,
            loaded_permissions,
            has_user_permission: false,
            has_app_permission: false,
        }
    }

    #[must_use]
    pub fn with_signals(mut self, has_user_permission: bool, has_app_permission: bool) -> Self {
        self.has_user_permission = has_user_permission;
        self.has_app_permission = has_app_permission;
        self
    }
}
