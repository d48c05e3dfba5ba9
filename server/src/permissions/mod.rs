//! Permission system types and utilities.
//!
//! A role permission check combines two independent signals:
//! - User signal: the actor's authority, from the role hierarchy for `assign`
//! - App signal: whether the calling app's declared grant covers the action
//!
//! Both must hold. Trusted internal calls skip the hierarchy.

pub mod error;
pub mod hierarchy;
pub mod models;
pub mod queries;
pub mod resolver;

pub use error::{LookupFailure, PermissionError, NO_PERMISSION_MESSAGE};
pub use hierarchy::{RoleHierarchy, RoleTier};
pub use models::*;
pub use queries::{find_role_by_id, list_user_roles, load_user_permissions, RoleLookup};
pub use resolver::RoleResolver;
