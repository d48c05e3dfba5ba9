//! Role seniority and which roles each tier may assign.
//!
//! The hierarchy is a table ordered from most to least senior. A user's tier
//! is the first row whose role they hold; lower rows are never consulted once
//! a match is found.

use super::models::Role;

/// One row of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTier {
    pub name: String,
    /// Role names a holder of this tier may assign.
    pub assignable: Vec<String>,
}

impl RoleTier {
    pub fn new<I, S>(name: impl Into<String>, assignable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            assignable: assignable.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered role table, most senior first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    tiers: Vec<RoleTier>,
}

impl Default for RoleHierarchy {
    /// `Owner > Administrator > Editor > Author`.
    fn default() -> Self {
        Self::new(vec![
            RoleTier::new("Owner", ["Owner", "Administrator", "Editor", "Author"]),
            RoleTier::new("Administrator", ["Administrator", "Editor", "Author"]),
            RoleTier::new("Editor", ["Author"]),
            RoleTier::new("Author", Vec::<String>::new()),
        ])
    }
}

impl RoleHierarchy {
    pub const fn new(tiers: Vec<RoleTier>) -> Self {
        Self { tiers }
    }

    /// Most senior tier among `roles`, if any role is ranked.
    #[must_use]
    pub fn highest_tier(&self, roles: &[Role]) -> Option<&RoleTier> {
        roles
            .iter()
            .filter_map(|role| self.rank_of(&role.name))
            .min()
            .and_then(|rank| self.tiers.get(rank))
    }

    /// Role names assignable by a holder of `roles`. Empty when unranked.
    #[must_use]
    pub fn assignable_roles(&self, roles: &[Role]) -> &[String] {
        self.highest_tier(roles)
            .map(|tier| tier.assignable.as_slice())
            .unwrap_or_default()
    }

    /// Whether a holder of `roles` may assign the role named `target`.
    #[must_use]
    pub fn can_assign(&self, roles: &[Role], target: &str) -> bool {
        self.assignable_roles(roles).iter().any(|name| name == target)
    }

    /// Position of `name` in the table, `0` being most senior.
    #[must_use]
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.tiers.iter().position(|tier| tier.name == name)
    }

    pub fn tiers(&self) -> &[RoleTier] {
        &self.tiers
    }
}
