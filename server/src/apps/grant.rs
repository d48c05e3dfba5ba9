//! Capability grants declared by apps.
//!
//! A grant maps an object type (e.g. `posts`) to the actions an app may
//! perform on it. Grants are loaded once per app and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::permissions::Action;

/// Grant used for any app that declares no explicit capabilities.
pub const DEFAULT_APP_GRANT: &[(&str, &[&str])] = &[("posts", &["browse", "read"])];

/// Mapping of object type to the allowed action names, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppGrant(BTreeMap<String, Vec<String>>);

impl AppGrant {
    /// The fallback grant, `{ posts: [browse, read] }`.
    #[must_use]
    pub fn default_grant() -> Self {
        DEFAULT_APP_GRANT
            .iter()
            .map(|(object, actions)| (*object, actions.iter().copied()))
            .collect()
    }

    /// Build a grant from a `ghost.permissions` JSON value.
    ///
    /// Returns the name of the first offending object when the value is not
    /// an object of string arrays. A non-object value reports an empty name.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err(String::new());
        };

        let mut grant = BTreeMap::new();
        for (object, actions) in map {
            let Value::Array(actions) = actions else {
                return Err(object.clone());
            };

            let actions = actions
                .iter()
                .map(|a| a.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| object.clone())?;

            grant.insert(object.clone(), actions);
        }

        Ok(Self(grant))
    }

    /// Whether the grant allows `action` on `object`.
    #[must_use]
    pub fn allows(&self, object: &str, action: &Action) -> bool {
        self.actions_for(object)
            .is_some_and(|actions| actions.iter().any(|a| a == action.as_str()))
    }

    /// Actions declared for `object`, if any.
    #[must_use]
    pub fn actions_for(&self, object: &str) -> Option<&[String]> {
        self.0.get(object).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<O, A, I> FromIterator<(O, I)> for AppGrant
where
    O: Into<String>,
    A: Into<String>,
    I: IntoIterator<Item = A>,
{
    fn from_iter<T: IntoIterator<Item = (O, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(object, actions)| {
                    (object.into(), actions.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_grant_is_posts_browse_read() {
        let grant = AppGrant::default_grant();
        assert_eq!(
            serde_json::to_value(&grant).unwrap(),
            json!({ "posts": ["browse", "read"] })
        );
    }

    #[test]
    fn test_default_grant_allows_reading_posts_only() {
        let grant = AppGrant::default_grant();
        assert!(grant.allows("posts", &Action::Browse));
        assert!(grant.allows("posts", &Action::Read));
        assert!(!grant.allows("posts", &Action::Edit));
        assert!(!grant.allows("users", &Action::Browse));
    }

    #[test]
    fn test_from_value_keeps_action_order() {
        let value = json!({ "tags": ["read", "browse", "add"] });
        let grant = AppGrant::from_value(&value).unwrap();
        assert_eq!(
            grant.actions_for("tags").unwrap(),
            &["read".to_string(), "browse".to_string(), "add".to_string()]
        );
    }

    #[test]
    fn test_from_value_empty_object() {
        let grant = AppGrant::from_value(&json!({})).unwrap();
        assert!(grant.is_empty());
    }

    #[test]
    fn test_from_value_rejects_non_array_actions() {
        let err = AppGrant::from_value(&json!({ "posts": "read" })).unwrap_err();
        assert_eq!(err, "posts");
    }

    #[test]
    fn test_from_value_rejects_non_string_action() {
        let err = AppGrant::from_value(&json!({ "posts": ["read", 3] })).unwrap_err();
        assert_eq!(err, "posts");
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = AppGrant::from_value(&json!(["posts"])).unwrap_err();
        assert!(err.is_empty());
    }

    #[test]
    fn test_custom_action_matches_by_name() {
        let grant: AppGrant = [("posts", ["publish"])].into_iter().collect();
        assert!(grant.allows("posts", &Action::from("publish")));
    }
}
