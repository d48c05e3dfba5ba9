//! Grants for all active apps, loaded once at startup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;

use super::error::ManifestError;
use super::grant::AppGrant;
use super::permissions::AppPermissions;
use crate::permissions::Action;

/// Read-only map of app name to its declared grant.
///
/// Cheap to clone; all clones share the same grants.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    grants: Arc<HashMap<String, AppGrant>>,
}

impl AppRegistry {
    /// Read the grant of every app in `active_apps` under `apps_dir`.
    ///
    /// Manifests are read concurrently. The first manifest error aborts the
    /// whole load.
    #[tracing::instrument(skip_all, fields(apps_dir = %apps_dir.display()))]
    pub async fn load(
        apps_dir: &Path,
        active_apps: &[String],
        default_grant: &AppGrant,
    ) -> Result<Self, ManifestError> {
        let reads = active_apps.iter().map(|name| async move {
            let grant = AppPermissions::new(apps_dir.join(name))
                .with_default_grant(default_grant.clone())
                .read()
                .await?;
            Ok::<_, ManifestError>((name.clone(), grant))
        });

        let grants: HashMap<_, _> = try_join_all(reads).await?.into_iter().collect();
        info!(count = grants.len(), "Loaded app permissions");

        Ok(Self {
            grants: Arc::new(grants),
        })
    }

    pub fn from_grants(grants: impl IntoIterator<Item = (String, AppGrant)>) -> Self {
        Self {
            grants: Arc::new(grants.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn grant(&self, app: &str) -> Option<&AppGrant> {
        self.grants.get(app)
    }

    /// App-side permission signal for a request.
    ///
    /// Calls not made on behalf of an app pass. Unknown apps fail.
    #[must_use]
    pub fn has_app_permission(&self, app: Option<&str>, object: &str, action: &Action) -> bool {
        match app {
            None => true,
            Some(name) => self
                .grant(name)
                .is_some_and(|grant| grant.allows(object, action)),
        }
    }

    pub fn apps(&self) -> impl Iterator<Item = (&str, &AppGrant)> {
        self.grants.iter().map(|(name, grant)| (name.as_str(), grant))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
