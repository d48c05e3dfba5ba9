//! Capability grant declared by a single installed app.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ManifestError;
use super::grant::AppGrant;
use super::manifest::{parse_package_json, PackageManifest};

/// Manifest file name looked up in each app's root directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Reads the permissions an app declares in its `package.json`.
///
/// Nothing is cached; every [`read`](Self::read) goes back to disk.
#[derive(Debug, Clone)]
pub struct AppPermissions {
    app_path: PathBuf,
    package_path: PathBuf,
    default_grant: AppGrant,
}

impl AppPermissions {
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        let app_path = app_path.into();
        let package_path = app_path.join(MANIFEST_FILE);

        Self {
            app_path,
            package_path,
            default_grant: AppGrant::default_grant(),
        }
    }

    /// Replace the grant returned for apps that declare none.
    #[must_use]
    pub fn with_default_grant(mut self, grant: AppGrant) -> Self {
        self.default_grant = grant;
        self
    }

    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Resolve the app's grant.
    ///
    /// - No `package.json`: the default grant.
    /// - No `ghost.permissions` in it: the default grant.
    /// - Otherwise the declared permissions, unmodified.
    ///
    /// Only read and parse failures are errors.
    #[tracing::instrument(skip(self), fields(app = %self.app_path.display()))]
    pub async fn read(&self) -> Result<AppGrant, ManifestError> {
        if !self.package_exists().await {
            debug!("No package.json, using default app permissions");
            return Ok(self.default_grant.clone());
        }

        let manifest = self.package_contents().await?;
        match manifest.permissions(&self.package_path)? {
            Some(grant) => Ok(grant),
            None => {
                debug!(app_name = %manifest.name, "No declared permissions, using defaults");
                Ok(self.default_grant.clone())
            }
        }
    }

    /// Whether `package.json` exists in the app root.
    ///
    /// I/O errors while checking are treated as "does not exist".
    pub async fn package_exists(&self) -> bool {
        tokio::fs::try_exists(&self.package_path)
            .await
            .unwrap_or(false)
    }

    /// Read and parse the app's `package.json`.
    pub async fn package_contents(&self) -> Result<PackageManifest, ManifestError> {
        parse_package_json(&self.package_path).await
    }
}
