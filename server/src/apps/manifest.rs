//! `package.json` parsing for installed apps.

use std::path::Path;

use serde_json::Value;

use super::error::ManifestError;
use super::grant::AppGrant;

/// Parsed app manifest.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    raw: Value,
}

impl PackageManifest {
    /// Build a manifest from a parsed JSON document.
    ///
    /// The document must be an object with string `name` and `version` fields.
    pub fn from_value(path: &Path, raw: Value) -> Result<Self, ManifestError> {
        let field = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);

        let (Some(name), Some(version)) = (field("name"), field("version")) else {
            return Err(ManifestError::MissingNameOrVersion {
                path: path.to_path_buf(),
            });
        };

        Ok(Self { name, version, raw })
    }

    /// Declared `ghost.permissions`, or `None` when absent or falsy.
    pub fn permissions(&self, path: &Path) -> Result<Option<AppGrant>, ManifestError> {
        let Some(ghost) = self.raw.get("ghost").filter(|v| is_truthy(v)) else {
            return Ok(None);
        };
        let Some(permissions) = ghost.get("permissions").filter(|v| is_truthy(v)) else {
            return Ok(None);
        };

        AppGrant::from_value(permissions)
            .map(Some)
            .map_err(|object| ManifestError::InvalidPermissions {
                path: path.to_path_buf(),
                object,
            })
    }
}

/// Read and parse the manifest at `path`.
pub async fn parse_package_json(path: &Path) -> Result<PackageManifest, ManifestError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_package_str(path, &contents)
}

/// Parse manifest contents already read from `path`.
pub fn parse_package_str(path: &Path, contents: &str) -> Result<PackageManifest, ManifestError> {
    let raw: Value = serde_json::from_str(contents).map_err(|e| ManifestError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    PackageManifest::from_value(path, raw)
}

// `null`, `false`, `0` and `""` count as "not declared".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
