//! App Manifest Error Types

use std::path::PathBuf;

/// Failure reading or parsing an app's `package.json`.
///
/// A missing manifest, or one without `ghost.permissions`, is never an error;
/// those resolve to the default grant.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The file is not valid JSON. Carries the parser's message.
    #[error("{message}")]
    Malformed { path: PathBuf, message: String },

    #[error("\"name\" or \"version\" is missing from package.json file at {}", .path.display())]
    MissingNameOrVersion { path: PathBuf },

    /// `ghost.permissions` is not an object of action-name arrays.
    #[error("Invalid permissions for \"{object}\" in {}", .path.display())]
    InvalidPermissions { path: PathBuf, object: String },

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Path of the manifest that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Malformed { path, .. }
            | Self::MissingNameOrVersion { path }
            | Self::InvalidPermissions { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}
