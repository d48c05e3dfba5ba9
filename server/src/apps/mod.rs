//! Installed apps and the capabilities they declare.
//!
//! Each app may declare, in its `package.json`, which actions it needs on
//! which objects:
//!
//! ```json
//! { "name": "kudos", "version": "1.0.0",
//!   "ghost": { "permissions": { "posts": ["browse", "read"] } } }
//! ```
//!
//! Apps that declare nothing get [`AppGrant::default_grant`].

pub mod error;
pub mod grant;
pub mod manifest;
pub mod permissions;
pub mod registry;

pub use error::ManifestError;
pub use grant::{AppGrant, DEFAULT_APP_GRANT};
pub use manifest::{parse_package_json, PackageManifest};
pub use permissions::{AppPermissions, MANIFEST_FILE};
pub use registry::AppRegistry;
