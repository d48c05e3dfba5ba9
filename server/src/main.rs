//! `press-apps` - App Manifest Check
//!
//! Loads the active apps' manifests the same way the server does at startup
//! and prints each app's effective permission grant as JSON.
//!
//! With `<user-id> <role-id> [app]` it also checks, against the configured
//! database, whether that user may assign that role.

use anyhow::{bail, Context, Result};
use tracing::info;

use press_server::apps::{AppGrant, AppRegistry};
use press_server::authorizer::Authorizer;
use press_server::permissions::{PermissionError, RoleId};
use press_server::{config, db, observability};

const USAGE: &str = "usage: press-apps [<user-id> <role-id> [app]]";

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        apps_path = %config.apps_path.display(),
        "Checking app manifests"
    );

    let registry = AppRegistry::load(
        &config.apps_path,
        &config.active_apps,
        &AppGrant::default_grant(),
    )
    .await
    .context("Failed to load app permissions")?;

    let mut apps: Vec<_> = registry.apps().collect();
    apps.sort_by_key(|(name, _)| *name);

    let report: serde_json::Map<String, serde_json::Value> = apps
        .into_iter()
        .map(|(name, grant)| serde_json::to_value(grant).map(|v| (name.to_string(), v)))
        .collect::<Result<_, _>>()?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    let mut args = std::env::args().skip(1);
    let Some(user_id) = args.next() else {
        return Ok(());
    };
    let Some(role_id) = args.next() else {
        bail!(USAGE);
    };
    let app = args.next();

    let user_id: i64 = user_id.parse().context(USAGE)?;
    let role_id = match role_id.parse::<i64>() {
        Ok(id) => RoleId::Numeric(id),
        Err(_) => RoleId::Text(role_id),
    };

    let Some(database_url) = config.database_url.as_deref() else {
        bail!("DATABASE_URL is required to check role assignment");
    };
    let pool = db::create_pool(database_url).await?;
    let authorizer = Authorizer::with_pool(registry, pool, &config);

    let permitted = match authorizer
        .check_assignment(app.as_deref(), user_id, role_id.clone())
        .await
    {
        Ok(()) => true,
        Err(PermissionError::Denied) => false,
        Err(e) => return Err(e).context("Permission check failed"),
    };

    let verdict = serde_json::json!({
        "user_id": user_id,
        "role_id": role_id,
        "app": app,
        "permitted": permitted,
    });
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    Ok(())
}
