use std::time::Duration;

use bson::doc;
use configs::DatabaseConfig;
use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

/// Build the long-lived database handle. The driver pools connections
/// internally, so one handle is cloned into every request.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Database> {
    let uri = cfg.connection_uri()?;
    let mut opts = ClientOptions::parse(&uri).await?;
    opts.app_name = Some(cfg.app_name.clone());
    opts.max_pool_size = Some(cfg.max_pool_size);
    opts.min_pool_size = Some(cfg.min_pool_size);
    opts.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));

    let client = Client::with_options(opts)?;
    let db = client.database(&cfg.name);
    info!(database = %cfg.name, "document store client ready");
    Ok(db)
}

/// Round-trip a `ping` command.
pub async fn ping(db: &Database) -> anyhow::Result<()> {
    db.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}
