//! Users service binary.

use std::sync::Arc;

use anyhow::Context;
use apiary::config::{ConfigLoader, DEFAULT_ENV_PREFIX};
use apiary::server::{Server, ShutdownSignal};
use apiary::telemetry::init_logging;
use users_service::{routes, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_optional_file("apiary.toml")?
        .with_dotenv()?
        .with_env_prefix(DEFAULT_ENV_PREFIX)
        .load()
        .context("failed to load configuration")?;

    init_logging(&apiary::log_config(&config)).context("failed to initialize logging")?;

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let service = Arc::new(UserService::seeded(shutdown.clone()));
    let table = routes(&service).context("invalid route table")?;
    tracing::info!(routes = table.len(), "route table built");

    Server::new(apiary::server_config(&config), table.into_dispatcher())
        .run_with_shutdown(shutdown)
        .await
        .context("server failed")?;

    Ok(())
}
