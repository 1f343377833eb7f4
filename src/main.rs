/// WebFinger Server - RFC 7033 resource discovery
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webfinger_server::{config::ServerConfig, server, AppContext, FingerResult};

#[tokio::main]
async fn main() -> FingerResult<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(config.logging.env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting webfinger-server v{}", env!("CARGO_PKG_VERSION"));

    // Create application context
    let ctx = AppContext::new(config).await?;
    tracing::info!("{} account(s) available for lookup", ctx.account_store.count().await?);

    // Start server
    server::serve(ctx).await?;

    Ok(())
}
