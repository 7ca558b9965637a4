/// PDS Locator - ATProto handle resolution service
///
/// Resolves handles to verified DIDs and PDS addresses over HTTP.
use pds_locator::{config::ServerConfig, context::AppContext, error::LocatorResult, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> LocatorResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pds_locator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config)?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
   ___  ___  ___    __                  __
  / _ \/ _ \/ __|  / /  ___  __ ___ _ / /____  ____
 / ___/ // /\__ \ / /__/ _ \/ _/ _ `// __/ _ \/ __/
/_/  /____/|___//____/\___/\__\_,_/ \__/\___/_/

        ATProto Handle Resolution Service v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
