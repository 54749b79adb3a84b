use anyhow::Result;
use basket_cli::{
    cli::{Args, CliApp},
    utils::Config,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_catalog_url(args.endpoint.clone())?;

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Basket CLI starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(&config).map_err(|e| {
        tracing::error!("Failed to start: {}", e);
        e
    })?;
    app.run(args).await?;

    tracing::info!("🛒 Basket CLI stopped");
    Ok(())
}
