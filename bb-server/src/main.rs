use anyhow::{Context, Result};
use bb_server::{config::Config, routes::router, state::AppState};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Path to the YAML configuration file
    #[clap(long, env = "BB_CONFIG", default_value = "config.yml")]
    config: String,

    /// The address and optionally port to bind to, overriding the configuration
    #[clap(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::load(&args.config).with_context(|| format!("Loading {}", args.config))?
    } else {
        Config::default()
    };

    // initialize tracing
    let _guard = match &config.logging.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "access.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_env_filter(EnvFilter::from_default_env())
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
            None
        }
    };

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let address = args.address.unwrap_or(config.server.address);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Binding to {}", address))?;
    tracing::info!("Listening on {}", address);
    axum::serve(listener, app).await?;
    Ok(())
}
