use budget_buddy::{api::HttpApi, cli, commands::Session, config, errors::Result};
use chrono::Local;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set, otherwise `fallback`.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file before anything reads the environment
    dotenv().ok();

    // 2. Load the application configuration under a bootstrap subscriber so
    //    its own log lines are not lost
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config::DEFAULT_LOG_FILTER))
        .with_writer(std::io::stderr)
        .finish();
    let app_config = tracing::subscriber::with_default(bootstrap, config::load_app_configuration);

    // 3. Initialize tracing on stderr so it stays out of the REPL output
    let log_filter = app_config
        .as_ref()
        .map_or(config::DEFAULT_LOG_FILTER, |c| c.log_filter.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_filter))
        .with_writer(std::io::stderr)
        .init();
    info!("Attempted to load .env file.");

    let app_config = app_config
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Build the API client and the session
    let api = HttpApi::from_config(&app_config)
        .inspect_err(|e| error!("Failed to build HTTP client: {}", e))?;
    let session = Session::new(api);

    // 5. Run the interactive loop
    cli::run(cli::Repl::new(session, Local::now().date_naive())).await
}
