//! API server for the brain dump task app.

use api::config::Config;
use api::state::{brain_from_env, AppState};
use brain_core::prompt::{extraction_prompt, GUIDE_SYSTEM_PROMPT};
use brain_core::{hash_prompt, ExtractionContext};
use database::Database;
use intake::IntakeService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let brain = brain_from_env()?;
    let extraction = extraction_prompt(&ExtractionContext {
        local_time: String::new(),
        timezone: String::new(),
    });
    info!(
        extraction = %hash_prompt(&extraction),
        guide = %hash_prompt(GUIDE_SYSTEM_PROMPT),
        "Prompt fingerprints"
    );

    // Build application state
    let state = AppState::new(IntakeService::new(db, brain));
    let app = api::app(state);

    // Start server
    info!(addr = %config.addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
