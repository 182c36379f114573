use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use leadflow_core::{CoreConfig, FixtureStore, SuggestionService};

/// Main entry point for the Leadflow application
///
/// Resolves configuration once, loads the fixtures and serves the REST API.
///
/// # Environment Variables
/// - `LEADFLOW_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HF_API_KEY`: Hugging Face token; without it `/api/generate` serves sample text
/// - `LEADFLOW_INFERENCE_URL`: text-generation endpoint override
/// - `LEADFLOW_UPSTREAM_TIMEOUT_SECS`: upstream deadline in seconds (default: 15)
/// - `LEADFLOW_FIXTURE_DIR`: directory holding `leads.json` and `analytics.json`
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, fixtures or the listener fail
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leadflow=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env()?;
    let rest_addr =
        std::env::var("LEADFLOW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let fixtures = FixtureStore::load(cfg.fixture_dir())?;
    tracing::info!(
        "-- Loaded {} leads and {} channels",
        fixtures.leads().len(),
        fixtures.analytics().marketing_channels.len()
    );

    if !cfg.credential().is_configured() {
        tracing::warn!("HF_API_KEY not set; suggestions will use sample text");
    }
    let suggestions = SuggestionService::from_config(&cfg)?;
    tracing::info!("-- Upstream deadline {:?}", suggestions.deadline());

    let app = router(AppState::new(fixtures, suggestions));

    tracing::info!("++ Starting Leadflow REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
