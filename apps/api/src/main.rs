mod config;
mod errors;
mod generation;
mod jobs;
mod llm_client;
mod models;
mod reviews;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ReviewSource};
use crate::generation::image::{HuggingFaceClient, ImageSynthesizer};
use crate::jobs::{InMemoryJobStore, JobOrchestrator, JobStore, ReviewAcquisition};
use crate::llm_client::LlmClient;
use crate::reviews::{GooglePlacesClient, PlaceResolver};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reviewcraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    if config.anthropic_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; every job will fail with a configuration error");
    }
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Review source
    let reviews = match config.review_source {
        ReviewSource::Manual => ReviewAcquisition::Manual,
        ReviewSource::MapsLink => {
            if config.places_api_key.is_none() {
                warn!("REVIEW_SOURCE=maps_link but PLACES_API_KEY is not set");
            }
            let places = GooglePlacesClient::new(config.places_api_key.clone())?;
            ReviewAcquisition::MapsLink(PlaceResolver::new(Arc::new(places)))
        }
    };
    info!("Review source: {:?}", config.review_source);

    // Job store (in-memory, process lifetime)
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());

    let mut orchestrator = JobOrchestrator::new(
        store.clone(),
        Arc::new(llm),
        reviews,
        config.marketing_copy_style,
    );

    // Optional image stage
    if config.image_generation_enabled {
        let backend = HuggingFaceClient::new(config.hf_api_base.clone(), config.hf_api_token.clone())?;
        orchestrator =
            orchestrator.with_images(ImageSynthesizer::new(Arc::new(backend), config.image_models.clone()));
        info!("Image generation enabled (candidates: {:?})", config.image_models);
    } else {
        info!("Image generation disabled");
    }

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        jobs: store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
