//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{tts::parse_voice, OpenAiSstAdapter, OpenAiTtsAdapter, SpoonacularAdapter},
    config::Config,
    error::ApiError,
    web::{self, ApiDoc, AppState, Services},
};
use async_openai::{config::OpenAIConfig, types::audio::SpeechModel, Client};
use axum::Router;
use fridge_core::{
    NoFallback, ProductCatalog, RandomFallback, RecipeService, ShelfLifeFallback,
    SpeechToTextService, SystemClock, TextToSpeechService,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Product Catalog ---
    let fallback: Box<dyn ShelfLifeFallback> = if config.random_shelf_life_fallback {
        Box::new(RandomFallback::new())
    } else {
        Box::new(NoFallback)
    };
    let catalog = Arc::new(ProductCatalog::new(fallback));

    // --- 3. Initialize Service Adapters ---
    let recipes: Option<Arc<dyn RecipeService>> = match &config.spoonacular_api_key {
        Some(key) => {
            let http = reqwest::Client::builder()
                .timeout(config.recipe_timeout)
                .build()
                .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;
            Some(Arc::new(SpoonacularAdapter::new(
                http,
                config.spoonacular_base_url.clone(),
                key.clone(),
            )))
        }
        None => {
            warn!("SPOONACULAR_API_KEY not set; recipe suggestions are disabled.");
            None
        }
    };

    let (stt_adapter, tts_adapter): (
        Option<Arc<dyn SpeechToTextService>>,
        Option<Arc<dyn TextToSpeechService>>,
    ) = match &config.openai_api_key {
        Some(key) => {
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(key));
            let tts_voice = parse_voice(&config.tts_voice).ok_or_else(|| {
                ApiError::Internal(format!(
                    "Invalid TTS voice specified in config: '{}'",
                    config.tts_voice
                ))
            })?;
            (
                Some(Arc::new(OpenAiSstAdapter::new(
                    openai_client.clone(),
                    config.stt_model.clone(),
                ))),
                Some(Arc::new(OpenAiTtsAdapter::new(
                    openai_client,
                    SpeechModel::Tts1Hd,
                    tts_voice,
                ))),
            )
        }
        None => {
            warn!("OPENAI_API_KEY not set; voice audio and spoken replies are disabled.");
            (None, None)
        }
    };

    // --- 4. Build the Shared AppState ---
    let services = Services {
        clock: Arc::new(SystemClock),
        catalog,
        recipes,
        stt_adapter,
        tts_adapter,
    };
    let app_state = Arc::new(AppState::new(config.clone(), services));

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(web::router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
