//! Application startup and lifecycle management.

use crate::config::AssistantConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{Assistant, FileExtractor, OcrEngine, TesseractOcr};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after boot.
#[derive(Clone)]
pub struct AppState {
    pub config: AssistantConfig,
    pub assistant: Assistant,
    pub extractor: FileExtractor,
}

impl AppState {
    /// Create the Gemini client and run the OCR capability probe.
    pub fn from_config(config: AssistantConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
        };
        let provider = GeminiTextProvider::new(gemini_config).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::InternalError(anyhow::anyhow!(e))
        })?;
        let text_provider: Arc<dyn TextProvider> = Arc::new(provider);

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini text provider"
        );

        let ocr = TesseractOcr::probe(&config.ocr)
            .map(|engine| Arc::new(engine) as Arc<dyn OcrEngine>);

        Ok(Self::new(config, text_provider, ocr))
    }

    pub fn new(
        config: AssistantConfig,
        text_provider: Arc<dyn TextProvider>,
        ocr: Option<Arc<dyn OcrEngine>>,
    ) -> Self {
        Self {
            config,
            assistant: Assistant::new(text_provider),
            extractor: FileExtractor::new(ocr),
        }
    }
}

/// Build the router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.uploads.max_bytes);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze))
        .route(
            "/analyze-file",
            post(handlers::analyze_file).layer(upload_limit),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AssistantConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Bind the listener for an already assembled state (tests inject mock
    /// providers this way). Port 0 binds a random port.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            ocr_available = state.extractor.ocr_available(),
            "Health assistant listening"
        );

        let app = build_router(state);
        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
