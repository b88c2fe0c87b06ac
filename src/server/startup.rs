use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::config::AppConfig;
use super::error::AppError;
use super::handlers;
use super::storage::{LocalStorage, Storage};
use crate::core::TaxCalculator;
use crate::pdf::JpegImage;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub calculator: TaxCalculator,
    pub invoices: Arc<dyn Storage>,
    pub uploads: Arc<dyn Storage>,
    pub logo: Option<Arc<Vec<u8>>>,
}

impl AppState {
    /// Check `config`, create the storage directories and load the logo it names.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let invoices: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(&config.output_dir).await.map_err(|e| {
                tracing::error!(
                    "Failed to initialize invoice storage at {}: {}",
                    config.output_dir.display(),
                    e
                );
                e
            })?,
        );
        let uploads: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(&config.upload_dir).await.map_err(|e| {
                tracing::error!(
                    "Failed to initialize upload storage at {}: {}",
                    config.upload_dir.display(),
                    e
                );
                e
            })?,
        );

        let logo = match &config.logo_path {
            Some(path) => {
                let data = tokio::fs::read(path).await.map_err(|e| {
                    AppError::ConfigError(format!("cannot read logo {}: {e}", path.display()))
                })?;
                JpegImage::decode(data.clone()).map_err(|e| {
                    AppError::ConfigError(format!("logo {}: {e}", path.display()))
                })?;
                Some(Arc::new(data))
            }
            None => None,
        };

        Ok(Self {
            calculator: TaxCalculator::new(config.tax),
            config: Arc::new(config),
            invoices,
            uploads,
            logo,
        })
    }
}

pub fn router(state: AppState) -> Result<Router, AppError> {
    let origin = HeaderValue::from_str(&state.config.cors_origin).map_err(|e| {
        AppError::ConfigError(format!(
            "invalid cors_origin '{}': {e}",
            state.config.cors_origin
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // Multipart framing adds a little on top of the file itself
    let upload_limit = state.config.max_upload_bytes + 64 * 1024;

    Ok(Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/invoice", post(handlers::create_invoice))
        .route("/api/invoice/preview", post(handlers::preview_invoice))
        .route(
            "/api/uploads",
            post(handlers::upload_signature).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .nest_service("/invoices", ServeDir::new(&state.config.output_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| AppError::ConfigError(format!("invalid listen address: {e}")))?;

        let state = AppState::from_config(config).await?;
        let app = router(state)?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(async move { server.await }),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

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
