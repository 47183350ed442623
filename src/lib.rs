pub mod cache;
pub mod config;
pub mod controllers;
pub mod editor;
pub mod error;
pub mod layout;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod selection;
pub mod services;
pub mod sessions;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use editor::HallTemplateEditor;
use selection::SelectionSession;
use services::{UpstreamClient, UpstreamError};
use sessions::SessionStore;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub upstream: UpstreamClient,
    pub cache: cache::CacheService,
    pub selections: SessionStore<SelectionSession>,
    pub templates: SessionStore<HallTemplateEditor>,
}

impl AppState {
    /// Поднимает клиентов. Недоступный Redis не мешает старту: кэш
    /// сеансов просто выключается.
    pub async fn new(config: config::Config) -> Result<Arc<Self>, UpstreamError> {
        let upstream = UpstreamClient::from_config(&config.upstream, &config.circuit_breaker)?;

        let redis = match config.redis.url.as_deref() {
            Some(url) => match redis_client::RedisClient::new(url).await {
                Ok(client) => {
                    info!("Redis connected");
                    Some(client)
                }
                Err(e) => {
                    warn!("Redis unavailable, showtimes cache disabled: {}", e);
                    None
                }
            },
            None => {
                info!("REDIS_URL not set, showtimes cache disabled");
                None
            }
        };
        let cache = cache::CacheService::new(redis, config.redis.showtimes_ttl_seconds);

        Ok(Self::with_parts(config, upstream, cache))
    }

    pub fn with_parts(
        config: config::Config,
        upstream: UpstreamClient,
        cache: cache::CacheService,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            upstream,
            cache,
            selections: SessionStore::new(),
            templates: SessionStore::new(),
        })
    }
}

/// Полный роутер приложения.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
