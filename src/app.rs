use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment, SecurityConfig};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, StudentRepository, StudentStore};
use crate::handlers;
use crate::observer::ObserverPipeline;
use crate::serializers::{SchemaKind, Serializer};

/// Shared request state, injected into handlers as an `Extension`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
    pub pipeline: Arc<ObserverPipeline>,
    pub serializer: Arc<dyn Serializer>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>, config: AppConfig) -> Self {
        Self::with_schema(store, config.api.student_schema, config)
    }

    /// Bind the endpoint to a specific schema regardless of configuration
    pub fn with_schema(store: Arc<dyn StudentStore>, schema: SchemaKind, config: AppConfig) -> Self {
        let pipeline = ObserverPipeline::with_default_observers();
        let serializer = schema.build();
        tracing::debug!(
            "Serving {} from the {} store with {} observers",
            serializer.name(),
            store.backend(),
            pipeline.observer_count()
        );

        Self {
            store,
            pipeline: Arc::new(pipeline),
            serializer,
            config: Arc::new(config),
        }
    }

    /// PostgreSQL when `DATABASE_URL` is configured, otherwise an in-memory store
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        let store: Arc<dyn StudentStore> = match config.database.url.as_deref() {
            Some(url) => {
                tracing::info!("Connecting to {}", DatabaseManager::redacted(url));
                let repository = StudentRepository::new(DatabaseManager::connect(&config.database).await?);
                repository.ensure_schema().await?;
                Arc::new(repository)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; students are kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(store, config))
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(student_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(Extension(state));

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(config.environment, &config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn student_routes() -> Router {
    use handlers::students;

    Router::new()
        // Collection
        .route(
            "/api/students",
            get(students::collection_get).post(students::collection_post),
        )
        // Single record
        .route(
            "/api/students/:id",
            get(students::record_get)
                .put(students::record_put)
                .patch(students::record_patch)
                .delete(students::record_delete),
        )
}

fn cors_layer(environment: Environment, security: &SecurityConfig) -> CorsLayer {
    if environment == Environment::Development || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
