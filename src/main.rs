//! Lectern Server - Library Lending Reports
//!
//! A Rust server answering aggregate lending reports over a library's
//! books, users and lending records.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_server::{
    api,
    config::AppConfig,
    repository::PgLibraryStore,
    services::{seed, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lectern_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lectern Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Create the store and populate an empty database
    let store = Arc::new(PgLibraryStore::new(pool));
    seed::initialize(store.as_ref(), &config.seed)
        .await
        .expect("Failed to seed database");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(store);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Lending reports
    let reports = Router::new()
        .route("/most-lending", get(api::reports::most_lending))
        .route("/book-availability/:book_id", get(api::reports::book_availability))
        .route("/top-lenders", get(api::reports::top_lenders))
        .route("/user-lending-history/:user_id", get(api::reports::user_lending_history))
        .route("/related-books/:book_id", get(api::reports::related_books))
        .route("/reading-rate/:book_id", get(api::reports::reading_rate));

    // RPC-style message surface mirroring the six reports
    let rpc = Router::new()
        .route("/LibraryService/GetMostBorrowedBooks", post(api::rpc::get_most_borrowed_books))
        .route("/LibraryService/GetBookAvailability", post(api::rpc::get_book_availability))
        .route("/LibraryService/GetReadingRate", post(api::rpc::get_reading_rate))
        .route("/LibraryService/GetTopBorrowers", post(api::rpc::get_top_borrowers))
        .route("/LibraryService/GetUserBorrowHistory", post(api::rpc::get_user_borrow_history))
        .route("/LibraryService/GetRelatedBooks", post(api::rpc::get_related_books));

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest("/api/reports", reports)
        .nest("/rpc", rpc)
        .with_state(state)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
