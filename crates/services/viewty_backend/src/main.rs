// File: crates/services/viewty_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use viewty_common::VisitStore;
use viewty_config::load_config;
use viewty_db::{DbClient, SqlVisitStore};
use viewty_scheduling::routes as scheduling_routes;

// Used when no [database] section is configured.
const DEFAULT_DB_URL: &str = "sqlite:viewty.db";

#[tokio::main]
async fn main() {
    viewty_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db_client = match config.database.as_ref() {
        Some(db_config) => DbClient::from_config(db_config).await,
        None => DbClient::from_url(DEFAULT_DB_URL).await,
    }
    .expect("Failed to connect to the database");

    let store = SqlVisitStore::new(&db_client);
    store
        .init_schema()
        .await
        .expect("Failed to initialize the database schema");
    let store: Arc<dyn VisitStore> = Arc::new(store);

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Viewty API!" }))
        .merge(scheduling_routes::routes(config.clone(), store));

    #[allow(unused_mut)] // reassigned when the openapi feature is enabled
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        use viewty_scheduling::doc::SchedulingApiDoc;

        let openapi_doc = SchedulingApiDoc::openapi();
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
