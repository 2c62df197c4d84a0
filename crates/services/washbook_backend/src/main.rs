// File: services/washbook_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use washbook_common::{config_error, log_error, Context, WashbookError};
use washbook_config::load_config;
use washbook_scheduler::{routes as scheduler_routes, SchedulerState};

#[tokio::main]
async fn main() {
    washbook_common::init();

    if let Err(err) = run().await {
        log_error(&err, "Washbook backend stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), WashbookError> {
    let config = load_config().map_err(config_error)?;
    let state = Arc::new(SchedulerState::from_config(&config)?);

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Washbook API!" }))
        .merge(scheduler_routes(state));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        use washbook_scheduler::doc::SchedulerApiDoc;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Washbook API",
                version = "0.1.0",
                description = "Appointment booking for a single wash bay",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulerApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding listener on {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, draining connections"),
        Err(err) => warn!("Failed to listen for Ctrl-C: {}", err),
    }
}
