mod config;
mod routes;
mod services;
mod sources;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use crate::config::Config;
use crate::sources::backend::BackendClient;
use crate::sources::boundary::boundary_source;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let http = match sources::http_client(config.timeouts) {
        Ok(http) => http,
        Err(e) => {
            tracing::error!(error = %e, "http client init failed");
            return ExitCode::FAILURE;
        }
    };

    let state = state::AppState::from_config(&config);

    // Initial loads run in the background; requests before they settle see
    // an unmasked, non-interactive map.
    let boundary = Arc::from(boundary_source(config.boundary.as_ref(), &http));
    let points = Arc::new(BackendClient::new(http, &config.backend_url, config.fair_name.clone()));
    let _loads = services::session::spawn_initial_loads(state.clone(), boundary, points);

    let app = routes::app(state, config.static_dir.as_deref());
    let port = config.port;
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%port, fair = %config.fair_name, "fairmap listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
