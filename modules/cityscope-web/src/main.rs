use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cityscope_core::{Config, FilterUpdate, PageDirection, SearchController};
use geodb_client::GeoDbClient;

mod templates;
mod views;

use templates::render_search;
use views::snapshot_to_view;

// --- App State ---

struct AppState {
    controller: SearchController,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cityscope_core=info".parse()?)
                .add_directive("cityscope_web=info".parse()?)
                .add_directive("geodb_client=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let client = GeoDbClient::new(config.geodb_api_host.clone(), config.geodb_api_key.clone());
    let controller = SearchController::new(Arc::new(client));

    let state = Arc::new(AppState { controller });

    let app = Router::new()
        .route("/", get(search_page))
        .route("/api/state", get(api_state))
        .route("/api/query", post(api_query))
        .route("/api/filters", post(api_filters))
        .route("/api/page", post(api_page))
        .route("/api/select", post(api_select))
        .with_state(state)
        // Results are per-session search state: never cache them.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only (no query text)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Cityscope web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn search_page() -> impl IntoResponse {
    Html(render_search())
}

async fn api_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.controller.snapshot().await;
    Json(snapshot_to_view(&snapshot))
}

#[derive(Deserialize)]
struct QueryRequest {
    q: String,
}

async fn api_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    state.controller.update_query(req.q).await;
    Json(snapshot_to_view(&state.controller.snapshot().await))
}

/// The shim posts the full filter state on every input event; a missing or
/// null max means unbounded, mirroring an emptied input field.
#[derive(Deserialize)]
struct FiltersRequest {
    #[serde(rename = "minPopulation")]
    min_population: Option<u64>,
    #[serde(rename = "maxPopulation")]
    max_population: Option<u64>,
    country: Option<String>,
}

async fn api_filters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FiltersRequest>,
) -> impl IntoResponse {
    state
        .controller
        .update_filters(FilterUpdate {
            min_population: req.min_population,
            max_population: Some(req.max_population),
            country: req.country,
        })
        .await;
    Json(snapshot_to_view(&state.controller.snapshot().await))
}

#[derive(Deserialize)]
struct PageRequest {
    direction: String,
}

async fn api_page(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PageRequest>,
) -> Response {
    let direction = match req.direction.as_str() {
        "prev" => PageDirection::Prev,
        "next" => PageDirection::Next,
        _ => return (StatusCode::BAD_REQUEST, "Invalid direction").into_response(),
    };

    state.controller.change_page(direction).await;
    Json(snapshot_to_view(&state.controller.snapshot().await)).into_response()
}

#[derive(Deserialize)]
struct SelectRequest {
    id: u64,
}

async fn api_select(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> impl IntoResponse {
    state.controller.select_city(req.id).await;
    Json(snapshot_to_view(&state.controller.snapshot().await))
}
