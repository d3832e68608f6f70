//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener with graceful shutdown
//! - Translate query parameters into facade calls
//!
//! # Routes
//! - `GET  /hello`               liveness, always "world"
//! - `GET  /servers`             list (`?live=false` skips probing; `id`/`status` inert)
//! - `GET  /servers/{id}`        stored view of one server
//! - `POST /servers/{id}/probe`  probe one server and merge the outcome

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::health::ServerStatus;
use crate::http::request::{make_span, MakeRequestUuid};
use crate::http::response::ApiError;
use crate::query::{QueryFacade, Resolve};
use crate::registry::{ServerFilter, ServerView};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<QueryFacade>,
}

/// HTTP server exposing the query facade.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(facade: Arc<QueryFacade>) -> Self {
        let router = Self::build_router(AppState { facade });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/hello", get(hello))
            .route("/servers", get(list_servers))
            .route("/servers/{id}", get(get_server))
            .route("/servers/{id}/probe", post(probe_server))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Serve until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub id: Option<String>,
    /// Accepted in any spelling; unknown values are dropped.
    pub status: Option<String>,
    /// Probe before answering. Defaults to true.
    pub live: Option<bool>,
}

impl ListParams {
    fn filter(&self) -> ServerFilter {
        ServerFilter {
            id: self.id.clone(),
            status: self.status.as_deref().and_then(|s| s.parse::<ServerStatus>().ok()),
        }
    }

    fn resolve(&self) -> Resolve {
        match self.live {
            Some(false) => Resolve::Stored,
            _ => Resolve::Live,
        }
    }
}

async fn hello(State(state): State<AppState>) -> &'static str {
    state.facade.hello()
}

async fn list_servers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<ServerView>> {
    let views = state
        .facade
        .list_servers(&params.filter(), params.resolve())
        .await;
    Json(views)
}

async fn get_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServerView>, ApiError> {
    Ok(Json(state.facade.server(&id)?))
}

async fn probe_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServerView>, ApiError> {
    Ok(Json(state.facade.refresh(&id).await?))
}
