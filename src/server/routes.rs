//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::cluster::stats::ClusterStats;
use crate::cluster::{find_cluster, ClusterReport, Customer};
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::neighborhood::{Neighborhood, REGISTRY};
use crate::route::{plan_route, RoutePlan};
use crate::server::state::AppState;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/neighborhoods", get(neighborhoods_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/clusters", get(clusters_handler).post(cluster_request_handler))
        .route("/api/clusters/stats", get(stats_handler))
        .route("/api/clusters/:id/route", get(route_handler))
        .route("/api/customers", get(customers_handler).put(replace_customers_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "CLUSTER_NOT_FOUND" => StatusCode::NOT_FOUND,
            "STORE_ERROR" | "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::ClusterNotFound(_) => "CLUSTER_NOT_FOUND",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Format(_) => "FORMAT_ERROR",
            Error::Store(_) | Error::Io(_) => "STORE_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Active geocoder
    pub geocoder: String,
    /// Active pickup enrichment
    pub enrichment: String,
    /// Customers in the store
    pub customers: usize,
    /// Registered neighborhoods
    pub neighborhoods: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder: state.engine.geocoder_name().to_string(),
        enrichment: state.engine.enricher_name().to_string(),
        customers: state.customer_count().await,
        neighborhoods: REGISTRY.len(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Neighborhood registry response
#[derive(Debug, Serialize)]
pub struct NeighborhoodsResponse {
    pub neighborhoods: Vec<Neighborhood>,
}

/// List the neighborhood registry
///
/// GET /api/neighborhoods
async fn neighborhoods_handler() -> Json<NeighborhoodsResponse> {
    Json(NeighborhoodsResponse {
        neighborhoods: REGISTRY.to_vec(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Cluster the stored customers
///
/// GET /api/clusters
async fn clusters_handler(State(state): State<Arc<AppState>>) -> Json<ClusterReport> {
    let customers = state.customers().await;
    Json(state.engine.report(&customers))
}

/// Ad hoc clustering request body
#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub customers: Vec<Customer>,
}

/// Cluster a caller-supplied customer list
///
/// POST /api/clusters
async fn cluster_request_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClusterRequest>,
) -> Json<ClusterReport> {
    Json(state.engine.report(&req.customers))
}

/// Summary stats for the stored customers
///
/// GET /api/clusters/stats
async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<ClusterStats> {
    let customers = state.customers().await;
    let clusters = state.engine.cluster_customer_addresses(&customers);
    Json(state.engine.get_cluster_stats(&clusters))
}

/// Optimized route for one cluster of the stored customers
///
/// GET /api/clusters/:id/route
async fn route_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoutePlan>, ApiError> {
    let customers = state.customers().await;
    let clusters = state.engine.cluster_customer_addresses(&customers);

    let cluster = find_cluster(&clusters, &id)
        .ok_or_else(|| ApiError::from(Error::ClusterNotFound(id.clone())))?;

    Ok(Json(plan_route(cluster, &state.config.url.directions)))
}

/// Customer list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomersResponse {
    pub customers: Vec<Customer>,
    pub count: usize,
}

/// List stored customers
///
/// GET /api/customers
async fn customers_handler(State(state): State<Arc<AppState>>) -> Json<CustomersResponse> {
    let customers = state.customers().await;
    let count = customers.len();
    Json(CustomersResponse { customers, count })
}

/// Replace stored customers
///
/// PUT /api/customers
async fn replace_customers_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClusterRequest>,
) -> Result<Json<CustomersResponse>, ApiError> {
    let count = state.replace_customers(req.customers).await.map_err(|e| {
        warn!("Failed to persist customers: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(CustomersResponse {
        customers: state.customers().await,
        count,
    }))
}
