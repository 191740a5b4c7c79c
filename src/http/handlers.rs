//! HTTP request handlers for the Larder read API.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::search::{aggregate_stats, project_all, ProjectedDocument, SearchTerm};
use crate::store::query as store_query;
use crate::types::Item;

use super::AppState;

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>) -> axum::Router {
    use axum::routing::get;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    axum::Router::new()
        .route("/inventory/{user_id}/search", get(search_inventory))
        .route("/inventory/{user_id}/stats", get(inventory_stats))
        .route("/inventory/{user_id}", get(get_inventory))
        // An empty user segment never reaches the parameterized routes;
        // answer it with the 400 the API contract promises.
        .route("/inventory", get(missing_user_id))
        .route("/inventory/", get(missing_user_id))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Request-level failures surfaced to the client.
///
/// Data-shape anomalies (missing document or item fields) are not errors;
/// they degrade to defaults long before this boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or blank required path parameter.
    #[error("user_id parameter is required in URL path")]
    MissingUserId,
    /// Any failure from the store-fetch collaborator. No retry, no partial
    /// results.
    #[error("Internal server error: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingUserId => {
                tracing::warn!("Rejected request with missing user_id");
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(ref err) => {
                tracing::error!("Upstream error: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn require_user_id(user_id: &str) -> Result<&str, ApiError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::MissingUserId);
    }
    Ok(user_id)
}

async fn missing_user_id() -> ApiError {
    ApiError::MissingUserId
}

#[derive(Deserialize)]
struct SearchParams {
    /// Free-text term; trimmed, empty means "return everything"
    q: Option<String>,
}

// -- /inventory/{user_id}/search --

#[derive(Serialize)]
struct SearchResponse {
    user_id: String,
    search_term: String,
    documents_found: usize,
    total_items_found: usize,
    documents: Vec<ResultDocument>,
}

/// One projected document on the wire. The item-count field changes name
/// between the filtered and unfiltered cases, mirroring what callers of the
/// original API already parse.
#[derive(Serialize)]
struct ResultDocument {
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    supplier_name: Option<String>,
    timestamp: String,
    #[serde(rename = "batchNumber")]
    batch_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_items_in_document: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_items_in_original_document: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_items_count: Option<usize>,
    items: Vec<Item>,
}

impl From<ProjectedDocument> for ResultDocument {
    fn from(p: ProjectedDocument) -> Self {
        let (unfiltered_count, original_count) = match p.matched_count {
            Some(_) => (None, Some(p.total_items)),
            None => (Some(p.total_items), None),
        };
        Self {
            id: p.id,
            user_id: p.user_id,
            supplier_name: p.supplier_name,
            timestamp: p.timestamp,
            batch_number: p.batch_number,
            total_items_in_document: unfiltered_count,
            total_items_in_original_document: original_count,
            matched_items_count: p.matched_count,
            items: p.items,
        }
    }
}

async fn search_inventory(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let user_id = require_user_id(&user_id)?;
    let term = SearchTerm::parse(params.q.as_deref());

    let query = store_query::documents_for_user(user_id, &term);
    let documents = state.store.query_documents(&query).await?;
    let projection = project_all(documents, &term);

    Ok(Json(SearchResponse {
        user_id: user_id.to_string(),
        search_term: term.as_str().unwrap_or("all").to_string(),
        documents_found: projection.documents.len(),
        total_items_found: projection.total_items_found,
        documents: projection.documents.into_iter().map(Into::into).collect(),
    }))
}

// -- /inventory/{user_id} --

#[derive(Serialize)]
struct InventoryResponse {
    user_id: String,
    search_query: String,
    results_summary: ResultsSummary,
    inventory: Vec<InventoryDocument>,
}

#[derive(Serialize)]
struct ResultsSummary {
    documents_found: usize,
    total_items: usize,
}

/// Same projection as [`ResultDocument`], differently named identity fields.
#[derive(Serialize)]
struct InventoryDocument {
    document_id: String,
    user_id: String,
    supplier_name: Option<String>,
    timestamp: String,
    #[serde(rename = "batchNumber")]
    batch_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_items_in_document: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_items_in_original_document: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_items_count: Option<usize>,
    items: Vec<Item>,
}

impl From<ProjectedDocument> for InventoryDocument {
    fn from(p: ProjectedDocument) -> Self {
        let (unfiltered_count, original_count) = match p.matched_count {
            Some(_) => (None, Some(p.total_items)),
            None => (Some(p.total_items), None),
        };
        Self {
            document_id: p.id,
            user_id: p.user_id,
            supplier_name: p.supplier_name,
            timestamp: p.timestamp,
            batch_number: p.batch_number,
            total_items_in_document: unfiltered_count,
            total_items_in_original_document: original_count,
            matched_items_count: p.matched_count,
            items: p.items,
        }
    }
}

async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let user_id = require_user_id(&user_id)?;
    let term = SearchTerm::parse(params.q.as_deref());

    let query = store_query::documents_for_user(user_id, &term);
    let documents = state.store.query_documents(&query).await?;
    let projection = project_all(documents, &term);

    Ok(Json(InventoryResponse {
        user_id: user_id.to_string(),
        search_query: term.as_str().unwrap_or("all inventory").to_string(),
        results_summary: ResultsSummary {
            documents_found: projection.documents.len(),
            total_items: projection.total_items_found,
        },
        inventory: projection.documents.into_iter().map(Into::into).collect(),
    }))
}

// -- /inventory/{user_id}/stats --

#[derive(Serialize)]
struct StatsResponse {
    user_id: String,
    total_documents: usize,
    total_items: usize,
    total_categories: usize,
    total_suppliers: usize,
    total_inventory_value: f64,
    categories: BTreeMap<String, usize>,
    suppliers: Vec<String>,
}

async fn inventory_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    let user_id = require_user_id(&user_id)?;

    let query = store_query::all_documents_for_user(user_id);
    let documents = state.store.query_documents(&query).await?;
    let stats = aggregate_stats(&documents);

    Ok(Json(StatsResponse {
        user_id: user_id.to_string(),
        total_documents: stats.total_documents,
        total_items: stats.total_items,
        total_categories: stats.categories.len(),
        total_suppliers: stats.suppliers.len(),
        total_inventory_value: stats.total_inventory_value,
        categories: stats.categories,
        suppliers: stats.suppliers.into_iter().collect(),
    }))
}
