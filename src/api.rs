// 🌐 HTTP API - axum routes over an ExpenseRepository
//
// POST /expenses           create
// GET  /expenses           list (category, startDate, endDate)
// GET  /expenses/analysis  per-category totals

use crate::analysis::{analyze, SpendingAnalysis};
use crate::error::ExpenseError;
use crate::expense::{Expense, NewExpense};
use crate::query::ExpenseQuery;
use crate::store::ExpenseRepository;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ExpenseRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ExpenseRepository>) -> Self {
        AppState { store }
    }
}

// ============================================================================
// RESPONSE ENVELOPE
// ============================================================================

/// `{status: "success", data}` or `{status: "error", error}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            status: "success",
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Everything a handler can fail with
#[derive(Debug)]
pub enum ApiError {
    /// Create input failed validation (400)
    Validation(ExpenseError),

    /// Body could not be decoded; keeps the extractor's status
    Malformed { status: StatusCode, message: String },
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Malformed { status, message } => {
                warn!(%status, "Malformed request: {}", message);
                (status, message)
            }
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /expenses - Record a new expense
async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let Json(new_expense) = payload?;
    let expense = state.store.create(new_expense)?;

    Ok(Json(ApiResponse::ok(expense)))
}

/// GET /expenses - List expenses, optionally filtered
///
/// Never fails: a query string that cannot be read, or one that repeats a
/// filter key, lists nothing.
async fn list_expenses(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ApiResponse<Vec<Expense>>> {
    let query = match pairs {
        Ok(Query(pairs)) => ExpenseQuery::from_pairs(pairs),
        Err(rejection) => {
            warn!("Unreadable query string: {}", rejection.body_text());
            ExpenseQuery {
                unsatisfiable: true,
                ..Default::default()
            }
        }
    };

    Json(ApiResponse::ok(state.store.list(&query)))
}

/// GET /expenses/analysis - Totals per category
async fn analyze_expenses(State(state): State<AppState>) -> Json<ApiResponse<SpendingAnalysis>> {
    Json(ApiResponse::ok(analyze(&state.store.all())))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/expenses", post(create_expense).get(list_expenses))
        .route("/expenses/analysis", get(analyze_expenses))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
