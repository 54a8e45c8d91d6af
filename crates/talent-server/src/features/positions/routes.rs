//! Position API routes
//!
//! Handlers build a command or query and hand it to the mediator; they hold
//! no business logic.
//!
//! # Route Structure
//!
//! - `GET /api/v1/positions` - List positions (paging, filters, orderBy, fields)
//! - `POST /api/v1/positions/paged` - DataTables server-side processing
//! - `POST /api/v1/positions` - Create a position
//! - `GET /api/v1/positions/:id` - Get a single position
//! - `PUT /api/v1/positions/:id` - Replace a position
//! - `DELETE /api/v1/positions/:id` - Delete a position

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::cqrs::middleware::{send_command, send_query};
use crate::error::AppError;
use crate::features::shared::error_helpers::list_query_error_response;
use crate::features::FeatureState;

use super::{
    commands::{
        CreatePositionCommand, CreatePositionError, DeletePositionCommand, DeletePositionError,
        UpdatePositionCommand, UpdatePositionError,
    },
    queries::{
        GetPositionError, GetPositionQuery, GetPositionsError, GetPositionsQuery,
        PagedPositionsError, PagedPositionsQuery,
    },
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn positions_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_positions).post(create_position))
        .route("/paged", post(paged_positions))
        .route(
            "/:id",
            get(get_position).put(update_position).delete(delete_position),
        )
}

/// Optional field projection for single-position reads
#[derive(Debug, Default, Deserialize)]
struct FieldsParam {
    fields: Option<String>,
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/positions?pageNumber=1&pageSize=10&orderBy=positionTitle desc&fields=id,positionTitle`
///
/// Filters `positionNumber`, `positionTitle` and `department` are substring
/// matches combined with OR.
#[tracing::instrument(
    skip(state, query),
    fields(page = ?query.page_number, size = ?query.page_size, order_by = ?query.order_by)
)]
async fn list_positions(
    State(state): State<FeatureState>,
    Query(query): Query<GetPositionsQuery>,
) -> Result<Response, PositionApiError> {
    let response = send_query(&state.mediator, query).await??;

    tracing::debug!(
        count = response.data.len(),
        total = response.counts.records_total,
        filtered = response.counts.records_filtered,
        "Positions listed via API"
    );

    let meta = json!({
        "pagination": response.pagination,
        "recordsTotal": response.counts.records_total,
        "recordsFiltered": response.counts.records_filtered,
    });

    Ok(ApiResponse::success_with_meta(response.data, meta).into_response())
}

/// `POST /api/v1/positions/paged`
///
/// Body and response follow the DataTables server-side processing protocol.
#[tracing::instrument(skip(state, query), fields(draw = query.draw))]
async fn paged_positions(
    State(state): State<FeatureState>,
    Json(query): Json<PagedPositionsQuery>,
) -> Result<Response, PositionApiError> {
    let response = send_query(&state.mediator, query).await??;

    tracing::debug!(
        draw = response.draw,
        filtered = response.records_filtered,
        "Positions paged via API"
    );

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// `GET /api/v1/positions/:id?fields=...`
#[tracing::instrument(skip(state, params), fields(id = %id))]
async fn get_position(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
    Query(params): Query<FieldsParam>,
) -> Result<Response, PositionApiError> {
    let query = GetPositionQuery {
        id,
        fields: params.fields,
    };
    let entity = send_query(&state.mediator, query).await??;

    Ok(ApiResponse::success(entity).into_response())
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/positions`
///
/// - `201 Created` - Position created
/// - `400 Bad Request` - Validation error or unknown department
/// - `409 Conflict` - Position number already used
#[tracing::instrument(
    skip(state, command),
    fields(position_number = %command.position_number)
)]
async fn create_position(
    State(state): State<FeatureState>,
    Json(command): Json<CreatePositionCommand>,
) -> Result<Response, PositionApiError> {
    let record = send_command(&state.mediator, command).await??;

    tracing::info!(position_id = %record.id, "Position created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))).into_response())
}

/// `PUT /api/v1/positions/:id`
#[tracing::instrument(skip(state, command), fields(id = %id))]
async fn update_position(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
    Json(mut command): Json<UpdatePositionCommand>,
) -> Result<Response, PositionApiError> {
    command.id = id;

    let record = send_command(&state.mediator, command).await??;

    tracing::info!(position_id = %record.id, "Position updated via API");

    Ok(ApiResponse::success(record).into_response())
}

/// `DELETE /api/v1/positions/:id`
#[tracing::instrument(skip(state), fields(id = %id))]
async fn delete_position(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PositionApiError> {
    let response = send_command(&state.mediator, DeletePositionCommand { id }).await??;

    tracing::info!(position_id = %id, "Position deleted via API");

    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for position API endpoints
#[derive(Debug, thiserror::Error)]
enum PositionApiError {
    #[error(transparent)]
    List(#[from] GetPositionsError),
    #[error(transparent)]
    Paged(#[from] PagedPositionsError),
    #[error(transparent)]
    Get(#[from] GetPositionError),
    #[error(transparent)]
    Create(#[from] CreatePositionError),
    #[error(transparent)]
    Update(#[from] UpdatePositionError),
    #[error(transparent)]
    Delete(#[from] DeletePositionError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl IntoResponse for PositionApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            // List errors
            PositionApiError::List(GetPositionsError::Pagination(_)) => {
                ErrorResponse::validation(message)
            },
            PositionApiError::List(GetPositionsError::List(ref e))
            | PositionApiError::Paged(PagedPositionsError::List(ref e))
            | PositionApiError::Get(GetPositionError::Fields(ref e)) => {
                list_query_error_response(e)
            },

            // Get errors
            PositionApiError::Get(GetPositionError::NotFound(_)) => ErrorResponse::not_found(message),
            PositionApiError::Get(GetPositionError::Database(ref e)) => ErrorResponse::database(e),

            // Create errors
            PositionApiError::Create(CreatePositionError::Text(_))
            | PositionApiError::Create(CreatePositionError::Salary(_))
            | PositionApiError::Create(CreatePositionError::DepartmentNotFound(_)) => {
                ErrorResponse::validation(message)
            },
            PositionApiError::Create(CreatePositionError::DuplicateNumber(_)) => {
                ErrorResponse::conflict(message)
            },
            PositionApiError::Create(CreatePositionError::Database(ref e)) => {
                ErrorResponse::database(e)
            },

            // Update errors
            PositionApiError::Update(UpdatePositionError::Text(_))
            | PositionApiError::Update(UpdatePositionError::Salary(_))
            | PositionApiError::Update(UpdatePositionError::DepartmentNotFound(_)) => {
                ErrorResponse::validation(message)
            },
            PositionApiError::Update(UpdatePositionError::NotFound(_)) => {
                ErrorResponse::not_found(message)
            },
            PositionApiError::Update(UpdatePositionError::DuplicateNumber(_)) => {
                ErrorResponse::conflict(message)
            },
            PositionApiError::Update(UpdatePositionError::Database(ref e)) => {
                ErrorResponse::database(e)
            },

            // Delete errors
            PositionApiError::Delete(DeletePositionError::NotFound(_)) => {
                ErrorResponse::not_found(message)
            },
            PositionApiError::Delete(DeletePositionError::Database(ref e)) => {
                ErrorResponse::database(e)
            },

            PositionApiError::App(e) => e.into_response(),
        }
    }
}
