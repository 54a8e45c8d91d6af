//! Department API routes
//!
//! - `GET /api/v1/departments` - List departments (paging, `name` filter, orderBy, fields)
//! - `POST /api/v1/departments` - Create a department
//! - `GET /api/v1/departments/:id` - Get a single department

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::cqrs::middleware::{send_command, send_query};
use crate::error::AppError;
use crate::features::shared::error_helpers::list_query_error_response;
use crate::features::FeatureState;

use super::{
    commands::{CreateDepartmentCommand, CreateDepartmentError},
    queries::{GetDepartmentError, GetDepartmentQuery, GetDepartmentsError, GetDepartmentsQuery},
};

pub fn departments_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route("/:id", get(get_department))
}

#[tracing::instrument(
    skip(state, query),
    fields(page = ?query.page_number, size = ?query.page_size, name = ?query.name)
)]
async fn list_departments(
    State(state): State<FeatureState>,
    Query(query): Query<GetDepartmentsQuery>,
) -> Result<Response, DepartmentApiError> {
    let response = send_query(&state.mediator, query).await??;

    tracing::debug!(count = response.data.len(), "Departments listed via API");

    let meta = json!({
        "pagination": response.pagination,
        "recordsTotal": response.counts.records_total,
        "recordsFiltered": response.counts.records_filtered,
    });

    Ok(ApiResponse::success_with_meta(response.data, meta).into_response())
}

#[tracing::instrument(skip(state), fields(id = %id))]
async fn get_department(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
) -> Result<Response, DepartmentApiError> {
    let record = send_query(&state.mediator, GetDepartmentQuery { id }).await??;
    Ok(ApiResponse::success(record).into_response())
}

#[tracing::instrument(skip(state, command), fields(name = %command.name))]
async fn create_department(
    State(state): State<FeatureState>,
    Json(command): Json<CreateDepartmentCommand>,
) -> Result<Response, DepartmentApiError> {
    let record = send_command(&state.mediator, command).await??;

    tracing::info!(department_id = %record.id, "Department created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))).into_response())
}

#[derive(Debug, thiserror::Error)]
enum DepartmentApiError {
    #[error(transparent)]
    List(#[from] GetDepartmentsError),
    #[error(transparent)]
    Get(#[from] GetDepartmentError),
    #[error(transparent)]
    Create(#[from] CreateDepartmentError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl IntoResponse for DepartmentApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            DepartmentApiError::List(GetDepartmentsError::Pagination(_))
            | DepartmentApiError::Create(CreateDepartmentError::Name(_)) => {
                ErrorResponse::validation(message)
            },
            DepartmentApiError::List(GetDepartmentsError::List(ref e)) => list_query_error_response(e),
            DepartmentApiError::Get(GetDepartmentError::NotFound(_)) => {
                ErrorResponse::not_found(message)
            },
            DepartmentApiError::Create(CreateDepartmentError::DuplicateName(_)) => {
                ErrorResponse::conflict(message)
            },
            DepartmentApiError::Get(GetDepartmentError::Database(ref e))
            | DepartmentApiError::Create(CreateDepartmentError::Database(ref e)) => {
                ErrorResponse::database(e)
            },
            DepartmentApiError::App(e) => e.into_response(),
        }
    }
}
